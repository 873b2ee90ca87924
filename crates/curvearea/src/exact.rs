//! Exact polygon area via the shoelace (trapezoid) formula.
//!
//! Uses the trapezoid form `½ |Σ (x[j] + x[i]) * (y[j] − y[i])|`, which stays
//! better conditioned than the cross-product form for large coordinates.
//! This is the reference value the sampling engines are checked against.

use std::time::Instant;

use crate::estimate::{AreaEstimate, Diagnostics, Method, Params};
use crate::polygon::Polygon;

/// Signed area: positive for counter-clockwise vertex order.
pub fn signed_area(polygon: &Polygon) -> f64 {
    // Trapezoid terms are negative along a CCW traversal; flip once at the end.
    let sum: f64 = polygon
        .edges()
        .map(|(vj, vi)| (vj.x + vi.x) * (vj.y - vi.y))
        .sum();
    -0.5 * sum
}

/// Unsigned enclosed area (orientation independent, always ≥ 0).
pub fn exact_area(polygon: &Polygon) -> f64 {
    signed_area(polygon).abs()
}

/// `exact_area` wrapped as an `AreaEstimate` for side-by-side reporting.
pub fn exact_estimate(polygon: &Polygon) -> AreaEstimate {
    let start = Instant::now();
    let area = exact_area(polygon);
    AreaEstimate {
        area,
        method: Method::Exact,
        params: Params::Exact,
        diagnostics: Diagnostics::Exact {
            vertices: polygon.len(),
            elapsed: start.elapsed(),
        },
    }
}
