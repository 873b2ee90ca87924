//! Reference polygons used by the demo driver, benches and tests.
//!
//! Radial constructions place vertex `k` at angle `2πk/n` starting on the
//! positive x-axis, counter-clockwise.

use nalgebra::Vector2;

use crate::error::{AreaError, Result};
use crate::polygon::Polygon;

/// `(0,0), (1,0), (0,1)`: area 0.5.
pub fn unit_right_triangle() -> Polygon {
    Polygon::from_valid(vec![
        Vector2::new(0.0, 0.0),
        Vector2::new(1.0, 0.0),
        Vector2::new(0.0, 1.0),
    ])
}

/// `(0,0), (4,0), (2,3)`: area 6.
pub fn triangle() -> Polygon {
    Polygon::from_valid(vec![
        Vector2::new(0.0, 0.0),
        Vector2::new(4.0, 0.0),
        Vector2::new(2.0, 3.0),
    ])
}

/// Regular `n`-gon inscribed in a circle of radius `radius`.
pub fn regular_polygon(n: usize, radius: f64) -> Result<Polygon> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(AreaError::invalid_polygon("radius must be finite and > 0"));
    }
    Polygon::new(radial(n, |_| radius))
}

/// Star with `points` tips: `2·points` vertices alternating `outer`, `inner` radii.
pub fn star(points: usize, outer: f64, inner: f64) -> Result<Polygon> {
    if !(outer.is_finite() && inner.is_finite() && outer > 0.0 && inner > 0.0) {
        return Err(AreaError::invalid_polygon("star radii must be finite and > 0"));
    }
    Polygon::new(radial(2 * points, |k| if k % 2 == 0 { outer } else { inner }))
}

fn radial(n: usize, radius: impl Fn(usize) -> f64) -> Vec<Vector2<f64>> {
    let delta = std::f64::consts::TAU / n as f64;
    (0..n)
        .map(|k| {
            let th = k as f64 * delta;
            let r = radius(k);
            Vector2::new(r * th.cos(), r * th.sin())
        })
        .collect()
}
