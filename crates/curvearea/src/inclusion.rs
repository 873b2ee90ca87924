//! Even-odd ray casting (point-in-polygon).
//!
//! A horizontal ray from `(x, y)` toward `+x` crosses edge `(v[j], v[i])` when
//! exactly one endpoint lies strictly above `y` and the edge's intersection
//! with the ray lies strictly right of `x`. Each crossing toggles the result.
//!
//! - Horizontal edges never satisfy `(yi > y) != (yj > y)` and are skipped.
//! - Points exactly on an edge get whatever the float comparisons produce;
//!   callers treat that as sampling noise.
//! - This is the hot loop of both sampling engines: no allocation per call.

use nalgebra::Vector2;

use crate::polygon::Polygon;

/// Is `(x, y)` inside `polygon` under the even-odd rule?
#[inline]
pub fn is_inside(polygon: &Polygon, x: f64, y: f64) -> bool {
    // No ray from outside the box can cross an odd number of edges.
    if !polygon.bbox().contains(x, y) {
        return false;
    }
    is_inside_vertices(polygon.vertices(), x, y)
}

/// Ray casting over a raw, implicitly closed vertex slice.
#[inline]
pub fn is_inside_vertices(vertices: &[Vector2<f64>], x: f64, y: f64) -> bool {
    let Some(last) = vertices.last() else {
        return false;
    };
    let mut inside = false;
    let mut vj = last;
    for vi in vertices {
        if (vi.y > y) != (vj.y > y) && x < (vj.x - vi.x) * (y - vi.y) / (vj.y - vi.y) + vi.x {
            inside = !inside;
        }
        vj = vi;
    }
    inside
}
