//! Polygon value type (ordered vertices + cached bounding box).
//!
//! Purpose
//! - Own the ordered vertex list of a simple closed polygon. The last vertex
//!   connects back to the first; insertion order defines edges and orientation.
//! - Validate once at construction so every estimator can assume a well-formed
//!   input (≥3 vertices, finite coordinates, finite bounding-box area).
//! - Derive the axis-aligned bounding box once; it is read by both sampling
//!   engines on every call.
//!
//! Sharing
//! - `Polygon` has no interior mutability and is `Send + Sync`; the engines
//!   borrow it across rayon workers without synchronization.

mod bbox;

pub use bbox::BoundingBox;

use nalgebra::Vector2;
use serde::Serialize;

use crate::error::{AreaError, Result};

/// Minimum number of vertices for a closed polygon.
pub const MIN_VERTICES: usize = 3;

/// Simple closed polygon, immutable after construction.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Polygon {
    #[serde(serialize_with = "serialize_vertices")]
    vertices: Vec<Vector2<f64>>,
    bbox: BoundingBox,
}

impl Polygon {
    /// Build from ordered vertices. Fails on fewer than three vertices, any
    /// non-finite coordinate, or a bounding box whose extent overflows `f64`.
    pub fn new(vertices: Vec<Vector2<f64>>) -> Result<Self> {
        if vertices.len() < MIN_VERTICES {
            return Err(AreaError::invalid_polygon(format!(
                "need at least {MIN_VERTICES} vertices, got {}",
                vertices.len()
            )));
        }
        if let Some(k) = vertices
            .iter()
            .position(|v| !(v.x.is_finite() && v.y.is_finite()))
        {
            return Err(AreaError::invalid_polygon(format!(
                "vertex {k} has a non-finite coordinate"
            )));
        }
        let bbox = BoundingBox::enclosing(&vertices);
        if !(bbox.width().is_finite() && bbox.height().is_finite() && bbox.area().is_finite()) {
            return Err(AreaError::invalid_polygon(format!(
                "bounding box extent overflows: width {:e}, height {:e}",
                bbox.width(),
                bbox.height()
            )));
        }
        Ok(Self { vertices, bbox })
    }

    /// Skip validation for vertex lists known to be well-formed (built-in shapes).
    pub(crate) fn from_valid(vertices: Vec<Vector2<f64>>) -> Self {
        debug_assert!(vertices.len() >= MIN_VERTICES);
        let bbox = BoundingBox::enclosing(&vertices);
        Self { vertices, bbox }
    }

    /// Build from `(x, y)` tuples.
    pub fn from_xy(points: &[(f64, f64)]) -> Result<Self> {
        Self::new(points.iter().map(|&(x, y)| Vector2::new(x, y)).collect())
    }

    /// Build from `[x, y]` pairs (the JSON input shape of the driver).
    pub fn from_pairs(points: &[[f64; 2]]) -> Result<Self> {
        Self::new(points.iter().map(|p| Vector2::new(p[0], p[1])).collect())
    }

    #[inline]
    pub fn vertices(&self) -> &[Vector2<f64>] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false for a constructed polygon; present for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    /// Same vertices in reverse order (flips orientation).
    pub fn reversed(&self) -> Self {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Self {
            vertices,
            bbox: self.bbox,
        }
    }

    /// Same cycle starting at vertex `k` (mod n).
    pub fn rotated(&self, k: usize) -> Self {
        let mut vertices = self.vertices.clone();
        let n = vertices.len();
        vertices.rotate_left(k % n);
        Self {
            vertices,
            bbox: self.bbox,
        }
    }

    /// Cyclic edges `(v[j], v[i])` with `j` the predecessor of `i`.
    pub fn edges(&self) -> impl Iterator<Item = (Vector2<f64>, Vector2<f64>)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[(i + n - 1) % n], self.vertices[i]))
    }
}

fn serialize_vertices<S: serde::Serializer>(
    vertices: &[Vector2<f64>],
    s: S,
) -> std::result::Result<S::Ok, S::Error> {
    use serde::ser::SerializeSeq;
    let mut seq = s.serialize_seq(Some(vertices.len()))?;
    for v in vertices {
        seq.serialize_element(&[v.x, v.y])?;
    }
    seq.end()
}
