//! Area estimation for simple closed polygons.
//!
//! Three independent estimators share one point-in-polygon predicate:
//! - `exact`: shoelace formula, the reference value.
//! - `grid`: lattice quadrature with jittered supersampling per cell.
//! - `monte_carlo`: uniform darts in the bounding box.
//!
//! `compare` runs all three and reports relative errors against the exact area.
//! Plotting and printing live outside this crate; the engines expose the
//! intermediate artifacts (`CellCoverage`, `SamplePoint`) those consumers need.
//!
//! API Policy
//! - `Polygon` is immutable after construction and shared by reference.
//! - Randomness is always supplied by the caller (`rand::Rng`), never global.

pub mod compare;
pub mod config;
pub mod error;
pub mod estimate;
pub mod exact;
pub mod grid;
pub mod inclusion;
pub mod monte_carlo;
pub mod polygon;
pub mod shapes;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use compare::{compare, relative_error, Comparison, RelativeError};
pub use config::EstimatorCfg;
pub use error::{AreaError, Result};
pub use estimate::{
    AreaEstimate, CellCoverage, Diagnostics, GridDiagnostics, Method, MonteCarloDiagnostics,
    Params, SamplePoint,
};
pub use exact::{exact_area, exact_estimate, signed_area};
pub use grid::{grid_area, grid_area_detailed, GridDetail, GridParams};
pub use inclusion::{is_inside, is_inside_vertices};
pub use monte_carlo::{
    monte_carlo_area, monte_carlo_area_detailed, MonteCarloDetail, MonteCarloParams,
};
pub use nalgebra::Vector2 as Vec2;
pub use polygon::{BoundingBox, Polygon};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::compare::{compare, Comparison, RelativeError};
    pub use crate::config::EstimatorCfg;
    pub use crate::error::AreaError;
    pub use crate::estimate::{AreaEstimate, CellCoverage, Method, SamplePoint};
    pub use crate::exact::exact_area;
    pub use crate::grid::{grid_area, grid_area_detailed, GridParams};
    pub use crate::inclusion::is_inside;
    pub use crate::monte_carlo::{monte_carlo_area, monte_carlo_area_detailed, MonteCarloParams};
    pub use crate::polygon::{BoundingBox, Polygon};
    pub use crate::shapes;
    pub use nalgebra::Vector2 as Vec2;
}
