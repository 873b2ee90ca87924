//! Result records handed to reporting and plotting collaborators.
//!
//! - `AreaEstimate`: one scalar area plus a method tag, the parameters that
//!   produced it, and method-specific diagnostics.
//! - `CellCoverage`, `SamplePoint`: per-cell and per-dart artifacts, only
//!   materialized by the `*_detailed` engine entry points.
//!
//! Values are stored unrounded; formatting is the consumer's decision.

use std::time::Duration;

use serde::Serialize;

use crate::grid::GridParams;
use crate::monte_carlo::MonteCarloParams;

/// Which estimator produced an `AreaEstimate`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Method {
    Exact,
    Grid,
    MonteCarlo,
}

impl Method {
    pub fn label(self) -> &'static str {
        match self {
            Method::Exact => "exact (shoelace)",
            Method::Grid => "grid quadrature",
            Method::MonteCarlo => "monte carlo",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Method-specific configuration, as supplied by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum Params {
    Exact,
    Grid(GridParams),
    MonteCarlo(MonteCarloParams),
}

/// Grid engine counters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GridDiagnostics {
    pub resolution: usize,
    /// Requested samples per cell (before floor-sqrt truncation).
    pub samples_requested: usize,
    /// Samples actually evaluated per cell: `floor(sqrt(requested))²`.
    pub samples_per_cell: usize,
    pub total_cells: usize,
    pub cell_area: f64,
    /// Bounding box had zero width or height; sampling was skipped.
    pub degenerate_bbox: bool,
    pub elapsed: Duration,
}

/// Monte Carlo engine counters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MonteCarloDiagnostics {
    pub n_samples: usize,
    pub inside_count: usize,
    pub fraction_inside: f64,
    pub bbox_area: f64,
    /// Bounding box had zero width or height; sampling was skipped.
    pub degenerate_bbox: bool,
    pub elapsed: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum Diagnostics {
    Exact { vertices: usize, elapsed: Duration },
    Grid(GridDiagnostics),
    MonteCarlo(MonteCarloDiagnostics),
}

impl Diagnostics {
    pub fn elapsed(&self) -> Duration {
        match self {
            Diagnostics::Exact { elapsed, .. } => *elapsed,
            Diagnostics::Grid(d) => d.elapsed,
            Diagnostics::MonteCarlo(d) => d.elapsed,
        }
    }

    pub fn degenerate_bbox(&self) -> bool {
        match self {
            Diagnostics::Exact { .. } => false,
            Diagnostics::Grid(d) => d.degenerate_bbox,
            Diagnostics::MonteCarlo(d) => d.degenerate_bbox,
        }
    }
}

/// One area estimate. Immutable once produced.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AreaEstimate {
    pub area: f64,
    pub method: Method,
    pub params: Params,
    pub diagnostics: Diagnostics,
}

impl AreaEstimate {
    pub fn grid_diagnostics(&self) -> Option<&GridDiagnostics> {
        match &self.diagnostics {
            Diagnostics::Grid(d) => Some(d),
            _ => None,
        }
    }

    pub fn monte_carlo_diagnostics(&self) -> Option<&MonteCarloDiagnostics> {
        match &self.diagnostics {
            Diagnostics::MonteCarlo(d) => Some(d),
            _ => None,
        }
    }
}

/// Coverage of lattice cell `(i, j)`: `i` indexes x, `j` indexes y.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CellCoverage {
    pub i: usize,
    pub j: usize,
    /// Fraction of the cell's samples classified inside, in `[0, 1]`.
    pub coverage: f64,
    /// `coverage × cell_area`.
    pub area: f64,
}

/// A classified Monte Carlo dart.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
    pub inside: bool,
}
