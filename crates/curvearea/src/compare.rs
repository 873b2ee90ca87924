//! Side-by-side comparison of the three estimators.
//!
//! The only surface offered to presentation code: it runs exact, grid and
//! Monte Carlo with the caller's configuration and attaches relative errors.
//! Numbers are passed through unrounded.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::config::EstimatorCfg;
use crate::error::Result;
use crate::estimate::AreaEstimate;
use crate::exact::exact_estimate;
use crate::grid::grid_area;
use crate::monte_carlo::monte_carlo_area;
use crate::polygon::{BoundingBox, Polygon};

/// Relative error in percent, or `Undefined` when the exact area is zero.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum RelativeError {
    Percent(f64),
    Undefined,
}

impl RelativeError {
    pub fn percent(self) -> Option<f64> {
        match self {
            RelativeError::Percent(p) => Some(p),
            RelativeError::Undefined => None,
        }
    }
}

impl std::fmt::Display for RelativeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelativeError::Percent(p) => write!(f, "{p}%"),
            RelativeError::Undefined => f.write_str("undefined"),
        }
    }
}

/// `|estimate − exact| / exact × 100`, guarded against a zero (or non-finite) reference.
pub fn relative_error(estimate: f64, exact: f64) -> RelativeError {
    if exact == 0.0 || !exact.is_finite() || !estimate.is_finite() {
        return RelativeError::Undefined;
    }
    RelativeError::Percent((estimate - exact).abs() / exact.abs() * 100.0)
}

/// All three estimates for one polygon plus errors of the sampling methods.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Comparison {
    pub vertices: usize,
    pub bbox: BoundingBox,
    pub bbox_area: f64,
    pub cfg: EstimatorCfg,
    pub exact: AreaEstimate,
    pub grid: AreaEstimate,
    pub monte_carlo: AreaEstimate,
    pub grid_error: RelativeError,
    pub monte_carlo_error: RelativeError,
}

/// Run every estimator with a `StdRng` seeded from `cfg.seed`.
pub fn compare(polygon: &Polygon, cfg: &EstimatorCfg) -> Result<Comparison> {
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    compare_with_rng(polygon, cfg, &mut rng)
}

/// Like `compare`, drawing jitter and the Monte Carlo master seed from `rng`.
/// `cfg.seed` is recorded but not used.
pub fn compare_with_rng<R: Rng>(
    polygon: &Polygon,
    cfg: &EstimatorCfg,
    rng: &mut R,
) -> Result<Comparison> {
    cfg.validate()?;
    let exact = exact_estimate(polygon);
    let grid = grid_area(polygon, cfg.grid(), rng)?;
    let monte_carlo = monte_carlo_area(polygon, cfg.monte_carlo(), rng)?;
    let bbox = *polygon.bbox();
    Ok(Comparison {
        vertices: polygon.len(),
        bbox,
        bbox_area: bbox.area(),
        cfg: *cfg,
        grid_error: relative_error(grid.area, exact.area),
        monte_carlo_error: relative_error(monte_carlo.area, exact.area),
        exact,
        grid,
        monte_carlo,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AreaError;
    use crate::estimate::Method;
    use crate::shapes;

    fn small_cfg() -> EstimatorCfg {
        EstimatorCfg {
            grid_resolution: 50,
            samples_per_cell: 16,
            monte_carlo_samples: 50_000,
            seed: 17,
        }
    }

    #[test]
    fn relative_error_basic_and_guarded() {
        for est in [9.0, 11.0] {
            let p = relative_error(est, 10.0).percent().unwrap();
            assert!((p - 10.0).abs() < 1e-12);
        }
        assert_eq!(relative_error(10.0, 10.0), RelativeError::Percent(0.0));
        assert_eq!(relative_error(0.0, 0.0), RelativeError::Undefined);
        assert_eq!(relative_error(1.0, 0.0), RelativeError::Undefined);
        assert_eq!(relative_error(f64::NAN, 1.0), RelativeError::Undefined);
        assert_eq!(RelativeError::Undefined.to_string(), "undefined");
    }

    #[test]
    fn triangle_comparison() {
        let tri = shapes::triangle();
        let cmp = compare(&tri, &small_cfg()).unwrap();
        assert_eq!(cmp.exact.method, Method::Exact);
        assert_eq!(cmp.grid.method, Method::Grid);
        assert_eq!(cmp.monte_carlo.method, Method::MonteCarlo);
        assert!((cmp.exact.area - 6.0).abs() < 1e-12);
        assert_eq!(cmp.bbox_area, 12.0);
        assert_eq!(cmp.vertices, 3);
        assert!(cmp.grid_error.percent().unwrap() < 0.5);
        assert!(cmp.monte_carlo_error.percent().unwrap() < 3.0);
    }

    #[test]
    fn same_seed_same_comparison() {
        let p = shapes::regular_polygon(5, 3.0).unwrap();
        let a = compare(&p, &small_cfg()).unwrap();
        let b = compare(&p, &small_cfg()).unwrap();
        assert_eq!(a.grid.area, b.grid.area);
        assert_eq!(a.monte_carlo.area, b.monte_carlo.area);
    }

    #[test]
    fn zero_exact_area_gives_undefined_errors() {
        let line = crate::polygon::Polygon::from_xy(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]).unwrap();
        let cmp = compare(&line, &small_cfg()).unwrap();
        assert_eq!(cmp.exact.area, 0.0);
        assert_eq!(cmp.grid_error, RelativeError::Undefined);
        assert_eq!(cmp.monte_carlo_error, RelativeError::Undefined);
        assert!(!cmp.grid.area.is_nan() && !cmp.monte_carlo.area.is_nan());
    }

    #[test]
    fn invalid_cfg_rejected_up_front() {
        let tri = shapes::triangle();
        let cfg = EstimatorCfg {
            monte_carlo_samples: 0,
            ..small_cfg()
        };
        assert!(matches!(
            compare(&tri, &cfg),
            Err(AreaError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn serializes_for_collaborators() {
        let cmp = compare(&shapes::unit_right_triangle(), &small_cfg()).unwrap();
        let json = serde_json::to_value(&cmp).unwrap();
        assert_eq!(json["exact"]["method"], "Exact");
        assert_eq!(json["cfg"]["grid_resolution"], 50);
        assert!(json["grid_error"]["Percent"].is_number());
    }
}
