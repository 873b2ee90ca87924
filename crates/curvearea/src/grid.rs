//! Grid quadrature with jittered per-cell supersampling.
//!
//! Model
//! - Split the bounding box into `resolution × resolution` equal cells.
//! - Build one set of `s × s` sample offsets in the unit cell, `s = floor(sqrt(samples_per_cell))`,
//!   each centered in its sub-cell and jittered by up to ±10% of a sub-cell.
//!   The set is drawn once per call and reused for every cell.
//! - Cell coverage is the inside fraction of its samples; the estimate is
//!   `Σ coverage × cell_area`.
//!
//! Truncation
//! - The evaluated count is `s²`, which can be below the requested count
//!   (10 → 9). Diagnostics report both numbers.
//!
//! Parallelism
//! - Columns run on the rayon pool. Column partials are collected in index
//!   order and summed sequentially, so the estimate does not depend on the
//!   number of worker threads.

use std::time::Instant;

use nalgebra::Vector2;
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{AreaError, Result};
use crate::estimate::{AreaEstimate, CellCoverage, Diagnostics, GridDiagnostics, Method, Params};
use crate::inclusion::is_inside;
use crate::polygon::Polygon;

/// Jitter amplitude as a fraction of one sub-cell.
pub const JITTER_FRAC: f64 = 0.1;

/// Grid engine parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridParams {
    /// Cells per axis.
    pub resolution: usize,
    /// Requested samples per cell; truncated to a perfect square.
    pub samples_per_cell: usize,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            resolution: 100,
            samples_per_cell: 16,
        }
    }
}

impl GridParams {
    pub fn new(resolution: usize, samples_per_cell: usize) -> Self {
        Self {
            resolution,
            samples_per_cell,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.resolution == 0 {
            return Err(AreaError::invalid_param("grid resolution must be >= 1"));
        }
        if self.samples_per_cell == 0 {
            return Err(AreaError::invalid_param("samples per cell must be >= 1"));
        }
        Ok(())
    }

    /// `floor(sqrt(samples_per_cell))`.
    pub fn samples_per_side(&self) -> usize {
        isqrt(self.samples_per_cell)
    }

    /// Samples actually evaluated per cell.
    pub fn effective_samples(&self) -> usize {
        let s = self.samples_per_side();
        s * s
    }
}

/// Estimate plus the per-cell artifacts a plotter needs.
#[derive(Clone, Debug)]
pub struct GridDetail {
    pub estimate: AreaEstimate,
    /// Row-major by `i` (x index), then `j`. Empty for a degenerate bounding box.
    pub cells: Vec<CellCoverage>,
    /// The jittered unit-cell offsets used for every cell.
    pub offsets: Vec<Vector2<f64>>,
}

/// Grid quadrature estimate of the polygon's area.
pub fn grid_area<R: Rng>(polygon: &Polygon, params: GridParams, rng: &mut R) -> Result<AreaEstimate> {
    run(polygon, params, rng, false).map(|d| d.estimate)
}

/// Like `grid_area`, also returning every `CellCoverage`.
pub fn grid_area_detailed<R: Rng>(
    polygon: &Polygon,
    params: GridParams,
    rng: &mut R,
) -> Result<GridDetail> {
    run(polygon, params, rng, true)
}

fn run<R: Rng>(
    polygon: &Polygon,
    params: GridParams,
    rng: &mut R,
    keep_cells: bool,
) -> Result<GridDetail> {
    params.validate()?;
    let start = Instant::now();
    let res = params.resolution;
    let offsets = unit_offsets(params.samples_per_side(), rng);
    let bbox = *polygon.bbox();

    let mut diag = GridDiagnostics {
        resolution: res,
        samples_requested: params.samples_per_cell,
        samples_per_cell: offsets.len(),
        total_cells: 0,
        cell_area: 0.0,
        degenerate_bbox: bbox.is_degenerate(),
        elapsed: Default::default(),
    };

    if diag.degenerate_bbox {
        tracing::warn!(
            width = bbox.width(),
            height = bbox.height(),
            "degenerate bounding box, grid estimate is zero"
        );
        diag.elapsed = start.elapsed();
        return Ok(GridDetail {
            estimate: finish(0.0, params, diag),
            cells: Vec::new(),
            offsets,
        });
    }

    let cell_w = bbox.width() / res as f64;
    let cell_h = bbox.height() / res as f64;
    let cell_area = cell_w * cell_h;
    let n_offsets = offsets.len() as f64;

    let columns: Vec<(f64, Vec<CellCoverage>)> = (0..res)
        .into_par_iter()
        .map(|i| {
            let left = bbox.min_x + i as f64 * cell_w;
            let mut sum = 0.0;
            let mut cells = Vec::with_capacity(if keep_cells { res } else { 0 });
            for j in 0..res {
                let bottom = bbox.min_y + j as f64 * cell_h;
                let inside = offsets
                    .iter()
                    .filter(|o| is_inside(polygon, left + o.x * cell_w, bottom + o.y * cell_h))
                    .count();
                let coverage = inside as f64 / n_offsets;
                let area = coverage * cell_area;
                sum += area;
                if keep_cells {
                    cells.push(CellCoverage {
                        i,
                        j,
                        coverage,
                        area,
                    });
                }
            }
            (sum, cells)
        })
        .collect();

    let mut total = 0.0;
    let mut cells = Vec::with_capacity(if keep_cells { res * res } else { 0 });
    for (sum, col) in columns {
        total += sum;
        cells.extend(col);
    }

    diag.total_cells = res * res;
    diag.cell_area = cell_area;
    diag.elapsed = start.elapsed();
    tracing::debug!(
        area = total,
        resolution = res,
        samples_per_cell = diag.samples_per_cell,
        cells = diag.total_cells,
        elapsed_ms = diag.elapsed.as_secs_f64() * 1e3,
        "grid estimate"
    );
    Ok(GridDetail {
        estimate: finish(total, params, diag),
        cells,
        offsets,
    })
}

fn finish(area: f64, params: GridParams, diag: GridDiagnostics) -> AreaEstimate {
    AreaEstimate {
        area,
        method: Method::Grid,
        params: Params::Grid(params),
        diagnostics: Diagnostics::Grid(diag),
    }
}

/// `side × side` jittered offsets in the unit cell, x-major.
fn unit_offsets<R: Rng>(side: usize, rng: &mut R) -> Vec<Vector2<f64>> {
    let s = side as f64;
    let mut out = Vec::with_capacity(side * side);
    for a in 0..side {
        for b in 0..side {
            let jx = rng.gen_range(-JITTER_FRAC..JITTER_FRAC) / s;
            let jy = rng.gen_range(-JITTER_FRAC..JITTER_FRAC) / s;
            out.push(Vector2::new(
                (a as f64 + 0.5) / s + jx,
                (b as f64 + 0.5) / s + jy,
            ));
        }
    }
    out
}

/// Integer floor square root.
fn isqrt(n: usize) -> usize {
    let mut s = (n as f64).sqrt() as usize;
    while s * s > n {
        s -= 1;
    }
    while (s + 1) * (s + 1) <= n {
        s += 1;
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exact::exact_area;
    use crate::shapes;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn floor_sqrt_truncation() {
        for (req, side, eff) in [(1, 1, 1), (3, 1, 1), (4, 2, 4), (10, 3, 9), (16, 4, 16), (24, 4, 16), (25, 5, 25)] {
            let p = GridParams::new(10, req);
            assert_eq!(p.samples_per_side(), side, "req {req}");
            assert_eq!(p.effective_samples(), eff, "req {req}");
        }
    }

    #[test]
    fn reports_truncated_count_not_requested() {
        let tri = shapes::triangle();
        let mut rng = StdRng::seed_from_u64(7);
        let est = grid_area(&tri, GridParams::new(20, 10), &mut rng).unwrap();
        let d = est.grid_diagnostics().unwrap();
        assert_eq!(d.samples_per_cell, 9);
        assert_eq!(d.samples_requested, 10);
        assert_eq!(d.total_cells, 400);
        assert!(matches!(est.params, Params::Grid(GridParams { samples_per_cell: 10, .. })));
    }

    #[test]
    fn rejects_bad_params_before_sampling() {
        let tri = shapes::triangle();
        let mut rng = StdRng::seed_from_u64(0);
        for params in [GridParams::new(0, 16), GridParams::new(10, 0)] {
            let err = grid_area(&tri, params, &mut rng).unwrap_err();
            assert!(matches!(err, AreaError::InvalidParameter { .. }));
        }
    }

    #[test]
    fn offsets_stay_in_their_subcells() {
        let mut rng = StdRng::seed_from_u64(3);
        let side = 4;
        let offs = unit_offsets(side, &mut rng);
        assert_eq!(offs.len(), 16);
        for (k, o) in offs.iter().enumerate() {
            let (a, b) = ((k / side) as f64, (k % side) as f64);
            let s = side as f64;
            assert!((o.x - (a + 0.5) / s).abs() <= JITTER_FRAC / s);
            assert!((o.y - (b + 0.5) / s).abs() <= JITTER_FRAC / s);
        }
    }

    #[test]
    fn square_is_fully_covered() {
        let sq = Polygon::from_xy(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let detail = grid_area_detailed(&sq, GridParams::new(25, 9), &mut rng).unwrap();
        assert!((detail.estimate.area - 16.0).abs() < 1e-9);
        assert!(detail.cells.iter().all(|c| c.coverage == 1.0));
    }

    #[test]
    fn detailed_cells_sum_to_estimate() {
        let star = shapes::star(5, 4.0, 2.0).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let detail = grid_area_detailed(&star, GridParams::new(40, 16), &mut rng).unwrap();
        assert_eq!(detail.cells.len(), 1600);
        assert_eq!((detail.cells[41].i, detail.cells[41].j), (1, 1));
        assert!(detail.cells.iter().all(|c| (0.0..=1.0).contains(&c.coverage)));
        assert!(detail.cells.iter().any(|c| c.coverage > 0.0 && c.coverage < 1.0));
        let sum: f64 = detail.cells.iter().map(|c| c.area).sum();
        assert!((sum - detail.estimate.area).abs() < 1e-9);
    }

    #[test]
    fn one_offset_set_serves_every_cell() {
        let star = shapes::star(5, 4.0, 2.0).unwrap();
        let res = 30;
        let detail =
            grid_area_detailed(&star, GridParams::new(res, 16), &mut StdRng::seed_from_u64(8)).unwrap();
        assert_eq!(detail.offsets.len(), 16);
        let bbox = star.bbox();
        let cell_w = bbox.width() / res as f64;
        let cell_h = bbox.height() / res as f64;
        for (k, cell) in detail.cells.iter().enumerate() {
            assert_eq!((cell.i, cell.j), (k / res, k % res));
            let left = bbox.min_x + cell.i as f64 * cell_w;
            let bottom = bbox.min_y + cell.j as f64 * cell_h;
            let hits = detail
                .offsets
                .iter()
                .filter(|o| is_inside(&star, left + o.x * cell_w, bottom + o.y * cell_h))
                .count();
            assert_eq!(cell.coverage, hits as f64 / 16.0, "cell ({}, {})", cell.i, cell.j);
        }
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let p = shapes::regular_polygon(5, 3.0).unwrap();
        let a = grid_area(&p, GridParams::new(60, 16), &mut StdRng::seed_from_u64(9)).unwrap();
        let b = grid_area(&p, GridParams::new(60, 16), &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a.area, b.area);
    }

    #[test]
    fn thread_count_does_not_change_result() {
        let p = shapes::star(5, 4.0, 2.0).unwrap();
        let params = GridParams::new(64, 16);
        let single = rayon::ThreadPoolBuilder::new()
            .num_threads(1)
            .build()
            .unwrap()
            .install(|| grid_area(&p, params, &mut StdRng::seed_from_u64(1)).unwrap());
        let multi = rayon::ThreadPoolBuilder::new()
            .num_threads(4)
            .build()
            .unwrap()
            .install(|| grid_area(&p, params, &mut StdRng::seed_from_u64(1)).unwrap());
        assert_eq!(single.area, multi.area);
    }

    #[test]
    fn refinement_reduces_deviation() {
        let p = shapes::regular_polygon(5, 3.0).unwrap();
        let exact = exact_area(&p);
        let coarse = grid_area(&p, GridParams::new(10, 16), &mut StdRng::seed_from_u64(2)).unwrap();
        let fine = grid_area(&p, GridParams::new(100, 16), &mut StdRng::seed_from_u64(2)).unwrap();
        assert!((fine.area - exact).abs() < (coarse.area - exact).abs());
    }

    #[test]
    fn degenerate_bbox_is_zero_and_flagged() {
        let axis = Polygon::from_xy(&[(0.0, 1.0), (0.0, 2.0), (0.0, 3.0)]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let detail = grid_area_detailed(&axis, GridParams::default(), &mut rng).unwrap();
        assert_eq!(detail.estimate.area, 0.0);
        assert!(detail.estimate.diagnostics.degenerate_bbox());
        assert!(detail.cells.is_empty());
    }

    #[test]
    fn collinear_diagonal_is_zero() {
        let line = Polygon::from_xy(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]).unwrap();
        let est = grid_area(&line, GridParams::new(50, 16), &mut StdRng::seed_from_u64(4)).unwrap();
        assert_eq!(est.area, 0.0);
        assert!(!est.diagnostics.degenerate_bbox());
    }
}
