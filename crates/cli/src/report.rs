//! Human-readable rendering of comparisons and resolution sweeps.

use std::fmt;

use anyhow::Result;
use curvearea::prelude::*;
use curvearea::relative_error;
use rand::{rngs::StdRng, SeedableRng};

const RULE: &str = "------------------------------------------------------------";

pub fn comparison(label: &str, cmp: &Comparison) -> String {
    ComparisonReport { label, cmp }.to_string()
}

struct ComparisonReport<'a> {
    label: &'a str,
    cmp: &'a Comparison,
}

impl fmt::Display for ComparisonReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cmp = self.cmp;
        let b = &cmp.bbox;
        writeln!(f, "{}: {} vertices", self.label, cmp.vertices)?;
        writeln!(
            f,
            "bounding box: [{:.2}, {:.2}] x [{:.2}, {:.2}], area {:.4}",
            b.min_x, b.max_x, b.min_y, b.max_y, cmp.bbox_area
        )?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "exact area (shoelace): {:.6}", cmp.exact.area)?;
        writeln!(f, "{RULE}")?;

        writeln!(f, "grid quadrature:")?;
        writeln!(f, "  estimated area: {:.6}", cmp.grid.area)?;
        writeln!(f, "  error: {}", percent(cmp.grid_error))?;
        if let Some(d) = cmp.grid.grid_diagnostics() {
            writeln!(f, "  resolution: {0}x{0}", d.resolution)?;
            writeln!(
                f,
                "  samples per cell: {} (requested {})",
                d.samples_per_cell, d.samples_requested
            )?;
            writeln!(f, "  total cells: {}", d.total_cells)?;
            if d.degenerate_bbox {
                writeln!(f, "  degenerate bounding box: sampling skipped")?;
            }
            writeln!(f, "  time: {:.4} s", d.elapsed.as_secs_f64())?;
        }
        writeln!(f, "{RULE}")?;

        writeln!(f, "monte carlo:")?;
        writeln!(f, "  estimated area: {:.6}", cmp.monte_carlo.area)?;
        writeln!(f, "  error: {}", percent(cmp.monte_carlo_error))?;
        if let Some(d) = cmp.monte_carlo.monte_carlo_diagnostics() {
            writeln!(f, "  samples: {}", d.n_samples)?;
            writeln!(f, "  inside: {}", d.inside_count)?;
            writeln!(f, "  fraction inside: {:.6}", d.fraction_inside)?;
            if d.degenerate_bbox {
                writeln!(f, "  degenerate bounding box: sampling skipped")?;
            }
            writeln!(f, "  time: {:.4} s", d.elapsed.as_secs_f64())?;
        }
        writeln!(f, "{RULE}")
    }
}

fn percent(err: RelativeError) -> String {
    match err {
        RelativeError::Percent(p) => format!("{p:.3}%"),
        RelativeError::Undefined => "undefined (exact area is zero)".to_string(),
    }
}

/// One grid run of a resolution sweep.
#[derive(Clone, Debug)]
pub struct SweepRow {
    pub resolution: usize,
    pub area: f64,
    pub error: RelativeError,
    pub seconds: f64,
}

/// Run the grid engine once per resolution, sharing one seeded stream.
pub fn sweep_rows(
    poly: &Polygon,
    resolutions: &[usize],
    samples_per_cell: usize,
    seed: u64,
) -> Result<Vec<SweepRow>> {
    let exact = exact_area(poly);
    let mut rng = StdRng::seed_from_u64(seed);
    resolutions
        .iter()
        .map(|&res| {
            let est = grid_area(poly, GridParams::new(res, samples_per_cell), &mut rng)?;
            tracing::debug!(res, area = est.area, "sweep step");
            Ok(SweepRow {
                resolution: res,
                area: est.area,
                error: relative_error(est.area, exact),
                seconds: est.diagnostics.elapsed().as_secs_f64(),
            })
        })
        .collect()
}

pub fn sweep(label: &str, exact: f64, rows: &[SweepRow]) -> String {
    SweepReport { label, exact, rows }.to_string()
}

struct SweepReport<'a> {
    label: &'a str,
    exact: f64,
    rows: &'a [SweepRow],
}

impl fmt::Display for SweepReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: grid resolution sweep (exact {:.6})", self.label, self.exact)?;
        writeln!(f, "{:>10}  {:>14}  {:>32}  {:>9}", "resolution", "area", "error", "time (s)")?;
        for r in self.rows {
            writeln!(
                f,
                "{:>10}  {:>14.6}  {:>32}  {:>9.4}",
                r.resolution,
                r.area,
                percent(r.error),
                r.seconds
            )?;
        }
        Ok(())
    }
}
