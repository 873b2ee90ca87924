//! CSV export of the artifacts an external plotter needs.
//!
//! - `vertices.csv`: `k, x, y` in polygon order.
//! - `cells.csv`: `i, j, coverage, area` for every grid cell.
//! - `darts.csv`: `x, y, inside` for every Monte Carlo sample.
//!
//! Each file gets a provenance sidecar.

use anyhow::{Context, Result};
use curvearea::prelude::*;
use polars::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::provenance::{write_sidecar, Payload};

/// Write all three CSVs into `out_dir`; returns the data file paths.
pub fn write_plot_inputs(
    poly: &Polygon,
    cfg: &EstimatorCfg,
    out_dir: &Path,
    label: &str,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let grid = grid_area_detailed(poly, cfg.grid(), &mut rng)?;
    let darts = monte_carlo_area_detailed(poly, cfg.monte_carlo(), &mut rng)?;

    let mut frames = [
        ("vertices.csv", vertices_frame(poly)?),
        ("cells.csv", cells_frame(&grid.cells)?),
        ("darts.csv", darts_frame(&darts.samples)?),
    ];
    let mut written = Vec::with_capacity(frames.len());
    for (name, df) in frames.iter_mut() {
        let path = out_dir.join(name);
        write_csv(&path, df)?;
        write_sidecar(&path, Payload::new(label, cfg))?;
        tracing::info!(path = %path.display(), rows = df.height(), "exported");
        written.push(path);
    }
    Ok(written)
}

fn vertices_frame(poly: &Polygon) -> PolarsResult<DataFrame> {
    let k: Vec<u64> = (0..poly.len() as u64).collect();
    let x: Vec<f64> = poly.vertices().iter().map(|v| v.x).collect();
    let y: Vec<f64> = poly.vertices().iter().map(|v| v.y).collect();
    df!("k" => k, "x" => x, "y" => y)
}

fn cells_frame(cells: &[CellCoverage]) -> PolarsResult<DataFrame> {
    let i: Vec<u64> = cells.iter().map(|c| c.i as u64).collect();
    let j: Vec<u64> = cells.iter().map(|c| c.j as u64).collect();
    let coverage: Vec<f64> = cells.iter().map(|c| c.coverage).collect();
    let area: Vec<f64> = cells.iter().map(|c| c.area).collect();
    df!("i" => i, "j" => j, "coverage" => coverage, "area" => area)
}

fn darts_frame(samples: &[SamplePoint]) -> PolarsResult<DataFrame> {
    let x: Vec<f64> = samples.iter().map(|s| s.x).collect();
    let y: Vec<f64> = samples.iter().map(|s| s.y).collect();
    let inside: Vec<bool> = samples.iter().map(|s| s.inside).collect();
    df!("x" => x, "y" => y, "inside" => inside)
}

fn write_csv(path: &Path, df: &mut DataFrame) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_three_csvs_with_sidecars() {
        let dir = tempdir().unwrap();
        let cfg = EstimatorCfg {
            grid_resolution: 8,
            samples_per_cell: 4,
            monte_carlo_samples: 500,
            seed: 1,
        };
        let star = shapes::star(5, 4.0, 2.0).unwrap();
        let written = write_plot_inputs(&star, &cfg, dir.path(), "star").unwrap();
        assert_eq!(written.len(), 3);
        for path in &written {
            assert!(path.exists());
            let stem = path.file_stem().unwrap().to_string_lossy().to_string();
            assert!(dir.path().join(format!("{stem}.provenance.json")).exists());
        }

        let cells = std::fs::read_to_string(dir.path().join("cells.csv")).unwrap();
        assert_eq!(cells.lines().next().unwrap(), "i,j,coverage,area");
        assert_eq!(cells.lines().count(), 1 + 64);

        let darts = std::fs::read_to_string(dir.path().join("darts.csv")).unwrap();
        assert_eq!(darts.lines().count(), 1 + 500);

        let verts = std::fs::read_to_string(dir.path().join("vertices.csv")).unwrap();
        assert_eq!(verts.lines().count(), 1 + 10);
        assert!(verts.lines().nth(1).unwrap().starts_with("0,4"));
    }

    #[test]
    fn cell_indices_keep_full_width() {
        let cells = [CellCoverage {
            i: 3,
            j: 5_000_000_000,
            coverage: 0.5,
            area: 0.25,
        }];
        let df = cells_frame(&cells).unwrap();
        assert_eq!(df.column("j").unwrap().dtype(), &DataType::UInt64);
        assert_eq!(df.column("j").unwrap().u64().unwrap().get(0), Some(5_000_000_000));
    }
}
