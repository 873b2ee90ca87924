use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use curvearea::prelude::*;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod export;
mod input;
mod provenance;
mod report;

#[derive(Parser)]
#[command(name = "curvearea")]
#[command(about = "Polygon area: exact vs grid quadrature vs Monte Carlo")]
struct Cmd {
    /// Log level for stderr output (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Compare all three estimators on one polygon
    Compare {
        #[command(flatten)]
        shape: ShapeArgs,
        #[command(flatten)]
        est: EstimatorArgs,
        /// Also write the comparison as JSON (plus provenance sidecar)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Grid estimate at several resolutions
    Sweep {
        #[command(flatten)]
        shape: ShapeArgs,
        #[arg(long, value_delimiter = ',', default_values_t = [25usize, 50, 100, 150])]
        resolutions: Vec<usize>,
        #[arg(long, default_value_t = 16)]
        samples_per_cell: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Write plotting inputs (vertices, cell coverage, darts) as CSV
    Export {
        #[command(flatten)]
        shape: ShapeArgs,
        #[command(flatten)]
        est: EstimatorArgs,
        #[arg(long)]
        out_dir: PathBuf,
    },
    /// Run the reference shapes with their demo parameters
    Demo {
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Shape {
    Triangle,
    Pentagon,
    Star,
}

impl Shape {
    fn build(self) -> Result<Polygon> {
        Ok(match self {
            Shape::Triangle => shapes::triangle(),
            Shape::Pentagon => shapes::regular_polygon(5, 3.0)?,
            Shape::Star => shapes::star(5, 4.0, 2.0)?,
        })
    }
}

#[derive(Args)]
struct ShapeArgs {
    /// Built-in reference shape
    #[arg(long, value_enum, default_value_t = Shape::Star)]
    shape: Shape,
    /// Vertex file (`.json` as [[x, y], ...] or `.csv` with x,y columns); overrides --shape
    #[arg(long)]
    input: Option<PathBuf>,
}

impl ShapeArgs {
    fn polygon(&self) -> Result<Polygon> {
        match &self.input {
            Some(path) => input::read_polygon(path),
            None => self.shape.build(),
        }
    }

    fn label(&self) -> String {
        match &self.input {
            Some(path) => path.display().to_string(),
            None => format!("{:?}", self.shape).to_lowercase(),
        }
    }
}

/// Defaults, then `--config` JSON, then explicit flags.
#[derive(Args)]
struct EstimatorArgs {
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    grid_resolution: Option<usize>,
    #[arg(long)]
    samples_per_cell: Option<usize>,
    #[arg(long)]
    mc_samples: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
}

impl EstimatorArgs {
    fn resolve(&self) -> Result<EstimatorCfg> {
        let mut cfg = match &self.config {
            Some(path) => load_cfg(path)?,
            None => EstimatorCfg::default(),
        };
        if let Some(v) = self.grid_resolution {
            cfg.grid_resolution = v;
        }
        if let Some(v) = self.samples_per_cell {
            cfg.samples_per_cell = v;
        }
        if let Some(v) = self.mc_samples {
            cfg.monte_carlo_samples = v;
        }
        if let Some(v) = self.seed {
            cfg.seed = v;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn load_cfg(path: &Path) -> Result<EstimatorCfg> {
    let raw =
        std::fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_slice(&raw).with_context(|| format!("parsing config {}", path.display()))
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(cmd.log_level)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::Compare { shape, est, out } => run_compare(&shape, &est, out.as_deref()),
        Action::Sweep {
            shape,
            resolutions,
            samples_per_cell,
            seed,
        } => sweep(&shape, &resolutions, samples_per_cell, seed),
        Action::Export {
            shape,
            est,
            out_dir,
        } => run_export(&shape, &est, &out_dir),
        Action::Demo { seed } => demo(seed),
    }
}

fn run_compare(shape: &ShapeArgs, est: &EstimatorArgs, out: Option<&Path>) -> Result<()> {
    let poly = shape.polygon()?;
    let cfg = est.resolve()?;
    tracing::info!(shape = %shape.label(), vertices = poly.len(), cfg = ?cfg, "compare");
    let cmp = compare(&poly, &cfg)?;
    print!("{}", report::comparison(&shape.label(), &cmp));
    if let Some(out) = out {
        provenance::ensure_parent(out)?;
        std::fs::write(out, serde_json::to_vec_pretty(&cmp)?)
            .with_context(|| format!("writing {}", out.display()))?;
        let payload = provenance::Payload::new(&shape.label(), &cfg);
        let prov = provenance::write_sidecar(out, payload)?;
        tracing::info!(out = %out.display(), provenance = %prov.display(), "wrote comparison");
    }
    Ok(())
}

fn sweep(shape: &ShapeArgs, resolutions: &[usize], samples_per_cell: usize, seed: u64) -> Result<()> {
    let poly = shape.polygon()?;
    let exact = exact_area(&poly);
    let rows = report::sweep_rows(&poly, resolutions, samples_per_cell, seed)?;
    print!("{}", report::sweep(&shape.label(), exact, &rows));
    Ok(())
}

fn run_export(shape: &ShapeArgs, est: &EstimatorArgs, out_dir: &Path) -> Result<()> {
    let poly = shape.polygon()?;
    let cfg = est.resolve()?;
    let written = export::write_plot_inputs(&poly, &cfg, out_dir, &shape.label())?;
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

fn demo(seed: u64) -> Result<()> {
    let runs = [
        (Shape::Triangle, 50, 16, 50_000),
        (Shape::Pentagon, 100, 25, 100_000),
        (Shape::Star, 150, 25, 150_000),
    ];
    for (shape, grid_resolution, samples_per_cell, monte_carlo_samples) in runs {
        let cfg = EstimatorCfg {
            grid_resolution,
            samples_per_cell,
            monte_carlo_samples,
            seed,
        };
        let label = format!("{shape:?}").to_lowercase();
        let cmp = compare(&shape.build()?, &cfg)?;
        println!("{}", "=".repeat(72));
        print!("{}", report::comparison(&label, &cmp));
    }
    let star = Shape::Star.build()?;
    let rows = report::sweep_rows(&star, &[25, 50, 100, 150, 200], 16, seed)?;
    println!("{}", "=".repeat(72));
    print!("{}", report::sweep("star", exact_area(&star), &rows));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn est_args(argv: &[&str]) -> EstimatorArgs {
        let mut full = vec!["curvearea", "compare"];
        full.extend_from_slice(argv);
        match Cmd::try_parse_from(full).unwrap().action {
            Action::Compare { est, .. } => est,
            _ => unreachable!(),
        }
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(&path, r#"{"grid_resolution": 150, "monte_carlo_samples": 5000}"#).unwrap();
        let cfg = est_args(&["--config", path.to_str().unwrap(), "--mc-samples", "777"])
            .resolve()
            .unwrap();
        assert_eq!(cfg.grid_resolution, 150);
        assert_eq!(cfg.monte_carlo_samples, 777);
        assert_eq!(cfg.samples_per_cell, 16);
    }

    #[test]
    fn zero_parameters_rejected() {
        assert!(est_args(&["--grid-resolution", "0"]).resolve().is_err());
        assert!(est_args(&["--samples-per-cell", "0"]).resolve().is_err());
        assert!(est_args(&["--mc-samples", "0"]).resolve().is_err());
    }

    #[test]
    fn sweep_parses_resolution_list() {
        let cmd = Cmd::try_parse_from(["curvearea", "sweep", "--resolutions", "10,20"]).unwrap();
        match cmd.action {
            Action::Sweep { resolutions, .. } => assert_eq!(resolutions, vec![10, 20]),
            _ => panic!("expected sweep"),
        }
    }

    #[test]
    fn compare_writes_json_and_sidecar() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("cmp.json");
        let shape = ShapeArgs {
            shape: Shape::Triangle,
            input: None,
        };
        let est = est_args(&["--grid-resolution", "10", "--mc-samples", "1000"]);
        run_compare(&shape, &est, Some(&out)).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(parsed["vertices"], 3);
        assert!(dir.path().join("cmp.provenance.json").exists());
    }
}
