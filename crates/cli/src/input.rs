//! Vertex file loading: JSON `[[x, y], ...]` or CSV with `x`,`y` columns.

use anyhow::{bail, Context, Result};
use curvearea::Polygon;
use polars::prelude::*;
use std::path::Path;

pub fn read_polygon(path: &Path) -> Result<Polygon> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let pairs = match ext {
        "json" => read_json(path)?,
        "csv" => read_csv(path)?,
        other => bail!("unsupported vertex file extension {other:?} (expected json or csv)"),
    };
    tracing::info!(path = %path.display(), vertices = pairs.len(), "loaded vertices");
    Ok(Polygon::from_pairs(&pairs)?)
}

fn read_json(path: &Path) -> Result<Vec<[f64; 2]>> {
    let raw = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn read_csv(path: &Path) -> Result<Vec<[f64; 2]>> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()?
        .select([col("x").cast(DataType::Float64), col("y").cast(DataType::Float64)])
        .collect()
        .with_context(|| format!("reading x,y columns from {}", path.display()))?;
    let xs = df.column("x")?.f64()?;
    let ys = df.column("y")?.f64()?;
    if xs.null_count() > 0 || ys.null_count() > 0 {
        bail!("{} has empty x or y cells", path.display());
    }
    Ok(xs
        .into_no_null_iter()
        .zip(ys.into_no_null_iter())
        .map(|(x, y)| [x, y])
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use curvearea::exact_area;
    use tempfile::tempdir;

    #[test]
    fn reads_json_pairs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tri.json");
        std::fs::write(&path, "[[0, 0], [1, 0], [0, 1]]").unwrap();
        let p = read_polygon(&path).unwrap();
        assert_eq!(p.len(), 3);
        assert!((exact_area(&p) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn reads_csv_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sq.csv");
        std::fs::write(&path, "x,y\n0,0\n4,0\n4,4\n0,4\n").unwrap();
        let p = read_polygon(&path).unwrap();
        assert_eq!(p.len(), 4);
        assert!((exact_area(&p) - 16.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_short_polygon_and_unknown_ext() {
        let dir = tempdir().unwrap();
        let short = dir.path().join("two.json");
        std::fs::write(&short, "[[0, 0], [1, 0]]").unwrap();
        assert!(read_polygon(&short).is_err());
        let txt = dir.path().join("poly.txt");
        std::fs::write(&txt, "").unwrap();
        assert!(read_polygon(&txt).is_err());
    }
}
