//! Monte Carlo area estimate (uniform darts in the bounding box).
//!
//! `area = (inside / n_samples) × bbox.area`. Unbiased; the standard error
//! shrinks like `1/√n_samples`.
//!
//! Streams
//! - One master seed is drawn from the caller's RNG. Samples are cut into
//!   fixed-size chunks and chunk `k` draws from its own `StdRng`, seeded by
//!   SplitMix64-mixing `(master, k)`. Chunks run on the rayon pool.
//! - Inside counts are integers, so the estimate is identical for any pool
//!   size and reproducible from the caller's seed.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{AreaError, Result};
use crate::estimate::{
    AreaEstimate, Diagnostics, Method, MonteCarloDiagnostics, Params, SamplePoint,
};
use crate::inclusion::is_inside;
use crate::polygon::{BoundingBox, Polygon};

/// Samples per independent RNG stream.
pub const CHUNK_SIZE: usize = 8192;

/// Monte Carlo engine parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonteCarloParams {
    pub n_samples: usize,
}

impl Default for MonteCarloParams {
    fn default() -> Self {
        Self { n_samples: 100_000 }
    }
}

impl MonteCarloParams {
    pub fn new(n_samples: usize) -> Self {
        Self { n_samples }
    }

    pub fn validate(&self) -> Result<()> {
        if self.n_samples == 0 {
            return Err(AreaError::invalid_param("monte carlo needs at least one sample"));
        }
        Ok(())
    }
}

/// Estimate plus the classified darts a plotter needs.
#[derive(Clone, Debug)]
pub struct MonteCarloDetail {
    pub estimate: AreaEstimate,
    /// In draw order. Empty for a degenerate bounding box.
    pub samples: Vec<SamplePoint>,
}

impl MonteCarloDetail {
    pub fn inside(&self) -> impl Iterator<Item = &SamplePoint> {
        self.samples.iter().filter(|s| s.inside)
    }

    pub fn outside(&self) -> impl Iterator<Item = &SamplePoint> {
        self.samples.iter().filter(|s| !s.inside)
    }
}

/// Monte Carlo estimate of the polygon's area.
pub fn monte_carlo_area<R: Rng>(
    polygon: &Polygon,
    params: MonteCarloParams,
    rng: &mut R,
) -> Result<AreaEstimate> {
    run(polygon, params, rng, false).map(|d| d.estimate)
}

/// Like `monte_carlo_area`, also returning every classified dart.
pub fn monte_carlo_area_detailed<R: Rng>(
    polygon: &Polygon,
    params: MonteCarloParams,
    rng: &mut R,
) -> Result<MonteCarloDetail> {
    run(polygon, params, rng, true)
}

fn run<R: Rng>(
    polygon: &Polygon,
    params: MonteCarloParams,
    rng: &mut R,
    keep_samples: bool,
) -> Result<MonteCarloDetail> {
    params.validate()?;
    let start = Instant::now();
    let n = params.n_samples;
    let master: u64 = rng.gen();
    let bbox = *polygon.bbox();

    let mut diag = MonteCarloDiagnostics {
        n_samples: n,
        inside_count: 0,
        fraction_inside: 0.0,
        bbox_area: bbox.area(),
        degenerate_bbox: bbox.is_degenerate(),
        elapsed: Default::default(),
    };

    if diag.degenerate_bbox {
        tracing::warn!(
            width = bbox.width(),
            height = bbox.height(),
            "degenerate bounding box, monte carlo estimate is zero"
        );
        diag.elapsed = start.elapsed();
        return Ok(MonteCarloDetail {
            estimate: finish(0.0, params, diag),
            samples: Vec::new(),
        });
    }

    let n_chunks = n.div_ceil(CHUNK_SIZE);
    let chunks: Vec<(usize, Vec<SamplePoint>)> = (0..n_chunks)
        .into_par_iter()
        .map(|k| {
            let len = CHUNK_SIZE.min(n - k * CHUNK_SIZE);
            let mut stream = chunk_rng(master, k as u64);
            draw_chunk(polygon, &bbox, len, &mut stream, keep_samples)
        })
        .collect();

    let mut inside = 0usize;
    let mut samples = Vec::with_capacity(if keep_samples { n } else { 0 });
    for (count, pts) in chunks {
        inside += count;
        samples.extend(pts);
    }

    let fraction = inside as f64 / n as f64;
    let area = fraction * diag.bbox_area;
    diag.inside_count = inside;
    diag.fraction_inside = fraction;
    diag.elapsed = start.elapsed();
    tracing::debug!(
        area,
        n_samples = n,
        inside,
        fraction,
        elapsed_ms = diag.elapsed.as_secs_f64() * 1e3,
        "monte carlo estimate"
    );
    Ok(MonteCarloDetail {
        estimate: finish(area, params, diag),
        samples,
    })
}

fn draw_chunk(
    polygon: &Polygon,
    bbox: &BoundingBox,
    len: usize,
    rng: &mut StdRng,
    keep: bool,
) -> (usize, Vec<SamplePoint>) {
    let (w, h) = (bbox.width(), bbox.height());
    let mut inside = 0;
    let mut pts = Vec::with_capacity(if keep { len } else { 0 });
    for _ in 0..len {
        let x = bbox.min_x + rng.gen::<f64>() * w;
        let y = bbox.min_y + rng.gen::<f64>() * h;
        let hit = is_inside(polygon, x, y);
        inside += usize::from(hit);
        if keep {
            pts.push(SamplePoint { x, y, inside: hit });
        }
    }
    (inside, pts)
}

fn finish(area: f64, params: MonteCarloParams, diag: MonteCarloDiagnostics) -> AreaEstimate {
    AreaEstimate {
        area,
        method: Method::MonteCarlo,
        params: Params::MonteCarlo(params),
        diagnostics: Diagnostics::MonteCarlo(diag),
    }
}

/// Independent stream for chunk `k` (SplitMix64-style mixing).
fn chunk_rng(master: u64, k: u64) -> StdRng {
    fn mix(mut x: u64) -> u64 {
        x ^= x >> 30;
        x = x.wrapping_mul(0xbf58476d1ce4e5b9);
        x ^= x >> 27;
        x = x.wrapping_mul(0x94d049bb133111eb);
        x ^ (x >> 31)
    }
    StdRng::seed_from_u64(mix(master ^ mix(k.wrapping_add(0x9e3779b97f4a7c15))))
}
