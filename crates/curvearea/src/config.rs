//! Estimator configuration shared by the comparison layer and the driver.
//!
//! Every field has a default, so partial JSON configs are accepted.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grid::GridParams;
use crate::monte_carlo::MonteCarloParams;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorCfg {
    /// Grid cells per axis.
    pub grid_resolution: usize,
    /// Requested grid samples per cell (truncated to a perfect square).
    pub samples_per_cell: usize,
    pub monte_carlo_samples: usize,
    /// Seed for the jitter offsets and the Monte Carlo master stream.
    pub seed: u64,
}

impl Default for EstimatorCfg {
    fn default() -> Self {
        Self {
            grid_resolution: 100,
            samples_per_cell: 16,
            monte_carlo_samples: 100_000,
            seed: 0,
        }
    }
}

impl EstimatorCfg {
    pub fn grid(&self) -> GridParams {
        GridParams::new(self.grid_resolution, self.samples_per_cell)
    }

    pub fn monte_carlo(&self) -> MonteCarloParams {
        MonteCarloParams::new(self.monte_carlo_samples)
    }

    /// Reject all invalid parameters up front, before any estimator runs.
    pub fn validate(&self) -> Result<()> {
        self.grid().validate()?;
        self.monte_carlo().validate()
    }
}
