//! Error taxonomy shared by polygon construction and the sampling engines.
//!
//! A degenerate bounding box is deliberately absent: the engines report it as
//! a zero-area estimate with a diagnostics flag instead of failing.

use thiserror::Error;

/// Errors surfaced before any estimator runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AreaError {
    /// Fewer than three vertices, or a non-finite coordinate.
    #[error("invalid polygon: {reason}")]
    InvalidPolygon { reason: String },
    /// Zero sample count, zero resolution, or zero samples per cell.
    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: String },
}

impl AreaError {
    pub(crate) fn invalid_polygon(reason: impl Into<String>) -> Self {
        Self::InvalidPolygon {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_param(reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AreaError>;
