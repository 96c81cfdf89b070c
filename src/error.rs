//! Error conditions reported by the estimators.

use thiserror::Error;

/// Structural failures that abort a single query.
///
/// Everything else inside a walk is plain floating-point arithmetic.
#[derive(Copy, Clone, Debug, Error, PartialEq)]
pub enum WosError {
    /// The boundary has no segments, so no finite ball radius exists.
    #[error("domain has no boundary segments")]
    InvalidDomain,
    /// The disk Green's function was evaluated outside `0 < r <= R`.
    ///
    /// The interior sampler never produces such radii; seeing this means the
    /// sampling contract was broken.
    #[error("harmonic kernel evaluated outside 0 < r <= R (R = {radius}, r = {r})")]
    NumericDomain { radius: f32, r: f32 },
    /// Estimator configuration that cannot produce an average.
    #[error("invalid estimator parameters: {reason}")]
    InvalidParams { reason: &'static str },
}
