use std::f64::consts::PI;

use serde::Serialize;

use crate::data::series::RawSeries;
use crate::error::PipelineError;

/// Mean and population standard deviation of a raw series.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GaussianParams {
    pub mean: f64,
    pub sigma: f64,
}

impl GaussianParams {
    /// Population moments: the variance divides by N, not N-1.
    pub fn estimate(raw: &RawSeries) -> Result<Self, PipelineError> {
        if raw.is_empty() {
            return Err(PipelineError::DegenerateStatistics);
        }

        let count = raw.len() as f64;
        let mean = raw.y.iter().sum::<f64>() / count;
        let variance = raw.y.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;

        Ok(Self {
            mean,
            sigma: variance.sqrt(),
        })
    }

    /// Normal probability density at `x`.
    pub fn density(&self, x: f64) -> f64 {
        let z = (x - self.mean) / self.sigma;
        (1.0 / (self.sigma * (2.0 * PI).sqrt())) * (-0.5 * z * z).exp()
    }
}

/// Evaluation domain shared by both fitted curves: from the lowest
/// `mean - 4*sigma` to the highest `mean + 4*sigma`, stepped by
/// `(upper - lower) / samples`.
///
/// The step accumulates in floating point, so the last point can land past
/// `upper` by less than one step; that approximate-inclusive endpoint is kept
/// as-is. A zero-width domain collapses to the single lower bound.
pub fn fitted_domain(
    deflected: &GaussianParams,
    undeflected: &GaussianParams,
    samples: usize,
) -> Vec<f64> {
    let lower = (deflected.mean - 4.0 * deflected.sigma)
        .min(undeflected.mean - 4.0 * undeflected.sigma);
    let upper = (deflected.mean + 4.0 * deflected.sigma)
        .max(undeflected.mean + 4.0 * undeflected.sigma);

    let step = (upper - lower) / samples as f64;
    if step <= 0.0 || !step.is_finite() {
        return vec![lower];
    }

    let mut xs = Vec::with_capacity(samples + 1);
    let mut x = lower;
    while x <= upper {
        xs.push(x);
        x += step;
    }
    xs
}
