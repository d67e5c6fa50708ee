use serde::Serialize;

use crate::data::series::{PolaritySample, RunSample};
use crate::error::PipelineError;

/// Machine-readable companion to a run's chart page.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub category: String,
    pub run_number: u32,
    pub cluster_size: usize,
    pub deflected: PolaritySummary,
    pub undeflected: PolaritySummary,
}

#[derive(Debug, Serialize)]
pub struct PolaritySummary {
    pub samples: usize,
    pub averaged_points: usize,
    pub mean: f64,
    pub sigma: f64,
}

impl From<&PolaritySample> for PolaritySummary {
    fn from(sample: &PolaritySample) -> Self {
        Self {
            samples: sample.raw.len(),
            averaged_points: sample.averaged.len(),
            mean: sample.fit.mean,
            sigma: sample.fit.sigma,
        }
    }
}

impl RunSummary {
    pub fn from_sample(sample: &RunSample, cluster_size: usize) -> Self {
        Self {
            category: sample.category.prefix().to_string(),
            run_number: sample.run_number,
            cluster_size,
            deflected: PolaritySummary::from(&sample.deflected),
            undeflected: PolaritySummary::from(&sample.undeflected),
        }
    }

    pub fn to_json(&self) -> Result<String, PipelineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
