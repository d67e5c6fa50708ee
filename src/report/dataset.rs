use std::num::NonZeroUsize;

use serde::Serialize;

use crate::data::series::RunSample;
use crate::processing::gaussian;

/// One labeled curve within a chart.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub values: Vec<f64>,
}

/// Renderer-agnostic chart description.
///
/// `x` holds the axis labels; each series is paired to the axis by position,
/// and values past the end of the axis are not drawn. Nothing in here knows
/// about any plotting backend.
#[derive(Debug, Clone, Serialize)]
pub struct ChartDataset {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub x: Vec<f64>,
    pub series: Vec<ChartSeries>,
    /// Translucent fill under each curve.
    pub filled: bool,
    /// Dot markers on each plotted point.
    pub markers: bool,
}

/// The three charts making up one run's page.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub title: String,
    pub file_stem: String,
    pub charts: Vec<ChartDataset>,
}

/// Compose the raw, time-averaged, and fitted-normal datasets for a run.
pub fn assemble(sample: &RunSample, cluster_size: NonZeroUsize) -> RunReport {
    RunReport {
        title: format!("{} Run {}", sample.category.label(), sample.run_number),
        file_stem: format!("{}_run_{}", sample.category.prefix(), sample.run_number),
        charts: vec![
            raw_chart(sample),
            averaged_chart(sample, cluster_size),
            fitted_chart(sample),
        ],
    }
}

fn raw_chart(sample: &RunSample) -> ChartDataset {
    ChartDataset {
        title: "Raw Data".to_string(),
        x_desc: "Time(ms)".to_string(),
        y_desc: "Current(pA)".to_string(),
        x: sample.deflected.raw.x.clone(),
        series: vec![
            ChartSeries {
                label: "Deflected".to_string(),
                values: sample.deflected.raw.y.clone(),
            },
            ChartSeries {
                label: "Undeflected".to_string(),
                values: sample.undeflected.raw.y.clone(),
            },
        ],
        filled: false,
        markers: false,
    }
}

fn averaged_chart(sample: &RunSample, cluster_size: NonZeroUsize) -> ChartDataset {
    let deflected = &sample.deflected.averaged;
    let undeflected = &sample.undeflected.averaged;

    // Shared axis from the shorter series, so no axis point is left without a
    // value on one side. Alignment is by position, not by timestamp.
    let x = if deflected.len() <= undeflected.len() {
        deflected.x.clone()
    } else {
        undeflected.x.clone()
    };

    ChartDataset {
        title: format!("Time Averaged Data (n= {cluster_size})"),
        x_desc: "Time(ms)".to_string(),
        y_desc: "Current(pA)".to_string(),
        x,
        series: vec![
            ChartSeries {
                label: "Deflected".to_string(),
                values: deflected.y.clone(),
            },
            ChartSeries {
                label: "Undeflected".to_string(),
                values: undeflected.y.clone(),
            },
        ],
        filled: false,
        markers: true,
    }
}

fn fitted_chart(sample: &RunSample) -> ChartDataset {
    let xs = gaussian::fitted_domain(
        &sample.deflected.fit,
        &sample.undeflected.fit,
        sample.category.fit_samples(),
    );

    let deflected: Vec<f64> = xs.iter().map(|&x| sample.deflected.fit.density(x)).collect();
    let undeflected: Vec<f64> = xs
        .iter()
        .map(|&x| sample.undeflected.fit.density(x))
        .collect();

    ChartDataset {
        title: "Norm Distribution of Deflected and Undeflected".to_string(),
        x_desc: "Current(pA)".to_string(),
        y_desc: String::new(),
        // Curves are evaluated on the exact domain; only the axis labels are
        // rounded for display.
        x: xs.iter().map(|&x| round_to(x, 3)).collect(),
        series: vec![
            ChartSeries {
                label: "Deflected".to_string(),
                values: deflected,
            },
            ChartSeries {
                label: "Undeflected".to_string(),
                values: undeflected,
            },
        ],
        filled: true,
        markers: false,
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}
