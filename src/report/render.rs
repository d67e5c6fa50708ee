use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::PipelineError;
use crate::report::dataset::ChartDataset;

/// Fixed series colors, applied in dataset order.
const SERIES_COLORS: [RGBColor; 6] = [
    RGBColor(255, 0, 0),
    RGBColor(0, 0, 255),
    RGBColor(0, 128, 0),
    RGBColor(255, 165, 0),
    RGBColor(128, 0, 128),
    RGBColor(165, 42, 42),
];

fn color_for_index(index: usize) -> RGBColor {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

/// Render one chart dataset to a standalone SVG document.
pub fn render_svg(
    dataset: &ChartDataset,
    width: u32,
    height: u32,
) -> Result<String, PipelineError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        draw(&root, dataset)?;
        root.present().map_err(render_err)?;
    }
    Ok(svg)
}

/// Draw a dataset onto a drawing area.
///
/// Series are paired to the axis by position, like the labeled axis of the
/// report pages this grew from: point j of every series sits at axis slot j,
/// and values past the end of the axis are dropped.
fn draw(root: &DrawingArea<SVGBackend, Shift>, dataset: &ChartDataset) -> Result<(), PipelineError> {
    root.fill(&WHITE).map_err(render_err)?;

    let slots = dataset.x.len();
    let x_max = slots.saturating_sub(1).max(1) as f64;
    let (y_min, y_max) = value_range(dataset);

    let mut chart = ChartBuilder::on(root)
        .caption(&dataset.title, ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x_max, y_min..y_max)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc(dataset.x_desc.as_str())
        .y_desc(dataset.y_desc.as_str())
        .x_label_formatter(&|position: &f64| {
            let slot = position.round();
            if slot < 0.0 {
                return String::new();
            }
            dataset
                .x
                .get(slot as usize)
                .map(|&label| format_label(label))
                .unwrap_or_default()
        })
        .draw()
        .map_err(render_err)?;

    for (index, series) in dataset.series.iter().enumerate() {
        let color = color_for_index(index);
        let points: Vec<(f64, f64)> = series
            .values
            .iter()
            .take(slots)
            .enumerate()
            .map(|(slot, &value)| (slot as f64, value))
            .collect();

        if dataset.filled {
            chart
                .draw_series(AreaSeries::new(points.iter().copied(), 0.0, color.mix(0.2)))
                .map_err(render_err)?;
        }

        chart
            .draw_series(LineSeries::new(points.iter().copied(), &color))
            .map_err(render_err)?
            .label(series.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], color));

        if dataset.markers {
            chart
                .draw_series(
                    points
                        .iter()
                        .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
                )
                .map_err(render_err)?;
        }
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(render_err)?;

    Ok(())
}

/// Y range over every drawn value, padded 5%, with a fallback when the data
/// is flat or absent.
fn value_range(dataset: &ChartDataset) -> (f64, f64) {
    let slots = dataset.x.len();
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for series in &dataset.series {
        for &value in series.values.iter().take(slots) {
            if value.is_finite() {
                min = min.min(value);
                max = max.max(value);
            }
        }
    }

    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }

    let span = max - min;
    let pad = if span > 0.0 { span * 0.05 } else { 1.0 };
    (min - pad, max + pad)
}

fn format_label(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn render_err<E: std::error::Error + Send + Sync>(error: DrawingAreaErrorKind<E>) -> PipelineError {
    PipelineError::Render(error.to_string())
}
