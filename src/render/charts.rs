//! ## Charts
//!
//! - **plot_hourly_counts:** line chart of pickups and drop-offs per hour of day.
//! - **plot_correlations:** bar chart of the tip correlation coefficients.
//!
//! Both write a PNG image to the given path. Hours without a value and undefined
//! coefficients are left out of the drawing.

use crate::analysis::correlations::TipCorrelations;
use crate::analysis::hourly::{HourlyCount, HourlyCounts};
use crate::exceptions::{TaxiReportError, TaxiReportResult};
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;
use tracing::info;

const HOURLY_CHART_SIZE: (u32, u32) = (1200, 600);
const CORRELATION_CHART_SIZE: (u32, u32) = (1000, 600);
const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);

fn chart_error<E: std::fmt::Display>(err: E) -> TaxiReportError {
    TaxiReportError::ChartError(err.to_string())
}

/// (hour, count) points of the rows that have an hour.
pub fn hourly_points(rows: &[HourlyCount]) -> Vec<(i32, i64)> {
    rows.iter()
        .filter_map(|r| r.hour.map(|hour| (hour, r.count)))
        .collect()
}

/// Upper bound of the count axis: the largest count plus 10% headroom, at least 1.
pub fn hourly_axis_max(counts: &HourlyCounts) -> i64 {
    let max = counts
        .pickups
        .iter()
        .chain(&counts.dropoffs)
        .map(|r| r.count)
        .max()
        .unwrap_or(0);
    (max + (max + 9) / 10).max(1)
}

/// Value range of the correlation axis. Always contains zero and every defined coefficient.
pub fn correlation_axis_range(correlations: &TipCorrelations) -> Range<f64> {
    let (low, high) = correlations
        .iter()
        .filter_map(|(_, value)| *value)
        .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let pad = ((high - low) * 0.1).max(0.05);
    (low - pad)..(high + pad)
}

/// Draws pickups and drop-offs per hour (0 to 23) and saves the chart to `output_path`.
pub fn plot_hourly_counts(
    counts: &HourlyCounts,
    title: &str,
    output_path: &Path,
) -> TaxiReportResult<()> {
    let root = BitMapBackend::new(output_path, HOURLY_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(0i32..23i32, 0i64..hourly_axis_max(counts))
        .map_err(chart_error)?;
    chart
        .configure_mesh()
        .x_labels(24)
        .x_desc("Hour")
        .y_desc("Count")
        .draw()
        .map_err(chart_error)?;

    let series = [
        ("Pickup", hourly_points(&counts.pickups), BLUE),
        ("Drop-off", hourly_points(&counts.dropoffs), RED),
    ];
    for (label, points, color) in series {
        chart
            .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))
            .map_err(chart_error)?
            .label(label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
        chart
            .draw_series(points.into_iter().map(|p| Circle::new(p, 4, color.filled())))
            .map_err(chart_error)?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(chart_error)?;
    root.present().map_err(chart_error)?;
    info!(path = %output_path.display(), "wrote hourly counts chart");
    Ok(())
}

/// Draws one bar per correlation coefficient and saves the chart to `output_path`.
pub fn plot_correlations(
    correlations: &TipCorrelations,
    title: &str,
    output_path: &Path,
) -> TaxiReportResult<()> {
    let labels: Vec<&str> = correlations.iter().map(|(column, _)| column.name()).collect();
    let root = BitMapBackend::new(output_path, CORRELATION_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(
            (0i32..labels.len() as i32).into_segmented(),
            correlation_axis_range(correlations),
        )
        .map_err(chart_error)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|value: &SegmentValue<i32>| match value {
            SegmentValue::CenterOf(i) => labels
                .get(*i as usize)
                .map(|label| label.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .y_desc("Correlation")
        .draw()
        .map_err(chart_error)?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(SKY_BLUE.filled())
                .margin(20)
                .data(
                    correlations
                        .iter()
                        .enumerate()
                        .filter_map(|(i, (_, value))| value.map(|v| (i as i32, v))),
                ),
        )
        .map_err(chart_error)?;

    root.present().map_err(chart_error)?;
    info!(path = %output_path.display(), "wrote tip correlation chart");
    Ok(())
}
