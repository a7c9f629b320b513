//! ## Console output
//!
//! Single results become one line of text; tabular results become a bordered table limited
//! to a fixed number of rows. Missing values are shown as `null`.

use crate::analysis::correlations::TipCorrelations;
use crate::analysis::hourly::HourlyCount;
use crate::analysis::routes::RouteRecord;
use crate::analysis::zones::{HourlyZoneCount, ZoneCount};
use crate::analysis::{COUNT, HOUR};
use std::fmt::Display;

const NULL: &str = "null";

fn or_null<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| NULL.to_string(), |v| v.to_string())
}

fn zone_or_null(zone: &Option<String>) -> &str {
    zone.as_deref().unwrap_or(NULL)
}

/// Renders rows as a bordered table with right-aligned cells.
///
/// At most `limit` rows are shown; a footer notes how many were kept when rows are cut.
pub fn format_table(headers: &[&str], rows: &[Vec<String>], limit: usize) -> String {
    let shown = &rows[..rows.len().min(limit)];
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            shown
                .iter()
                .filter_map(|row| row.get(i).map(|cell| cell.chars().count()))
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let border = widths.iter().fold(String::from("+"), |mut line, width| {
        line.push_str(&"-".repeat(*width));
        line.push('+');
        line
    });
    let format_row = |cells: Vec<&str>| {
        let mut line = String::from("|");
        for (cell, width) in cells.iter().zip(&widths) {
            line.push_str(&format!("{:>width$}|", cell, width = *width));
        }
        line
    };

    let mut lines = vec![border.clone(), format_row(headers.to_vec()), border.clone()];
    for row in shown {
        lines.push(format_row(row.iter().map(String::as_str).collect()));
    }
    lines.push(border);
    if rows.len() > shown.len() {
        lines.push(format!("only showing top {} rows", shown.len()));
    }
    lines.join("\n")
}

/// `Most Expensive Route: <pickup> to <dropoff> - $<fare>`.
pub fn format_most_expensive_route(route: Option<&RouteRecord>) -> String {
    match route {
        Some(r) => format!(
            "Most Expensive Route: {} to {} - ${:.2}",
            zone_or_null(&r.pickup_zone),
            zone_or_null(&r.dropoff_zone),
            r.value
        ),
        None => "Most Expensive Route: no trips".to_string(),
    }
}

/// `Longest Trip: <pickup> to <dropoff> - <distance> miles`.
pub fn format_longest_trip(route: Option<&RouteRecord>) -> String {
    match route {
        Some(r) => format!(
            "Longest Trip: {} to {} - {:.2} miles",
            zone_or_null(&r.pickup_zone),
            zone_or_null(&r.dropoff_zone),
            r.value
        ),
        None => "Longest Trip: no trips".to_string(),
    }
}

pub fn format_zone_counts(zones: &[ZoneCount], limit: usize) -> String {
    let rows: Vec<Vec<String>> = zones
        .iter()
        .map(|z| vec![zone_or_null(&z.zone).to_string(), z.count.to_string()])
        .collect();
    format_table(&["PU_Zone", COUNT], &rows, limit)
}

/// `zone_header` is `PU_Zone` or `DO_Zone`, matching the side the rows were grouped on.
pub fn format_hourly_zone_counts<'a>(
    rows: impl IntoIterator<Item = &'a HourlyZoneCount>,
    zone_header: &str,
    limit: usize,
) -> String {
    let rows: Vec<Vec<String>> = rows
        .into_iter()
        .map(|r| {
            vec![
                or_null(r.hour),
                zone_or_null(&r.zone).to_string(),
                r.count.to_string(),
            ]
        })
        .collect();
    format_table(&[HOUR, zone_header, COUNT], &rows, limit)
}

pub fn format_hourly_counts(counts: &[HourlyCount], count_header: &str, limit: usize) -> String {
    let rows: Vec<Vec<String>> = counts
        .iter()
        .map(|c| vec![or_null(c.hour), c.count.to_string()])
        .collect();
    format_table(&[HOUR, count_header], &rows, limit)
}

/// One `column: coefficient` line per entry.
pub fn format_correlations(correlations: &TipCorrelations) -> String {
    correlations
        .iter()
        .map(|(column, value)| format!("{}: {}", column, or_null(*value)))
        .collect::<Vec<_>>()
        .join("\n")
}
