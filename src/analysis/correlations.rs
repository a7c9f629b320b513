//! ## Tip correlations
//!
//! Pearson correlation of `tip_amount` with other numeric trip columns, computed by the
//! engine in a single aggregation. A coefficient is reported as `None` when either column
//! has zero or undefined variance (fewer than two values), since the correlation is then
//! undefined.

use super::{f64_value, scalar_at};
use crate::exceptions::TaxiReportResult;
use crate::schema::TripColumn;
use datafusion::arrow::datatypes::DataType;
use datafusion::functions_aggregate::expr_fn::{corr, stddev};
use datafusion::logical_expr::{ident, Expr};
use datafusion::prelude::*;

/// Columns whose correlation with the tip is reported.
pub const TIP_CORRELATION_COLUMNS: [TripColumn; 4] = [
    TripColumn::TripDistance,
    TripColumn::FareAmount,
    TripColumn::TotalAmount,
    TripColumn::PassengerCount,
];

const TIP_STDDEV: &str = "tip_stddev";

/// Correlation coefficients with `tip_amount`, in the order they were requested.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TipCorrelations {
    entries: Vec<(TripColumn, Option<f64>)>,
}

impl TipCorrelations {
    pub fn new(entries: Vec<(TripColumn, Option<f64>)>) -> Self {
        Self { entries }
    }

    /// The coefficient for a column, `None` if it was not computed or is undefined.
    pub fn get(&self, column: TripColumn) -> Option<f64> {
        self.entries
            .iter()
            .find(|(c, _)| *c == column)
            .and_then(|(_, value)| *value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(TripColumn, Option<f64>)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn as_f64(column: TripColumn) -> Expr {
    cast(ident(column.name()), DataType::Float64)
}

fn has_variance(stddev: Option<f64>) -> bool {
    matches!(stddev, Some(s) if s.is_finite() && s > 0.0)
}

/// Correlation of `tip_amount` with each of `columns`.
pub async fn correlate_with_tip(
    df: &DataFrame,
    columns: &[TripColumn],
) -> TaxiReportResult<TipCorrelations> {
    let tip = as_f64(TripColumn::TipAmount);
    let mut aggregates = vec![stddev(tip.clone()).alias(TIP_STDDEV)];
    for (i, column) in columns.iter().enumerate() {
        aggregates.push(corr(tip.clone(), as_f64(*column)).alias(format!("corr_{}", i)));
        aggregates.push(stddev(as_f64(*column)).alias(format!("stddev_{}", i)));
    }

    let batches = df.clone().aggregate(vec![], aggregates)?.collect().await?;
    let Some(batch) = batches.iter().find(|b| b.num_rows() > 0) else {
        return Ok(TipCorrelations::new(
            columns.iter().map(|c| (*c, None)).collect(),
        ));
    };

    let tip_varies = has_variance(f64_value(scalar_at(batch, TIP_STDDEV, 0)?));
    let mut entries = Vec::with_capacity(columns.len());
    for (i, column) in columns.iter().enumerate() {
        let column_varies = has_variance(f64_value(scalar_at(batch, &format!("stddev_{}", i), 0)?));
        let coefficient = f64_value(scalar_at(batch, &format!("corr_{}", i), 0)?)
            .filter(|c| c.is_finite() && tip_varies && column_varies);
        entries.push((*column, coefficient));
    }
    Ok(TipCorrelations::new(entries))
}

/// Correlation of `tip_amount` with trip distance, fare, total amount and passenger count.
pub async fn tip_correlations(df: &DataFrame) -> TaxiReportResult<TipCorrelations> {
    correlate_with_tip(df, &TIP_CORRELATION_COLUMNS).await
}
