//! # Trip Aggregations
//!
//! Read-only queries over a cleaned, zone-enriched trip dataset. Each query builds a logical
//! plan on a clone of the input, collects it, and converts the resulting batches into typed
//! rows. The input DataFrame is never modified.

pub mod correlations;
pub mod hourly;
pub mod routes;
pub mod zones;

use crate::exceptions::TaxiReportResult;
use datafusion::arrow::datatypes::DataType;
use datafusion::arrow::record_batch::RecordBatch;
use datafusion::functions_aggregate::expr_fn::count;
use datafusion::logical_expr::{ident, lit, Expr};
use datafusion::prelude::*;
use datafusion::scalar::ScalarValue;
use datafusion_functions::datetime::date_part;

/// Name of the hour-of-day column produced by the hourly queries.
pub const HOUR: &str = "Hour";

/// Name of the row count column produced by the grouped queries.
pub const COUNT: &str = "count";

/// Integer hour of day (0 to 23) of a timestamp column.
pub(crate) fn hour_of(column: &str) -> Expr {
    cast(
        date_part().call(vec![lit("hour"), ident(column)]),
        DataType::Int32,
    )
}

/// Number of rows in a group, nulls included.
pub(crate) fn row_count() -> Expr {
    count(lit(1i64))
}

/// Reads the value at `row` of the named column.
pub(crate) fn scalar_at(
    batch: &RecordBatch,
    name: &str,
    row: usize,
) -> TaxiReportResult<ScalarValue> {
    let index = batch.schema().index_of(name)?;
    Ok(ScalarValue::try_from_array(batch.column(index), row)?)
}

pub(crate) fn string_value(scalar: ScalarValue) -> Option<String> {
    match scalar {
        ScalarValue::Utf8(v) | ScalarValue::LargeUtf8(v) | ScalarValue::Utf8View(v) => v,
        _ => None,
    }
}

pub(crate) fn f64_value(scalar: ScalarValue) -> Option<f64> {
    match scalar {
        ScalarValue::Float64(v) => v,
        ScalarValue::Float32(v) => v.map(f64::from),
        ScalarValue::Int64(v) => v.map(|x| x as f64),
        ScalarValue::Int32(v) => v.map(f64::from),
        _ => None,
    }
}

pub(crate) fn i64_value(scalar: ScalarValue) -> Option<i64> {
    match scalar {
        ScalarValue::Int64(v) => v,
        ScalarValue::Int32(v) => v.map(i64::from),
        ScalarValue::UInt64(v) => v.and_then(|x| i64::try_from(x).ok()),
        ScalarValue::UInt32(v) => v.map(i64::from),
        _ => None,
    }
}

pub(crate) fn i32_value(scalar: ScalarValue) -> Option<i32> {
    match scalar {
        ScalarValue::Int32(v) => v,
        ScalarValue::Int64(v) => v.and_then(|x| i32::try_from(x).ok()),
        _ => None,
    }
}

/// Converts every row of the collected batches with `f`, keeping batch order.
pub(crate) fn map_rows<T>(
    batches: &[RecordBatch],
    mut f: impl FnMut(&RecordBatch, usize) -> TaxiReportResult<T>,
) -> TaxiReportResult<Vec<T>> {
    let mut out = Vec::with_capacity(batches.iter().map(|b| b.num_rows()).sum());
    for batch in batches {
        for row in 0..batch.num_rows() {
            out.push(f(batch, row)?);
        }
    }
    Ok(out)
}
