//! ## Loading the report inputs
//!
//! Trip datasets are read from parquet and the zone lookup from a CSV file with a header row
//! and inferred column types. Both go through the caller's `SessionContext` and are validated
//! against the typed schema before they are handed to the rest of the report.

use crate::exceptions::{TaxiReportError, TaxiReportResult};
use crate::schema::{validate_lookup_schema, validate_trip_schema, TimestampColumns};
use datafusion::prelude::*;
use std::path::Path;
use tracing::debug;

fn path_str(path: &Path) -> TaxiReportResult<&str> {
    path.to_str().ok_or_else(|| {
        TaxiReportError::InvalidParameter(format!(
            "Path {} is not valid UTF-8",
            path.display()
        ))
    })
}

/// Loads one trip dataset and checks it carries the trip columns and the given timestamps.
pub async fn load_trips(
    ctx: &SessionContext,
    path: impl AsRef<Path>,
    timestamps: &TimestampColumns,
) -> TaxiReportResult<DataFrame> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading trip parquet");
    let df = ctx
        .read_parquet(path_str(path)?, ParquetReadOptions::default())
        .await?;
    validate_trip_schema(&df, timestamps)?;
    Ok(df)
}

/// Loads the zone lookup table.
pub async fn load_zone_lookup(
    ctx: &SessionContext,
    path: impl AsRef<Path>,
) -> TaxiReportResult<DataFrame> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading zone lookup csv");
    let options = CsvReadOptions::new().has_header(true);
    let df = ctx.read_csv(path_str(path)?, options).await?;
    validate_lookup_schema(&df)?;
    Ok(df)
}
