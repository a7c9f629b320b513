//! ## Custom Errors for the Taxi Report
//!
//! This module defines the error type shared by every stage of the report.
//! It uses the `thiserror` crate to derive the `Error` trait.
//! The `TaxiReportError` enum covers failures of the engine (DataFusion, Arrow, Parquet),
//! schema problems detected at load time, and chart rendering failures.
//!
//! The `TaxiReportResult` type alias is returned by all fallible operations of the crate.
//!
//! ### Example
//!
//! ```rust
//! use taxi_report::exceptions::{TaxiReportError, TaxiReportResult};
//!
//! fn check_zone_column() -> TaxiReportResult<()> {
//!     Err(TaxiReportError::MissingColumn("Zone".into()))
//! }
//! ```

use thiserror::Error;

/// Errors raised while loading, transforming, aggregating, or rendering taxi trip data.
#[derive(Debug, Error)]
pub enum TaxiReportError {
    /// Wraps underlying I/O errors.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Wraps errors from DataFusion.
    #[error("DataFusion error: {0}")]
    DataFusionError(#[from] datafusion::error::DataFusionError),

    /// Wraps errors from Arrow.
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Wraps errors from Parquet.
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// An invalid parameter or an unexpected column type.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A required column is absent from a loaded table.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Drawing or encoding a chart failed.
    #[error("Chart error: {0}")]
    ChartError(String),

    /// A named pipeline step failed.
    #[error("Step '{step}' failed: {source}")]
    StepFailed {
        step: String,
        #[source]
        source: Box<TaxiReportError>,
    },
}

/// A convenient result type for taxi report operations.
pub type TaxiReportResult<T> = std::result::Result<T, TaxiReportError>;
