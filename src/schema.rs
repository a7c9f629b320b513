//! ## Typed Schema
//!
//! Column names of the trip datasets, the zone lookup table, and the enrichment output,
//! expressed as enums so that every query refers to a known column.
//! Loaded tables are checked against these definitions before any aggregation runs.

use crate::exceptions::{TaxiReportError, TaxiReportResult};
use datafusion::arrow::datatypes::DataType;
use datafusion::prelude::*;
use std::fmt;

/// Columns every trip dataset must provide, apart from its timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TripColumn {
    PickupLocation,
    DropoffLocation,
    FareAmount,
    TotalAmount,
    TripDistance,
    PassengerCount,
    TipAmount,
}

impl TripColumn {
    pub const ALL: [TripColumn; 7] = [
        TripColumn::PickupLocation,
        TripColumn::DropoffLocation,
        TripColumn::FareAmount,
        TripColumn::TotalAmount,
        TripColumn::TripDistance,
        TripColumn::PassengerCount,
        TripColumn::TipAmount,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TripColumn::PickupLocation => "PULocationID",
            TripColumn::DropoffLocation => "DOLocationID",
            TripColumn::FareAmount => "fare_amount",
            TripColumn::TotalAmount => "total_amount",
            TripColumn::TripDistance => "trip_distance",
            TripColumn::PassengerCount => "passenger_count",
            TripColumn::TipAmount => "tip_amount",
        }
    }
}

impl fmt::Display for TripColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Columns read from the zone lookup table. Any other column is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupColumn {
    LocationId,
    Zone,
    Borough,
}

impl LookupColumn {
    pub fn name(&self) -> &'static str {
        match self {
            LookupColumn::LocationId => "LocationID",
            LookupColumn::Zone => "Zone",
            LookupColumn::Borough => "Borough",
        }
    }
}

/// Columns added to the trips by the zone lookup join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichedColumn {
    PickupZone,
    PickupBorough,
    DropoffZone,
    DropoffBorough,
}

impl EnrichedColumn {
    pub fn name(&self) -> &'static str {
        match self {
            EnrichedColumn::PickupZone => "PU_Zone",
            EnrichedColumn::PickupBorough => "PU_Borough",
            EnrichedColumn::DropoffZone => "DO_Zone",
            EnrichedColumn::DropoffBorough => "DO_Borough",
        }
    }
}

/// Pickup and drop-off timestamp column names of one dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampColumns {
    pub pickup: String,
    pub dropoff: String,
}

impl TimestampColumns {
    pub fn new(pickup: impl Into<String>, dropoff: impl Into<String>) -> Self {
        Self {
            pickup: pickup.into(),
            dropoff: dropoff.into(),
        }
    }
}

/// The two taxi datasets covered by the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxiVariant {
    Yellow,
    Green,
}

impl TaxiVariant {
    pub const ALL: [TaxiVariant; 2] = [TaxiVariant::Yellow, TaxiVariant::Green];

    /// Human-readable label used in console headings and chart titles.
    pub fn label(&self) -> &'static str {
        match self {
            TaxiVariant::Yellow => "Yellow Taxi",
            TaxiVariant::Green => "Green Taxi",
        }
    }

    /// Yellow cabs record `tpep_*` timestamps, green cabs `lpep_*`.
    pub fn timestamps(&self) -> TimestampColumns {
        match self {
            TaxiVariant::Yellow => {
                TimestampColumns::new("tpep_pickup_datetime", "tpep_dropoff_datetime")
            }
            TaxiVariant::Green => {
                TimestampColumns::new("lpep_pickup_datetime", "lpep_dropoff_datetime")
            }
        }
    }

    fn file_prefix(&self) -> &'static str {
        match self {
            TaxiVariant::Yellow => "yellow_taxi",
            TaxiVariant::Green => "green_taxi",
        }
    }

    pub fn hourly_chart_file(&self) -> String {
        format!("{}_hourly_counts.png", self.file_prefix())
    }

    pub fn correlation_chart_file(&self) -> String {
        format!("{}_tip_correlations.png", self.file_prefix())
    }
}

fn is_numeric(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float16
            | DataType::Float32
            | DataType::Float64
            | DataType::Decimal128(_, _)
            | DataType::Decimal256(_, _)
    )
}

fn field_type<'a>(df: &'a DataFrame, col_name: &str) -> TaxiReportResult<&'a DataType> {
    df.schema()
        .field_with_name(None, col_name)
        .map(|field| field.data_type())
        .map_err(|_| TaxiReportError::MissingColumn(format!("Column '{}' not found", col_name)))
}

/// Checks that a column exists and holds numbers.
pub fn validate_numeric_column(df: &DataFrame, col_name: &str) -> TaxiReportResult<()> {
    match field_type(df, col_name)? {
        dt if is_numeric(dt) => Ok(()),
        dt => Err(TaxiReportError::InvalidParameter(format!(
            "Column '{}' must be numeric, but found {:?}",
            col_name, dt
        ))),
    }
}

/// Checks that a column exists and is of a datetime type (Timestamp, Date32, or Date64).
pub fn validate_datetime_column(df: &DataFrame, col_name: &str) -> TaxiReportResult<()> {
    match field_type(df, col_name)? {
        DataType::Timestamp(_, _) | DataType::Date32 | DataType::Date64 => Ok(()),
        dt => Err(TaxiReportError::InvalidParameter(format!(
            "Column '{}' must be a datetime type (Timestamp, Date32, or Date64), but found {:?}",
            col_name, dt
        ))),
    }
}

/// Validates a raw trip dataset: all trip columns numeric, both timestamps datetime.
pub fn validate_trip_schema(df: &DataFrame, timestamps: &TimestampColumns) -> TaxiReportResult<()> {
    for column in TripColumn::ALL {
        validate_numeric_column(df, column.name())?;
    }
    validate_datetime_column(df, &timestamps.pickup)?;
    validate_datetime_column(df, &timestamps.dropoff)
}

/// Validates the zone lookup table: a numeric `LocationID` plus `Zone` and `Borough`.
pub fn validate_lookup_schema(df: &DataFrame) -> TaxiReportResult<()> {
    validate_numeric_column(df, LookupColumn::LocationId.name())?;
    field_type(df, LookupColumn::Zone.name())?;
    field_type(df, LookupColumn::Borough.name())?;
    Ok(())
}
