//! ## Trip cleaning
//!
//! [`TripCleaner`] drops trips whose fare, total, distance or passenger count is not
//! plausible. A row is kept only when all of these hold:
//!
//! - `fare_amount > 0`
//! - `total_amount > 0`
//! - `0 < trip_distance < 1000`
//! - `passenger_count > 0`
//!
//! Null values fail the comparisons, so such rows are dropped as well.
//! No other column is inspected.

use crate::exceptions::TaxiReportResult;
use crate::schema::{validate_numeric_column, TripColumn};
use datafusion::prelude::*;
use datafusion_expr::{ident, lit, Expr};

/// Trips at or above this distance (miles) are treated as recording errors.
pub const MAX_TRIP_DISTANCE: f64 = 1000.0;

/// The validity predicate applied by [`TripCleaner`].
pub fn valid_trip_predicate() -> Expr {
    let positive = |column: TripColumn| ident(column.name()).gt(lit(0.0));
    positive(TripColumn::FareAmount)
        .and(positive(TripColumn::TotalAmount))
        .and(positive(TripColumn::TripDistance))
        .and(ident(TripColumn::TripDistance.name()).lt(lit(MAX_TRIP_DISTANCE)))
        .and(positive(TripColumn::PassengerCount))
}

/// Removes trips with non-positive or out-of-range fare, total, distance or passenger count.
#[derive(Default)]
pub struct TripCleaner;

impl TripCleaner {
    pub fn new() -> Self {
        Self
    }

    /// Stateless; checks that the filtered columns are present and numeric.
    pub async fn fit(&mut self, df: &DataFrame) -> TaxiReportResult<()> {
        for column in [
            TripColumn::FareAmount,
            TripColumn::TotalAmount,
            TripColumn::TripDistance,
            TripColumn::PassengerCount,
        ] {
            validate_numeric_column(df, column.name())?;
        }
        Ok(())
    }

    /// Returns the subset of trips that satisfy [`valid_trip_predicate`].
    pub fn transform(&self, df: DataFrame) -> TaxiReportResult<DataFrame> {
        Ok(df.filter(valid_trip_predicate())?)
    }

    fn inherent_is_stateful(&self) -> bool {
        false
    }
}

crate::impl_transformer!(TripCleaner);
