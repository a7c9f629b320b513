//! ## Hourly pickup and drop-off counts
//!
//! Counts trips per hour of day, once by pickup time and once by drop-off time.
//! A trip without a timestamp lands in a null hour, which sorts before hour 0, so the
//! pickup counts always add up to the number of trips.

use super::{hour_of, i32_value, i64_value, map_rows, row_count, scalar_at, HOUR};
use crate::exceptions::TaxiReportResult;
use crate::schema::TimestampColumns;
use datafusion::logical_expr::ident;
use datafusion::prelude::*;

pub const PICKUP_COUNT: &str = "Pickup_Count";
pub const DROPOFF_COUNT: &str = "Dropoff_Count";

/// Number of trips in one hour of the day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourlyCount {
    pub hour: Option<i32>,
    pub count: i64,
}

/// Trips per hour, by pickup and by drop-off, both in ascending hour order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HourlyCounts {
    pub pickups: Vec<HourlyCount>,
    pub dropoffs: Vec<HourlyCount>,
}

impl HourlyCounts {
    pub fn total_pickups(&self) -> i64 {
        self.pickups.iter().map(|h| h.count).sum()
    }

    pub fn total_dropoffs(&self) -> i64 {
        self.dropoffs.iter().map(|h| h.count).sum()
    }
}

async fn counts_by_hour(
    df: &DataFrame,
    timestamp: &str,
    count_name: &str,
) -> TaxiReportResult<Vec<HourlyCount>> {
    let batches = df
        .clone()
        .aggregate(
            vec![hour_of(timestamp).alias(HOUR)],
            vec![row_count().alias(count_name)],
        )?
        .sort(vec![ident(HOUR).sort(true, true)])?
        .collect()
        .await?;

    map_rows(&batches, |batch, row| {
        Ok(HourlyCount {
            hour: i32_value(scalar_at(batch, HOUR, row)?),
            count: i64_value(scalar_at(batch, count_name, row)?).unwrap_or(0),
        })
    })
}

/// Hourly pickup and drop-off counts using the caller's timestamp columns.
pub async fn hourly_pickup_dropoff_counts(
    df: &DataFrame,
    timestamps: &TimestampColumns,
) -> TaxiReportResult<HourlyCounts> {
    Ok(HourlyCounts {
        pickups: counts_by_hour(df, &timestamps.pickup, PICKUP_COUNT).await?,
        dropoffs: counts_by_hour(df, &timestamps.dropoff, DROPOFF_COUNT).await?,
    })
}
