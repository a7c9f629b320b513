//! ## Single-trip rankings
//!
//! - **most_expensive_route:** the trip with the highest `fare_amount`.
//! - **longest_trip:** the trip with the highest `trip_distance`.
//!
//! Both return `None` for an empty dataset. When several trips share the maximum the one
//! returned is whichever the engine ranks first.

use super::{f64_value, map_rows, scalar_at, string_value};
use crate::exceptions::{TaxiReportError, TaxiReportResult};
use crate::schema::{EnrichedColumn, TripColumn};
use datafusion::arrow::datatypes::DataType;
use datafusion::logical_expr::ident;
use datafusion::prelude::*;

/// A single trip reduced to its zones and the value it was ranked by.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRecord {
    pub pickup_zone: Option<String>,
    pub dropoff_zone: Option<String>,
    pub value: f64,
}

async fn top_route_by(df: &DataFrame, column: TripColumn) -> TaxiReportResult<Option<RouteRecord>> {
    let name = column.name();
    let pickup = EnrichedColumn::PickupZone.name();
    let dropoff = EnrichedColumn::DropoffZone.name();
    let batches = df
        .clone()
        .filter(ident(name).is_not_null())?
        .sort(vec![ident(name).sort(false, false)])?
        .limit(0, Some(1))?
        .select(vec![
            ident(pickup),
            ident(dropoff),
            cast(ident(name), DataType::Float64).alias(name),
        ])?
        .collect()
        .await?;

    let routes = map_rows(&batches, |batch, row| {
        let value = f64_value(scalar_at(batch, name, row)?).ok_or_else(|| {
            TaxiReportError::InvalidParameter(format!("Column '{}' has no numeric value", name))
        })?;
        Ok(RouteRecord {
            pickup_zone: string_value(scalar_at(batch, pickup, row)?),
            dropoff_zone: string_value(scalar_at(batch, dropoff, row)?),
            value,
        })
    })?;
    Ok(routes.into_iter().next())
}

/// The route of the trip with the highest fare.
pub async fn most_expensive_route(df: &DataFrame) -> TaxiReportResult<Option<RouteRecord>> {
    top_route_by(df, TripColumn::FareAmount).await
}

/// The route of the trip with the longest distance.
pub async fn longest_trip(df: &DataFrame) -> TaxiReportResult<Option<RouteRecord>> {
    top_route_by(df, TripColumn::TripDistance).await
}
