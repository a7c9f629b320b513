//! ## Zone rankings
//!
//! - **busiest_pickup_zones:** pickup zones ranked by number of trips.
//! - **crowded_places_per_hour:** trips per (hour, zone), computed separately for pickups
//!   and drop-offs, ordered by hour and then by count.
//!
//! Trips whose zone could not be resolved are grouped under a null zone.
//! Equal counts are ordered by zone name.

use super::{
    hour_of, i32_value, i64_value, map_rows, row_count, scalar_at, string_value, COUNT, HOUR,
};
use crate::exceptions::TaxiReportResult;
use crate::schema::{EnrichedColumn, TimestampColumns};
use datafusion::logical_expr::ident;
use datafusion::prelude::*;
use tracing::debug;

/// Number of trips that started in a zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneCount {
    pub zone: Option<String>,
    pub count: i64,
}

/// Number of trips in a zone during one hour of the day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourlyZoneCount {
    pub hour: Option<i32>,
    pub zone: Option<String>,
    pub count: i64,
}

/// Trips per hour and zone, for pickups and drop-offs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrowdedPlaces {
    pub pickups: Vec<HourlyZoneCount>,
    pub dropoffs: Vec<HourlyZoneCount>,
}

impl CrowdedPlaces {
    /// The busiest pickup zone of every hour.
    pub fn peak_pickups(&self) -> Vec<&HourlyZoneCount> {
        peak_per_hour(&self.pickups)
    }

    /// The busiest drop-off zone of every hour.
    pub fn peak_dropoffs(&self) -> Vec<&HourlyZoneCount> {
        peak_per_hour(&self.dropoffs)
    }
}

/// Rows arrive sorted by hour then count, so the first row of each hour is its peak.
fn peak_per_hour(rows: &[HourlyZoneCount]) -> Vec<&HourlyZoneCount> {
    let mut peaks: Vec<&HourlyZoneCount> = Vec::new();
    for row in rows {
        if peaks.last().map_or(true, |last| last.hour != row.hour) {
            peaks.push(row);
        }
    }
    peaks
}

/// The `limit` pickup zones with the most trips, busiest first.
pub async fn busiest_pickup_zones(
    df: &DataFrame,
    limit: usize,
) -> TaxiReportResult<Vec<ZoneCount>> {
    let zone = EnrichedColumn::PickupZone.name();
    let batches = df
        .clone()
        .aggregate(vec![ident(zone)], vec![row_count().alias(COUNT)])?
        .sort(vec![ident(COUNT).sort(false, false), ident(zone).sort(true, true)])?
        .limit(0, Some(limit))?
        .collect()
        .await?;

    map_rows(&batches, |batch, row| {
        Ok(ZoneCount {
            zone: string_value(scalar_at(batch, zone, row)?),
            count: i64_value(scalar_at(batch, COUNT, row)?).unwrap_or(0),
        })
    })
}

async fn crowded_by(
    df: &DataFrame,
    timestamp: &str,
    zone: EnrichedColumn,
) -> TaxiReportResult<Vec<HourlyZoneCount>> {
    let zone = zone.name();
    debug!(timestamp, zone, "planning crowded places query");
    let batches = df
        .clone()
        .aggregate(
            vec![hour_of(timestamp).alias(HOUR), ident(zone)],
            vec![row_count().alias(COUNT)],
        )?
        .sort(vec![
            ident(HOUR).sort(true, true),
            ident(COUNT).sort(false, false),
            ident(zone).sort(true, true),
        ])?
        .collect()
        .await?;

    map_rows(&batches, |batch, row| {
        Ok(HourlyZoneCount {
            hour: i32_value(scalar_at(batch, HOUR, row)?),
            zone: string_value(scalar_at(batch, zone, row)?),
            count: i64_value(scalar_at(batch, COUNT, row)?).unwrap_or(0),
        })
    })
}

/// Trips per hour and zone: pickups use the pickup timestamp and `PU_Zone`,
/// drop-offs the drop-off timestamp and `DO_Zone`.
pub async fn crowded_places_per_hour(
    df: &DataFrame,
    timestamps: &TimestampColumns,
) -> TaxiReportResult<CrowdedPlaces> {
    Ok(CrowdedPlaces {
        pickups: crowded_by(df, &timestamps.pickup, EnrichedColumn::PickupZone).await?,
        dropoffs: crowded_by(df, &timestamps.dropoff, EnrichedColumn::DropoffZone).await?,
    })
}
