//! ## Zone enrichment
//!
//! [`ZoneLookupJoin`] resolves the pickup and drop-off location identifiers of every trip
//! into zone and borough names. It performs two left-outer joins against the same lookup
//! table, once aliased for the pickup side (`PU_*`) and once for the drop-off side (`DO_*`),
//! so every trip is kept and unknown identifiers simply get null names.
//!
//! The lookup is not deduplicated: a `LocationID` listed twice fans out the matching trips.

use crate::exceptions::TaxiReportResult;
use crate::schema::{validate_numeric_column, EnrichedColumn, LookupColumn, TripColumn};
use datafusion::arrow::datatypes::DataType;
use datafusion::common::JoinType;
use datafusion::logical_expr::ident;
use datafusion::prelude::*;
use tracing::debug;

/// One side of the lookup join.
struct JoinSide {
    trip_key: TripColumn,
    lookup_key: &'static str,
    zone: EnrichedColumn,
    borough: EnrichedColumn,
}

const PICKUP_SIDE: JoinSide = JoinSide {
    trip_key: TripColumn::PickupLocation,
    lookup_key: "PU_LocationID",
    zone: EnrichedColumn::PickupZone,
    borough: EnrichedColumn::PickupBorough,
};

const DROPOFF_SIDE: JoinSide = JoinSide {
    trip_key: TripColumn::DropoffLocation,
    lookup_key: "DO_LocationID",
    zone: EnrichedColumn::DropoffZone,
    borough: EnrichedColumn::DropoffBorough,
};

/// Adds `PU_Zone`, `PU_Borough`, `DO_Zone` and `DO_Borough` to a trip dataset.
pub struct ZoneLookupJoin {
    lookup: DataFrame,
}

impl ZoneLookupJoin {
    /// Create a join against the given zone lookup table.
    pub fn new(lookup: DataFrame) -> Self {
        Self { lookup }
    }

    /// Stateless; only checks that both location identifiers exist.
    pub async fn fit(&mut self, df: &DataFrame) -> TaxiReportResult<()> {
        validate_numeric_column(df, TripColumn::PickupLocation.name())?;
        validate_numeric_column(df, TripColumn::DropoffLocation.name())
    }

    /// The lookup renamed for one side: key, zone and borough only.
    fn aliased_lookup(&self, side: &JoinSide) -> TaxiReportResult<DataFrame> {
        Ok(self.lookup.clone().select(vec![
            cast(ident(LookupColumn::LocationId.name()), DataType::Int64)
                .alias(side.lookup_key),
            cast(ident(LookupColumn::Zone.name()), DataType::Utf8).alias(side.zone.name()),
            cast(ident(LookupColumn::Borough.name()), DataType::Utf8)
                .alias(side.borough.name()),
        ])?)
    }

    fn join_side(&self, df: DataFrame, side: &JoinSide) -> TaxiReportResult<DataFrame> {
        debug!(key = side.trip_key.name(), "planning zone lookup join");
        let on = ident(side.trip_key.name()).eq(ident(side.lookup_key));
        let joined = df.join_on(self.aliased_lookup(side)?, JoinType::Left, [on])?;
        Ok(joined.drop_columns(&[side.lookup_key])?)
    }

    /// Returns the trips with the four zone/borough columns appended.
    pub fn transform(&self, df: DataFrame) -> TaxiReportResult<DataFrame> {
        let with_pickup = self.join_side(df, &PICKUP_SIDE)?;
        self.join_side(with_pickup, &DROPOFF_SIDE)
    }

    fn inherent_is_stateful(&self) -> bool {
        false
    }
}

crate::impl_transformer!(ZoneLookupJoin);
