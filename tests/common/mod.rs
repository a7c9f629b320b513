#![allow(dead_code)]

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray, TimestampMicrosecondArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef, TimeUnit};
use arrow::record_batch::RecordBatch;
use datafusion::datasource::MemTable;
use datafusion::prelude::{DataFrame, SessionContext};
use taxi_report::schema::{TaxiVariant, TimestampColumns};

/// 2021-03-01T00:00:00Z in seconds.
pub const MARCH_FIRST_2021: i64 = 1_614_556_800;

pub const NEWARK_AIRPORT: i64 = 1;
pub const ALPHABET_CITY: i64 = 4;
pub const JFK_AIRPORT: i64 = 132;
pub const LAGUARDIA_AIRPORT: i64 = 138;
pub const MIDTOWN_CENTER: i64 = 161;
pub const UPPER_EAST_SIDE_SOUTH: i64 = 237;
/// A location identifier absent from the lookup.
pub const UNKNOWN_LOCATION: i64 = 999;

/// (LocationID, Borough, Zone)
pub const ZONES: [(i64, &str, &str); 6] = [
    (NEWARK_AIRPORT, "EWR", "Newark Airport"),
    (ALPHABET_CITY, "Manhattan", "Alphabet City"),
    (JFK_AIRPORT, "Queens", "JFK Airport"),
    (LAGUARDIA_AIRPORT, "Queens", "LaGuardia Airport"),
    (MIDTOWN_CENTER, "Manhattan", "Midtown Center"),
    (UPPER_EAST_SIDE_SOUTH, "Manhattan", "Upper East Side South"),
];

/// One trip of a test dataset. Hours count from midnight of 2021-03-01, so hour 24 is
/// midnight of the next day.
#[derive(Debug, Clone)]
pub struct TripRow {
    pub pu_location: i64,
    pub do_location: i64,
    pub pickup_hour: Option<i64>,
    pub dropoff_hour: Option<i64>,
    pub passenger_count: Option<f64>,
    pub trip_distance: Option<f64>,
    pub fare_amount: Option<f64>,
    pub total_amount: Option<f64>,
    pub tip_amount: Option<f64>,
}

impl TripRow {
    /// A valid trip at 08:05 with one passenger, a $1 tip and a total of fare + 2.
    pub fn new(pu_location: i64, do_location: i64, fare: f64, distance: f64) -> Self {
        Self {
            pu_location,
            do_location,
            pickup_hour: Some(8),
            dropoff_hour: Some(8),
            passenger_count: Some(1.0),
            trip_distance: Some(distance),
            fare_amount: Some(fare),
            total_amount: Some(fare + 2.0),
            tip_amount: Some(1.0),
        }
    }

    pub fn hours(mut self, pickup: i64, dropoff: i64) -> Self {
        self.pickup_hour = Some(pickup);
        self.dropoff_hour = Some(dropoff);
        self
    }

    pub fn passengers(mut self, count: Option<f64>) -> Self {
        self.passenger_count = count;
        self
    }

    pub fn total(mut self, total: Option<f64>) -> Self {
        self.total_amount = total;
        self
    }

    pub fn tip(mut self, tip: f64) -> Self {
        self.tip_amount = Some(tip);
        self
    }
}

fn timestamp_micros(hour: Option<i64>) -> Option<i64> {
    hour.map(|h| (MARCH_FIRST_2021 + h * 3600 + 300) * 1_000_000)
}

pub fn trip_schema(timestamps: &TimestampColumns) -> SchemaRef {
    let ts_type = DataType::Timestamp(TimeUnit::Microsecond, None);
    Arc::new(Schema::new(vec![
        Field::new(&timestamps.pickup, ts_type.clone(), true),
        Field::new(&timestamps.dropoff, ts_type, true),
        Field::new("passenger_count", DataType::Float64, true),
        Field::new("trip_distance", DataType::Float64, true),
        Field::new("PULocationID", DataType::Int64, true),
        Field::new("DOLocationID", DataType::Int64, true),
        Field::new("fare_amount", DataType::Float64, true),
        Field::new("tip_amount", DataType::Float64, true),
        Field::new("total_amount", DataType::Float64, true),
    ]))
}

pub fn trip_batch(rows: &[TripRow], timestamps: &TimestampColumns) -> RecordBatch {
    let columns: Vec<ArrayRef> = vec![
        Arc::new(TimestampMicrosecondArray::from(
            rows.iter().map(|r| timestamp_micros(r.pickup_hour)).collect::<Vec<_>>(),
        )),
        Arc::new(TimestampMicrosecondArray::from(
            rows.iter().map(|r| timestamp_micros(r.dropoff_hour)).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(rows.iter().map(|r| r.passenger_count).collect::<Vec<_>>())),
        Arc::new(Float64Array::from(rows.iter().map(|r| r.trip_distance).collect::<Vec<_>>())),
        Arc::new(Int64Array::from(rows.iter().map(|r| r.pu_location).collect::<Vec<_>>())),
        Arc::new(Int64Array::from(rows.iter().map(|r| r.do_location).collect::<Vec<_>>())),
        Arc::new(Float64Array::from(rows.iter().map(|r| r.fare_amount).collect::<Vec<_>>())),
        Arc::new(Float64Array::from(rows.iter().map(|r| r.tip_amount).collect::<Vec<_>>())),
        Arc::new(Float64Array::from(rows.iter().map(|r| r.total_amount).collect::<Vec<_>>())),
    ];
    RecordBatch::try_new(trip_schema(timestamps), columns).unwrap()
}

/// A yellow-taxi trip DataFrame backed by an in-memory table.
pub fn trips_df(ctx: &SessionContext, rows: &[TripRow]) -> DataFrame {
    trips_df_with(ctx, rows, &TaxiVariant::Yellow.timestamps())
}

pub fn trips_df_with(
    ctx: &SessionContext,
    rows: &[TripRow],
    timestamps: &TimestampColumns,
) -> DataFrame {
    let batch = trip_batch(rows, timestamps);
    let mem_table = MemTable::try_new(batch.schema(), vec![vec![batch]]).unwrap();
    ctx.read_table(Arc::new(mem_table)).unwrap()
}

pub fn lookup_batch(zones: &[(i64, &str, &str)]) -> RecordBatch {
    let schema = Arc::new(Schema::new(vec![
        Field::new("LocationID", DataType::Int64, false),
        Field::new("Borough", DataType::Utf8, true),
        Field::new("Zone", DataType::Utf8, true),
        Field::new("service_zone", DataType::Utf8, true),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(zones.iter().map(|z| z.0).collect::<Vec<_>>())),
        Arc::new(StringArray::from(zones.iter().map(|z| z.1).collect::<Vec<_>>())),
        Arc::new(StringArray::from(zones.iter().map(|z| z.2).collect::<Vec<_>>())),
        Arc::new(StringArray::from(vec!["Yellow Zone"; zones.len()])),
    ];
    RecordBatch::try_new(schema, columns).unwrap()
}

pub fn lookup_df_from(ctx: &SessionContext, zones: &[(i64, &str, &str)]) -> DataFrame {
    let batch = lookup_batch(zones);
    let mem_table = MemTable::try_new(batch.schema(), vec![vec![batch]]).unwrap();
    ctx.read_table(Arc::new(mem_table)).unwrap()
}

/// The lookup built from [`ZONES`].
pub fn lookup_df(ctx: &SessionContext) -> DataFrame {
    lookup_df_from(ctx, &ZONES)
}

/// All values of a column across batches, as strings.
pub fn string_column(batches: &[RecordBatch], name: &str) -> Vec<Option<String>> {
    let mut values = Vec::new();
    for batch in batches {
        let column = batch.column(batch.schema().index_of(name).unwrap());
        let column = cast(column, &DataType::Utf8).unwrap();
        let array = column.as_any().downcast_ref::<StringArray>().unwrap();
        values.extend(array.iter().map(|v| v.map(str::to_string)));
    }
    values
}

/// All values of a column across batches, as f64.
pub fn f64_column(batches: &[RecordBatch], name: &str) -> Vec<Option<f64>> {
    let mut values = Vec::new();
    for batch in batches {
        let column = batch.column(batch.schema().index_of(name).unwrap());
        let column = cast(column, &DataType::Float64).unwrap();
        let array = column.as_any().downcast_ref::<Float64Array>().unwrap();
        values.extend(array.iter());
    }
    values
}
