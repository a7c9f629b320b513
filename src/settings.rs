//! ## Report Settings
//!
//! Input locations, the output directory for charts, and the sizes of the console previews.
//! The defaults reproduce the fixed file names the report is run against.

use crate::schema::TaxiVariant;
use std::path::PathBuf;

/// Where the report reads its inputs from and how much of each result it shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    pub yellow_trips: PathBuf,
    pub green_trips: PathBuf,
    pub zone_lookup: PathBuf,
    /// Directory that receives the chart images.
    pub output_dir: PathBuf,
    /// Number of pickup zones listed by the busiest zones query.
    pub top_zones: usize,
    /// Row limit of the crowded places previews.
    pub preview_rows: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            yellow_trips: PathBuf::from("yellow_tripdata_2021-03.parquet"),
            green_trips: PathBuf::from("green_tripdata_2021-03.parquet"),
            zone_lookup: PathBuf::from("taxi+_zone_lookup.csv"),
            output_dir: PathBuf::from("."),
            top_zones: 5,
            preview_rows: 10,
        }
    }
}

impl ReportSettings {
    /// The parquet file holding the trips of `variant`.
    pub fn trips_path(&self, variant: TaxiVariant) -> &PathBuf {
        match variant {
            TaxiVariant::Yellow => &self.yellow_trips,
            TaxiVariant::Green => &self.green_trips,
        }
    }
}
