// Expects the trip parquet files and `taxi+_zone_lookup.csv` in the working directory.
// Set DEBUG_TAXI_REPORT=true to see debug logs.

use datafusion::prelude::SessionContext;
use taxi_report::exceptions::TaxiReportResult;
use taxi_report::report;
use taxi_report::settings::ReportSettings;

#[tokio::main]
async fn main() -> TaxiReportResult<()> {
    let ctx = SessionContext::new();
    report::run(&ctx, &ReportSettings::default()).await
}
