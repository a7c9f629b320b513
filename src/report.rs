//! ## Report driver
//!
//! Runs the fixed report: the zone lookup is loaded once, then the yellow and the green
//! datasets are each loaded, enriched, cleaned, aggregated, printed and charted in turn.
//! Any failure ends the run.

use crate::analysis::correlations::{tip_correlations, TipCorrelations};
use crate::analysis::hourly::{
    hourly_pickup_dropoff_counts, HourlyCounts, DROPOFF_COUNT, PICKUP_COUNT,
};
use crate::analysis::routes::{longest_trip, most_expensive_route, RouteRecord};
use crate::analysis::zones::{
    busiest_pickup_zones, crowded_places_per_hour, CrowdedPlaces, ZoneCount,
};
use crate::exceptions::TaxiReportResult;
use crate::make_pipeline;
use crate::pipeline::Pipeline;
use crate::render::charts::{plot_correlations, plot_hourly_counts};
use crate::render::console::{
    format_correlations, format_hourly_counts, format_hourly_zone_counts,
    format_longest_trip, format_most_expensive_route, format_zone_counts,
};
use crate::schema::{EnrichedColumn, TaxiVariant, TimestampColumns};
use crate::settings::ReportSettings;
use crate::sources::{load_trips, load_zone_lookup};
use crate::transformers::cleaning::TripCleaner;
use crate::transformers::enrichment::ZoneLookupJoin;
use datafusion::prelude::*;
use std::path::PathBuf;
use tracing::info;

/// Hours in a day; the hourly count tables are never cut.
const HOURS_PER_DAY: usize = 24;

/// Every aggregate computed for one dataset.
#[derive(Debug, Clone)]
pub struct DatasetReport {
    pub variant: TaxiVariant,
    pub cleaned_trips: usize,
    pub most_expensive_route: Option<RouteRecord>,
    pub busiest_zones: Vec<ZoneCount>,
    pub longest_trip: Option<RouteRecord>,
    pub crowded_places: CrowdedPlaces,
    pub hourly_counts: HourlyCounts,
    pub tip_correlations: TipCorrelations,
}

/// The zone lookup join followed by the cleaner.
pub fn preparation_pipeline(lookup: &DataFrame) -> Pipeline {
    make_pipeline!(
        false,
        ("zone_lookup", ZoneLookupJoin::new(lookup.clone())),
        ("cleaning", TripCleaner::new()),
    )
}

/// Enriches and cleans a raw trip dataset. Nothing is executed yet.
pub async fn prepare_trips(raw: &DataFrame, lookup: &DataFrame) -> TaxiReportResult<DataFrame> {
    preparation_pipeline(lookup).fit_transform(raw).await
}

/// Runs every aggregation over a cleaned dataset.
pub async fn analyze_dataset(
    variant: TaxiVariant,
    cleaned: &DataFrame,
    timestamps: &TimestampColumns,
    settings: &ReportSettings,
) -> TaxiReportResult<DatasetReport> {
    let cleaned_trips = cleaned.clone().count().await?;
    info!(dataset = variant.label(), cleaned_trips, "analyzing dataset");

    Ok(DatasetReport {
        variant,
        cleaned_trips,
        most_expensive_route: most_expensive_route(cleaned).await?,
        busiest_zones: busiest_pickup_zones(cleaned, settings.top_zones).await?,
        longest_trip: longest_trip(cleaned).await?,
        crowded_places: crowded_places_per_hour(cleaned, timestamps).await?,
        hourly_counts: hourly_pickup_dropoff_counts(cleaned, timestamps).await?,
        tip_correlations: tip_correlations(cleaned).await?,
    })
}

fn chart_path(settings: &ReportSettings, file_name: String) -> PathBuf {
    settings.output_dir.join(file_name)
}

/// Prints every result of `report` and writes its two charts to the output directory.
pub fn render_dataset(report: &DatasetReport, settings: &ReportSettings) -> TaxiReportResult<()> {
    let label = report.variant.label();
    let crowded = &report.crowded_places;
    let hourly = &report.hourly_counts;

    println!("{} Most Expensive Route:", label);
    println!("{}", format_most_expensive_route(report.most_expensive_route.as_ref()));

    println!("{} Top {} Busiest Pickup Zones:", label, settings.top_zones);
    println!("{}", format_zone_counts(&report.busiest_zones, settings.top_zones));

    println!("{} Longest Trip:", label);
    println!("{}", format_longest_trip(report.longest_trip.as_ref()));

    println!("{} Most Crowded Pickup Zones Per Hour:", label);
    println!(
        "{}",
        format_hourly_zone_counts(
            &crowded.pickups,
            EnrichedColumn::PickupZone.name(),
            settings.preview_rows
        )
    );
    println!("{} Most Crowded Drop-off Zones Per Hour:", label);
    println!(
        "{}",
        format_hourly_zone_counts(
            &crowded.dropoffs,
            EnrichedColumn::DropoffZone.name(),
            settings.preview_rows
        )
    );
    println!("{} Busiest Pickup Zone Of Each Hour:", label);
    println!(
        "{}",
        format_hourly_zone_counts(
            crowded.peak_pickups(),
            EnrichedColumn::PickupZone.name(),
            HOURS_PER_DAY + 1
        )
    );
    println!("{} Busiest Drop-off Zone Of Each Hour:", label);
    println!(
        "{}",
        format_hourly_zone_counts(
            crowded.peak_dropoffs(),
            EnrichedColumn::DropoffZone.name(),
            HOURS_PER_DAY + 1
        )
    );

    println!("{} Hourly Pickup and Drop-off Counts:", label);
    println!("{}", format_hourly_counts(&hourly.pickups, PICKUP_COUNT, HOURS_PER_DAY + 1));
    println!("{}", format_hourly_counts(&hourly.dropoffs, DROPOFF_COUNT, HOURS_PER_DAY + 1));
    plot_hourly_counts(
        hourly,
        &format!("{} Hourly Counts", label),
        &chart_path(settings, report.variant.hourly_chart_file()),
    )?;

    println!("{} Tip Correlations:", label);
    println!("Correlations with tip_amount:");
    println!("{}", format_correlations(&report.tip_correlations));
    plot_correlations(
        &report.tip_correlations,
        &format!("{} Tip Correlations", label),
        &chart_path(settings, report.variant.correlation_chart_file()),
    )?;
    Ok(())
}

/// Runs the whole report against the inputs named in `settings`.
pub async fn run(ctx: &SessionContext, settings: &ReportSettings) -> TaxiReportResult<()> {
    let lookup = load_zone_lookup(ctx, &settings.zone_lookup).await?;
    for variant in TaxiVariant::ALL {
        let timestamps = variant.timestamps();
        let raw = load_trips(ctx, settings.trips_path(variant), &timestamps).await?;
        let cleaned = prepare_trips(&raw, &lookup).await?;
        let report = analyze_dataset(variant, &cleaned, &timestamps, settings).await?;
        render_dataset(&report, settings)?;
    }
    info!("report complete");
    Ok(())
}
