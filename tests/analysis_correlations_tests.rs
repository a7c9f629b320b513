mod common;

use approx::assert_abs_diff_eq;
use common::*;
use datafusion::prelude::*;
use taxi_report::analysis::correlations::{
    correlate_with_tip, tip_correlations, TIP_CORRELATION_COLUMNS,
};
use taxi_report::exceptions::TaxiReportResult;
use taxi_report::report::prepare_trips;
use taxi_report::schema::TripColumn;

/// Tips are 20% of the fare, distances shrink as fares grow, and every trip has one passenger.
fn tipped_rows() -> Vec<TripRow> {
    [(10.0, 9.0), (20.0, 7.0), (30.0, 5.0), (40.0, 3.0), (50.0, 1.0)]
        .into_iter()
        .map(|(fare, distance)| {
            TripRow::new(MIDTOWN_CENTER, JFK_AIRPORT, fare, distance).tip(fare * 0.2)
        })
        .collect()
}

#[tokio::test]
async fn test_tip_correlations() -> TaxiReportResult<()> {
    let ctx = SessionContext::new();
    let cleaned = prepare_trips(&trips_df(&ctx, &tipped_rows()), &lookup_df(&ctx)).await?;
    let correlations = tip_correlations(&cleaned).await?;

    let columns: Vec<TripColumn> = correlations.iter().map(|(c, _)| *c).collect();
    assert_eq!(columns, TIP_CORRELATION_COLUMNS.to_vec());

    assert_abs_diff_eq!(correlations.get(TripColumn::FareAmount).unwrap(), 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(correlations.get(TripColumn::TotalAmount).unwrap(), 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(correlations.get(TripColumn::TripDistance).unwrap(), -1.0, epsilon = 1e-9);
    // One passenger on every trip: no variance, no coefficient.
    assert_eq!(correlations.get(TripColumn::PassengerCount), None);
    Ok(())
}

#[tokio::test]
async fn test_tip_correlates_perfectly_with_itself() -> TaxiReportResult<()> {
    let ctx = SessionContext::new();
    let cleaned = prepare_trips(&trips_df(&ctx, &tipped_rows()), &lookup_df(&ctx)).await?;
    let correlations = correlate_with_tip(&cleaned, &[TripColumn::TipAmount]).await?;
    assert_eq!(correlations.len(), 1);
    assert_abs_diff_eq!(correlations.get(TripColumn::TipAmount).unwrap(), 1.0, epsilon = 1e-9);
    Ok(())
}

#[tokio::test]
async fn test_coefficients_stay_within_bounds() -> TaxiReportResult<()> {
    let ctx = SessionContext::new();
    let rows = vec![
        TripRow::new(MIDTOWN_CENTER, JFK_AIRPORT, 12.0, 2.0).tip(3.0).passengers(Some(1.0)),
        TripRow::new(MIDTOWN_CENTER, JFK_AIRPORT, 52.0, 17.0).tip(0.0).passengers(Some(2.0)),
        TripRow::new(MIDTOWN_CENTER, JFK_AIRPORT, 8.0, 1.1).tip(2.5).passengers(Some(1.0)),
        TripRow::new(MIDTOWN_CENTER, JFK_AIRPORT, 25.0, 6.3).tip(5.0).passengers(Some(3.0)),
    ];
    let cleaned = prepare_trips(&trips_df(&ctx, &rows), &lookup_df(&ctx)).await?;
    let correlations = tip_correlations(&cleaned).await?;
    for (column, value) in correlations.iter() {
        let value = value.unwrap_or_else(|| panic!("{} should vary", column));
        assert!((-1.0 - 1e-9..=1.0 + 1e-9).contains(&value));
    }
    Ok(())
}

#[tokio::test]
async fn test_single_trip_has_no_coefficients() -> TaxiReportResult<()> {
    let ctx = SessionContext::new();
    let rows = vec![TripRow::new(MIDTOWN_CENTER, JFK_AIRPORT, 12.0, 2.0).tip(3.0)];
    let cleaned = prepare_trips(&trips_df(&ctx, &rows), &lookup_df(&ctx)).await?;
    let correlations = tip_correlations(&cleaned).await?;
    assert_eq!(correlations.len(), 4);
    assert!(correlations.iter().all(|(_, value)| value.is_none()));
    Ok(())
}
