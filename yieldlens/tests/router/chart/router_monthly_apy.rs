use std::sync::Arc;

use chrono::{TimeZone, Utc};
use yieldlens::{ChartPoint, Dashboard, MonthKey, YieldError};

use crate::helpers::{MockConnector, dt, sample};

fn dashboard_with(points: Vec<ChartPoint>) -> Dashboard {
    Dashboard::builder()
        .with_connector(MockConnector::builder().returns_chart_ok(points).build())
        .build()
        .unwrap()
}

#[tokio::test]
async fn sparse_history_is_filled_by_nearest_sample() {
    let d = dashboard_with(vec![
        sample(2024, 6, 1, 6.0),
        sample(2024, 1, 1, 1.0),
        sample(2024, 3, 15, 3.0),
    ]);
    let now = Utc.with_ymd_and_hms(2024, 6, 20, 12, 0, 0).unwrap();
    let series = d.monthly_apy_at("pool-1", 6, now).await.unwrap();

    let labels: Vec<&str> = series.iter().map(|p| p.month.as_str()).collect();
    assert_eq!(labels, ["Jan 24", "Feb 24", "Mar 24", "Apr 24", "May 24", "Jun 24"]);
    let apys: Vec<f64> = series.iter().filter_map(|p| p.metrics.apy).collect();
    assert_eq!(apys, [1.0, 1.0, 3.0, 3.0, 6.0, 6.0]);
    assert_eq!(series[2].period, MonthKey::new(2024, 3).unwrap());
    assert_eq!(series[2].timestamp, dt(2024, 3, 15).timestamp());
}

#[tokio::test]
async fn configured_length_applies_to_monthly_apy() {
    let d = Dashboard::builder()
        .with_connector(Arc::new(yieldlens_mock::MockConnector::new()))
        .months(6)
        .build()
        .unwrap();
    let series = d.monthly_apy("sample-aave").await.unwrap();
    assert_eq!(series.len(), 6);
    assert!(series.windows(2).all(|w| w[0].period < w[1].period));
    let this_month = Utc::now();
    let last = series.last().unwrap().period;
    assert_eq!(
        (last.year, last.month),
        (
            chrono::Datelike::year(&this_month),
            chrono::Datelike::month(&this_month)
        )
    );

    let twelve = d.monthly_apy_with("sample-aave", 12).await.unwrap();
    assert_eq!(twelve.len(), 12);
}

#[tokio::test]
async fn empty_history_is_empty_series() {
    let d = dashboard_with(vec![]);
    assert!(d.monthly_apy("pool-1").await.unwrap().is_empty());
}

#[tokio::test]
async fn zero_months_is_invalid() {
    let d = dashboard_with(vec![sample(2024, 1, 1, 1.0)]);
    assert!(matches!(
        d.monthly_apy_with("pool-1", 0).await,
        Err(YieldError::InvalidArg(_))
    ));
}

#[tokio::test]
async fn oversized_months_is_invalid() {
    let d = dashboard_with(vec![sample(2024, 1, 1, 1.0)]);
    let now = Utc.with_ymd_and_hms(2024, 6, 20, 12, 0, 0).unwrap();
    assert!(matches!(
        d.monthly_apy_at("pool-1", usize::MAX, now).await,
        Err(YieldError::InvalidArg(_))
    ));
    assert!(matches!(
        d.monthly_apy_with("pool-1", yieldlens::MAX_MONTH_COUNT + 1).await,
        Err(YieldError::InvalidArg(_))
    ));
}

#[tokio::test]
async fn unknown_pool_is_not_found() {
    let d = Dashboard::builder()
        .with_connector(Arc::new(yieldlens_mock::MockConnector::new()))
        .build()
        .unwrap();
    assert_eq!(
        d.monthly_apy("nope").await.unwrap_err(),
        YieldError::not_found("chart for pool nope")
    );
}

#[tokio::test]
async fn month_boundaries_follow_timezone_of_now() {
    // 03:00 UTC on Mar 1 is still Feb 29 in New York.
    let d = dashboard_with(vec![
        ChartPoint::with_apy("2024-03-01T03:00:00Z", 2.0),
        sample(2024, 3, 20, 3.0),
    ]);
    let ny = chrono_tz::America::New_York;
    let now = ny.with_ymd_and_hms(2024, 3, 25, 12, 0, 0).unwrap();
    let series = d.monthly_apy_at("pool-1", 2, now).await.unwrap();
    let got: Vec<(String, Option<f64>)> = series
        .iter()
        .map(|p| (p.month.clone(), p.metrics.apy))
        .collect();
    assert_eq!(
        got,
        vec![("Feb 24".to_string(), Some(2.0)), ("Mar 24".to_string(), Some(3.0))]
    );

    let utc_now = Utc.with_ymd_and_hms(2024, 3, 25, 12, 0, 0).unwrap();
    let series = d.monthly_apy_at("pool-1", 1, utc_now).await.unwrap();
    assert_eq!(series[0].metrics.apy, Some(2.0));
}

#[test]
fn timezone_is_recorded_in_config() {
    let d = Dashboard::builder()
        .with_connector(Arc::new(yieldlens_mock::MockConnector::new()))
        .chart_timezone(chrono_tz::Europe::Berlin)
        .build()
        .unwrap();
    assert_eq!(d.config().chart_timezone, Some(chrono_tz::Europe::Berlin));
    assert_eq!(d.config().months, 12);
}
