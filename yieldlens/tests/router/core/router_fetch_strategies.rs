use std::time::Duration;

use yieldlens::{ChartPoint, Dashboard, FetchStrategy};

use crate::helpers::MockConnector;

fn chart_with_apy(apy: f64) -> Vec<ChartPoint> {
    vec![ChartPoint::with_apy(1_704_067_200_i64, apy)]
}

#[tokio::test]
async fn strategy_latency_returns_fastest_success() {
    let fast_ok = MockConnector::builder()
        .name("fast")
        .delay(Duration::from_millis(10))
        .returns_chart_ok(chart_with_apy(11.0))
        .build();
    let slow_ok = MockConnector::builder()
        .name("slow")
        .delay(Duration::from_millis(100))
        .returns_chart_ok(chart_with_apy(99.0))
        .build();

    let dashboard = Dashboard::builder()
        .with_connector(slow_ok)
        .with_connector(fast_ok)
        .fetch_strategy(FetchStrategy::Latency)
        .build()
        .unwrap();

    let points = dashboard.historical_apy("pool-1").await.unwrap();
    assert_eq!(points[0].metrics.apy, Some(11.0));
}

#[tokio::test]
async fn strategy_latency_ignores_faster_failure_and_returns_first_success() {
    let fast_fail = MockConnector::builder()
        .name("fast_fail")
        .delay(Duration::from_millis(5))
        .with_chart_fn(|_| Err(yieldlens::YieldError::Other("boom".into())))
        .build();
    let slow_ok = MockConnector::builder()
        .name("slow_ok")
        .delay(Duration::from_millis(20))
        .returns_chart_ok(chart_with_apy(77.0))
        .build();

    let dashboard = Dashboard::builder()
        .with_connector(fast_fail)
        .with_connector(slow_ok)
        .fetch_strategy(FetchStrategy::Latency)
        .build()
        .unwrap();

    let points = dashboard.historical_apy("pool-1").await.unwrap();
    assert_eq!(points[0].metrics.apy, Some(77.0));
}

#[tokio::test]
async fn strategy_priority_with_fallback_obeys_order_and_timeout() {
    // First connector answers after the per-provider timeout; second succeeds.
    let very_slow = MockConnector::builder()
        .name("first")
        .delay(Duration::from_millis(200))
        .returns_chart_ok(chart_with_apy(1000.0))
        .build();
    let ok = MockConnector::builder()
        .name("second")
        .delay(Duration::from_millis(10))
        .returns_chart_ok(chart_with_apy(42.0))
        .build();

    let dashboard = Dashboard::builder()
        .with_connector(very_slow)
        .with_connector(ok)
        .fetch_strategy(FetchStrategy::PriorityWithFallback)
        .provider_timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let points = dashboard.historical_apy("pool-1").await.unwrap();
    assert_eq!(points[0].metrics.apy, Some(42.0));
}

#[tokio::test]
async fn priority_stops_at_first_success() {
    let first = MockConnector::builder()
        .name("first")
        .returns_chart_ok(chart_with_apy(1.0))
        .build();
    let second = MockConnector::builder()
        .name("second")
        .returns_chart_ok(chart_with_apy(2.0))
        .build();

    let dashboard = Dashboard::builder()
        .with_connector(first.clone())
        .with_connector(second.clone())
        .build()
        .unwrap();

    let points = dashboard.historical_apy("pool-1").await.unwrap();
    assert_eq!(points[0].metrics.apy, Some(1.0));
    assert_eq!(first.calls(), 1);
    assert_eq!(second.calls(), 0);
}

#[tokio::test]
async fn priority_falls_through_not_found_and_skips_incapable_connectors() {
    let pools_only = MockConnector::builder()
        .name("pools_only")
        .returns_pools_ok(vec![])
        .build();
    let missing = MockConnector::builder()
        .name("missing")
        .with_chart_fn(|id| Err(yieldlens::YieldError::not_found(format!("chart for pool {id}"))))
        .build();
    let has_it = MockConnector::builder()
        .name("has_it")
        .returns_chart_ok(chart_with_apy(3.5))
        .build();

    let dashboard = Dashboard::builder()
        .with_connector(pools_only.clone())
        .with_connector(missing.clone())
        .with_connector(has_it)
        .build()
        .unwrap();

    let points = dashboard.historical_apy("pool-1").await.unwrap();
    assert_eq!(points[0].metrics.apy, Some(3.5));
    assert_eq!(pools_only.calls(), 0);
    assert_eq!(missing.calls(), 1);
}

#[tokio::test]
async fn chart_receives_trimmed_pool_id() {
    let conn = MockConnector::builder()
        .with_chart_fn(|id| {
            assert_eq!(id, "abc-123");
            Ok(vec![])
        })
        .build();
    let dashboard = Dashboard::builder().with_connector(conn).build().unwrap();
    assert!(dashboard.historical_apy("  abc-123 ").await.unwrap().is_empty());
}
