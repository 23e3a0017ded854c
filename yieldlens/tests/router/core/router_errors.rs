use std::time::Duration;

use yieldlens::{Dashboard, FetchStrategy, YieldError};

use crate::helpers::MockConnector;

fn dashboards(
    connectors: &[std::sync::Arc<MockConnector>],
) -> [(FetchStrategy, Dashboard); 2] {
    [FetchStrategy::PriorityWithFallback, FetchStrategy::Latency].map(|strategy| {
        let mut b = Dashboard::builder()
            .fetch_strategy(strategy)
            .provider_timeout(Duration::from_millis(30));
        for c in connectors {
            b = b.with_connector(c.clone());
        }
        (strategy, b.build().unwrap())
    })
}

#[tokio::test]
async fn no_capable_connector_is_unsupported() {
    let pools_only = MockConnector::builder().returns_pools_ok(vec![]).build();
    for (strategy, d) in dashboards(&[pools_only]) {
        let err = d.historical_apy("pool-1").await.unwrap_err();
        assert_eq!(err, YieldError::unsupported("chart"), "{strategy:?}");
    }
}

#[tokio::test]
async fn all_not_found_collapses_to_not_found() {
    let a = MockConnector::builder()
        .name("a")
        .with_chart_fn(|_| Err(YieldError::not_found("x")))
        .build();
    let b = MockConnector::builder()
        .name("b")
        .with_chart_fn(|_| Err(YieldError::not_found("y")))
        .build();
    for (strategy, d) in dashboards(&[a.clone(), b.clone()]) {
        let err = d.historical_apy("abc").await.unwrap_err();
        assert_eq!(err, YieldError::not_found("chart for pool abc"), "{strategy:?}");
    }
}

#[tokio::test]
async fn all_timeouts_collapse_to_all_providers_timed_out() {
    let a = MockConnector::builder()
        .name("a")
        .delay(Duration::from_millis(200))
        .returns_pools_ok(vec![])
        .build();
    let b = MockConnector::builder()
        .name("b")
        .delay(Duration::from_millis(200))
        .returns_pools_ok(vec![])
        .build();
    for (strategy, d) in dashboards(&[a.clone(), b.clone()]) {
        let err = d.all_pools().await.unwrap_err();
        assert_eq!(
            err,
            YieldError::AllProvidersTimedOut {
                capability: "pools".into()
            },
            "{strategy:?}"
        );
    }
}

#[tokio::test]
async fn mixed_failures_are_aggregated_and_tagged() {
    let broken = MockConnector::builder()
        .name("broken")
        .with_pools_fn(|| Err(YieldError::Data("bad json".into())))
        .build();
    let slow = MockConnector::builder()
        .name("slow")
        .delay(Duration::from_millis(200))
        .returns_pools_ok(vec![])
        .build();
    let d = Dashboard::builder()
        .with_connector(broken)
        .with_connector(slow)
        .provider_timeout(Duration::from_millis(30))
        .build()
        .unwrap();

    match d.all_pools().await.unwrap_err() {
        YieldError::AllProvidersFailed(errors) => {
            assert_eq!(
                errors,
                vec![
                    YieldError::connector("broken", "data issue: bad json"),
                    YieldError::provider_timeout("slow", "pools"),
                ]
            );
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn blank_pool_id_is_rejected_before_routing() {
    let conn = MockConnector::builder()
        .returns_chart_ok(vec![])
        .build();
    let d = Dashboard::builder()
        .with_connector(conn.clone())
        .build()
        .unwrap();
    assert!(matches!(
        d.historical_apy("   ").await,
        Err(YieldError::InvalidArg(_))
    ));
    assert!(matches!(
        d.monthly_apy("").await,
        Err(YieldError::InvalidArg(_))
    ));
    assert_eq!(conn.calls(), 0);
}
