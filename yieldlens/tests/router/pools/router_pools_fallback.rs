use std::sync::Arc;

use yieldlens::{Dashboard, PoolCategory, TargetCatalog, YieldError};
use yieldlens_mock::{DynamicMockConnector, MockBehavior};

use crate::helpers::{MockConnector, raw_pool};

#[tokio::test]
async fn target_pools_follow_catalog_order() {
    let d = Dashboard::builder()
        .with_connector(Arc::new(yieldlens_mock::MockConnector::new()))
        .build()
        .unwrap();

    let pools = d.target_pools().await.unwrap();
    let picked: Vec<(&str, PoolCategory)> =
        pools.iter().map(|p| (p.id.as_str(), p.category)).collect();
    assert_eq!(
        picked,
        vec![
            ("sample-aave", PoolCategory::Lending),
            ("sample-compound", PoolCategory::Lending),
            ("sample-lido", PoolCategory::LiquidStaking),
            ("sample-yearn", PoolCategory::YieldAggregator),
        ]
    );
    assert_eq!(d.pools_with_fallback().await, pools);
}

#[tokio::test]
async fn custom_catalog_changes_selection() {
    let catalog = TargetCatalog::empty().with_projects(PoolCategory::Lending, &["curve"]);
    let d = Dashboard::builder()
        .with_connector(Arc::new(yieldlens_mock::MockConnector::new()))
        .catalog(catalog)
        .build()
        .unwrap();
    let pools = d.target_pools().await.unwrap();
    assert_eq!(pools.len(), 1);
    assert_eq!(pools[0].project, "curve-dex");
    assert_eq!(pools[0].category, PoolCategory::Lending);
}

#[tokio::test]
async fn no_target_projects_falls_back_to_example_pools() {
    let raw: Vec<_> = (0..11)
        .map(|i| raw_pool(&format!("p{i}"), &format!("unknown-{i}"), 1.0))
        .collect();
    let conn = MockConnector::builder().returns_pools_ok(raw).build();
    let d = Dashboard::builder().with_connector(conn).build().unwrap();

    assert!(d.target_pools().await.unwrap().is_empty());
    let pools = d.pools_with_fallback().await;
    assert_eq!(pools.len(), 9);
    let cats: Vec<PoolCategory> = pools.iter().map(|p| p.category).collect();
    assert_eq!(
        cats,
        [
            [PoolCategory::Lending; 3],
            [PoolCategory::LiquidStaking; 3],
            [PoolCategory::YieldAggregator; 3],
        ]
        .concat()
    );
    assert_eq!(pools[0].id, "p0");
    assert_eq!(pools[8].id, "p8");
}

#[tokio::test]
async fn empty_feed_falls_back_to_sample_pools() {
    let conn = MockConnector::builder().returns_pools_ok(vec![]).build();
    let d = Dashboard::builder().with_connector(conn).build().unwrap();
    assert_eq!(d.pools_with_fallback().await, yieldlens_core::sample_pools());
}

#[tokio::test]
async fn feed_failure_falls_back_to_sample_pools() {
    let (conn, ctl) = DynamicMockConnector::new_with_controller("dyn");
    ctl.set_pools_behavior(MockBehavior::Fail(YieldError::connector("dyn", "503")))
        .await;
    let d = Dashboard::builder().with_connector(conn).build().unwrap();

    let pools = d.pools_with_fallback().await;
    assert_eq!(pools.len(), 4);
    assert!(pools.iter().all(|p| p.id.starts_with("sample-")));
    assert!(d.target_pools().await.is_err());
    assert_eq!(ctl.pools_calls().await, 2);
}

#[tokio::test]
async fn hanging_feed_times_out_into_sample_pools() {
    let (conn, ctl) = DynamicMockConnector::new_with_controller("dyn");
    ctl.set_pools_behavior(MockBehavior::Hang).await;
    let d = Dashboard::builder()
        .with_connector(conn)
        .provider_timeout(std::time::Duration::from_millis(20))
        .build()
        .unwrap();
    assert_eq!(d.pools_with_fallback().await, yieldlens_core::sample_pools());
}

#[tokio::test]
async fn second_provider_serves_pools_when_first_fails() {
    let (first, ctl) = DynamicMockConnector::new_with_controller("first");
    ctl.set_pools_behavior(MockBehavior::Fail(YieldError::Other("down".into())))
        .await;
    let second = MockConnector::builder()
        .name("second")
        .returns_pools_ok(vec![raw_pool("lido-pool", "lido", 3.0)])
        .build();
    let d = Dashboard::builder()
        .with_connector(first)
        .with_connector(second)
        .build()
        .unwrap();
    let pools = d.pools_with_fallback().await;
    assert_eq!(pools.len(), 1);
    assert_eq!(pools[0].id, "lido-pool");
    assert_eq!(pools[0].category, PoolCategory::LiquidStaking);
    assert!((pools[0].prediction - 60.0).abs() < f64::EPSILON);
}
