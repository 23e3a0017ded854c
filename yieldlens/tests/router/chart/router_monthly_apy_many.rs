use std::sync::Arc;
use std::time::Duration;

use yieldlens::{Dashboard, YieldError};
use yieldlens_mock::{FAIL_POOL, TIMEOUT_POOL};

#[tokio::test]
async fn keeps_order_and_isolates_failures() {
    let d = Dashboard::builder()
        .with_connector(Arc::new(yieldlens_mock::MockConnector::new()))
        .months(3)
        .build()
        .unwrap();

    let results = d
        .monthly_apy_many(&["sample-lido", FAIL_POOL, "sample-aave"])
        .await
        .unwrap();
    let ids: Vec<&str> = results.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, ["sample-lido", FAIL_POOL, "sample-aave"]);
    assert_eq!(results[0].1.as_ref().unwrap().len(), 3);
    assert!(matches!(
        results[1].1,
        Err(YieldError::AllProvidersFailed(_))
    ));
    assert_eq!(results[2].1.as_ref().unwrap().len(), 3);
}

#[tokio::test]
async fn slow_pool_times_out_per_provider() {
    let d = Dashboard::builder()
        .with_connector(Arc::new(yieldlens_mock::MockConnector::new()))
        .provider_timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let results = d.monthly_apy_many(&[TIMEOUT_POOL]).await.unwrap();
    assert_eq!(
        results[0].1,
        Err(YieldError::AllProvidersTimedOut {
            capability: "chart".into()
        })
    );
}

#[tokio::test]
async fn request_deadline_surfaces_as_chart_timeout() {
    let d = Dashboard::builder()
        .with_connector(Arc::new(yieldlens_mock::MockConnector::new()))
        .provider_timeout(Duration::from_secs(1))
        .request_timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    // The batch deadline and the per-pool deadline expire together; either one
    // may be observed first.
    match d.monthly_apy_many(&["sample-lido", TIMEOUT_POOL]).await {
        Err(e) => assert_eq!(e, YieldError::request_timeout("chart")),
        Ok(results) => {
            assert!(results[0].1.is_ok());
            assert_eq!(results[1].1, Err(YieldError::request_timeout("chart")));
        }
    }
}
