use std::time::Duration;

use yieldlens::{Dashboard, YieldError};

use crate::helpers::MockConnector;

#[tokio::test]
async fn request_deadline_bounds_sequential_fallback() {
    // Each provider stays under its own timeout, but together they exceed the deadline.
    let mk = |name: &'static str| {
        MockConnector::builder()
            .name(name)
            .delay(Duration::from_millis(80))
            .with_chart_fn(|_| Err(YieldError::Other("late failure".into())))
            .build()
    };
    let d = Dashboard::builder()
        .with_connector(mk("a"))
        .with_connector(mk("b"))
        .with_connector(mk("c"))
        .provider_timeout(Duration::from_millis(100))
        .request_timeout(Duration::from_millis(150))
        .build()
        .unwrap();

    let err = d.historical_apy("pool-1").await.unwrap_err();
    assert_eq!(err, YieldError::request_timeout("chart"));
}

#[tokio::test]
async fn request_deadline_not_hit_returns_data() {
    let conn = MockConnector::builder()
        .delay(Duration::from_millis(5))
        .returns_pools_ok(vec![crate::helpers::raw_pool("p", "lido", 3.0)])
        .build();
    let d = Dashboard::builder()
        .with_connector(conn)
        .request_timeout(Duration::from_secs(2))
        .build()
        .unwrap();
    assert_eq!(d.all_pools().await.unwrap().len(), 1);
}
