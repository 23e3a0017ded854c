use std::sync::Arc;

use yieldlens_core::YieldConnector;

/// Environment variable that switches the demos to the offline mock connector.
pub const USE_MOCK_ENV: &str = "YIELDLENS_DEMOS_USE_MOCK";

/// Return a connector for demos.
///
/// # Panics
/// Panics if the cached DeFiLlama builder fails middleware validation.
#[must_use]
pub fn get_connector() -> Arc<dyn YieldConnector> {
    if std::env::var(USE_MOCK_ENV).is_ok() {
        println!("--- (Using Mock Connector for CI) ---");
        Arc::new(yieldlens_mock::MockConnector::new())
    } else {
        yieldlens_llama::LlamaConnector::new()
            .build()
            .expect("middleware stack validation failed")
    }
}
