use yieldlens::{Dashboard, PoolCategory, Session, format_apy, format_tvl, project_initials};
use yieldlens_demos::common::get_connector;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Create connector (mock in CI when YIELDLENS_DEMOS_USE_MOCK is set).
    let connector = get_connector();

    // 2. Build the dashboard and register the connector.
    let dashboard = Dashboard::builder().with_connector(connector).build()?;

    // 3. Pools never fail to load: target pools, then feed examples, then samples.
    let pools = dashboard.pools_with_fallback().await;

    // 4. Print each category the way an anonymous visitor sees it.
    let session = Session::new();
    for category in PoolCategory::ALL {
        let stats = Dashboard::category_stats(&pools, Some(category), &session);
        println!(
            "{category}: {} pools ({} locked)",
            stats.total, stats.locked
        );
        for pool in Dashboard::visible_pools(&pools, Some(category), &session) {
            println!(
                "  [{}] {:<20} {:>10} TVL {:>8} APY",
                project_initials(&pool.project),
                pool.symbol,
                format_tvl(pool.tvl_usd),
                format_apy(pool.apy)
            );
        }
    }

    Ok(())
}
