use yieldlens::{Dashboard, FetchStrategy};
use yieldlens_demos::common::get_connector;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = Dashboard::builder()
        .with_connector(get_connector())
        .fetch_strategy(FetchStrategy::PriorityWithFallback)
        .provider_timeout(std::time::Duration::from_secs(10))
        .months(12)
        .chart_timezone(chrono_tz::UTC)
        .build()?;

    // Resolve a pool the dashboard would display, then chart it.
    let pools = dashboard.pools_with_fallback().await;
    let Some(pool) = pools.first() else {
        println!("no pools available");
        return Ok(());
    };
    let pool = dashboard.pool_by_id(&pool.id).await?;
    println!("{} ({}) on {}", pool.symbol, pool.project, pool.chain);

    match dashboard.monthly_apy(&pool.id).await {
        Ok(series) if series.is_empty() => println!("no history for {}", pool.id),
        Ok(series) => {
            for point in series {
                let apy = point
                    .metrics
                    .apy
                    .map_or_else(|| "-".to_string(), yieldlens::format_apy);
                println!("{:>6}  {apy}", point.month);
            }
        }
        // Sample pools have no upstream history.
        Err(e) => println!("history unavailable for {}: {e}", pool.id),
    }

    Ok(())
}
