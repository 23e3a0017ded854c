use yieldlens::Dashboard;
use yieldlens_demos::common::get_connector;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,yieldlens=trace,yieldlens_llama=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let dashboard = Dashboard::builder().with_connector(get_connector()).build()?;

    let pools = dashboard.pools_with_fallback().await;
    tracing::info!(count = pools.len(), "pools ready");

    if let Some(pool) = pools.first() {
        let series = dashboard.monthly_apy(&pool.id).await?;
        tracing::info!(pool = %pool.id, months = series.len(), "monthly series ready");
    }

    Ok(())
}
