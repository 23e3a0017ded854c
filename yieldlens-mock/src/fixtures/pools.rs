use yieldlens_core::{Predictions, RawPool};

#[allow(clippy::too_many_arguments)]
fn raw(
    pool: &str,
    project: &str,
    symbol: &str,
    tvl_usd: f64,
    apy: f64,
    apy_mean30d: f64,
    sigma: f64,
    tokens: (&str, Option<&str>),
) -> RawPool {
    RawPool {
        pool: pool.to_string(),
        project: project.to_string(),
        chain: "Ethereum".to_string(),
        symbol: symbol.to_string(),
        tvl_usd,
        apy: Some(apy),
        apy_mean30d: Some(apy_mean30d),
        predictions: Some(Predictions {
            predicted_probability: Some(70.0),
            predicted_class: Some("Stable/Up".to_string()),
            binned_confidence: Some(2.0),
        }),
        sigma: Some(sigma),
        pool_meta: None,
        underlying_tokens: Some(vec![tokens.0.to_string()]),
        reward_tokens: tokens.1.map(|r| vec![r.to_string()]),
    }
}

/// Pool feed served by `MockConnector::pools`, in feed order.
///
/// The four dashboard pools are interleaved with pools no catalog project
/// matches, so target selection and the positional fallback disagree.
pub fn all() -> Vec<RawPool> {
    vec![
        raw(
            "mock-uniswap-weth-usdc",
            "uniswap-v3",
            "WETH-USDC",
            310_000_000.0,
            18.4,
            21.02,
            4.1,
            ("WETH", None),
        ),
        raw(
            "sample-aave",
            "aave-v3",
            "aUSDC",
            1_250_000_000.0,
            4.25,
            4.18,
            0.85,
            ("USDC", Some("AAVE")),
        ),
        raw(
            "sample-compound",
            "compound-v3",
            "cUSDC",
            890_000_000.0,
            3.95,
            3.87,
            0.78,
            ("USDC", Some("COMP")),
        ),
        raw(
            "mock-curve-3pool",
            "curve-dex",
            "DAI-USDC-USDT",
            180_000_000.0,
            2.1,
            2.3,
            0.4,
            ("DAI", Some("CRV")),
        ),
        raw(
            "sample-lido",
            "lido",
            "stETH",
            21_500_000_000.0,
            5.12,
            5.08,
            0.92,
            ("ETH", Some("LDO")),
        ),
        raw(
            "sample-yearn",
            "yearn-finance",
            "yUSDC",
            450_000_000.0,
            6.78,
            6.65,
            1.15,
            ("USDC", Some("YFI")),
        ),
    ]
}

/// Base APY used to shape the chart of `pool_id`.
pub fn base_apy(pool_id: &str) -> Option<f64> {
    all()
        .into_iter()
        .find(|p| p.pool == pool_id)
        .and_then(|p| p.apy_mean30d)
}
