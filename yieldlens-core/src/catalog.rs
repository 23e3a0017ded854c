//! Pool selection: matching the analytics feed against the target catalog,
//! positional fallbacks, built-in sample pools, and category filters.

use crate::{CategoryStats, Pool, PoolCategory, RawPool, TargetCatalog};

/// Number of pools taken by [`example_pools`]; three per category.
const EXAMPLE_POOL_COUNT: usize = 9;

/// Case-insensitive substring match in either direction.
///
/// `"aave-v3"` matches a target of `"aave"` and vice versa. An empty string on
/// either side never matches.
#[must_use]
pub fn project_matches(api_project: &str, target: &str) -> bool {
    if api_project.is_empty() || target.is_empty() {
        return false;
    }
    let a = api_project.to_lowercase();
    let t = target.to_lowercase();
    a.contains(&t) || t.contains(&a)
}

/// Pick one pool per catalog project, tagged with the project's category.
///
/// Projects are visited in catalog order; for each, the first raw pool whose
/// project matches is selected. Projects without a match are skipped.
#[must_use]
pub fn select_target_pools(raw: &[RawPool], catalog: &TargetCatalog) -> Vec<Pool> {
    catalog
        .iter()
        .filter_map(|(category, project)| {
            raw.iter()
                .find(|p| project_matches(&p.project, project))
                .map(|p| Pool::from_raw(p, category))
        })
        .collect()
}

/// Positional fallback: the first nine raw pools, three per category in
/// presentation order.
#[must_use]
pub fn example_pools(raw: &[RawPool]) -> Vec<Pool> {
    raw.iter()
        .take(EXAMPLE_POOL_COUNT)
        .enumerate()
        .map(|(i, p)| {
            let category = match i {
                0..=2 => PoolCategory::Lending,
                3..=5 => PoolCategory::LiquidStaking,
                _ => PoolCategory::YieldAggregator,
            };
            Pool::from_raw(p, category)
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn sample(
    id: &str,
    project: &str,
    category: PoolCategory,
    symbol: &str,
    tvl_usd: f64,
    (apy, apy_mean_30d, prediction, sigma): (f64, f64, f64, f64),
    meta: &str,
    (underlying, reward): (&str, &str),
    url: &str,
) -> Pool {
    Pool {
        id: id.to_string(),
        project: project.to_string(),
        chain: "Ethereum".to_string(),
        category,
        symbol: symbol.to_string(),
        tvl_usd,
        apy,
        apy_mean_30d,
        prediction,
        sigma,
        pool_meta: Some(meta.to_string()),
        underlying_tokens: vec![underlying.to_string()],
        reward_tokens: vec![reward.to_string()],
        url: Some(url.to_string()),
    }
}

/// Built-in pools shown when the analytics feed is unreachable or empty.
#[must_use]
pub fn sample_pools() -> Vec<Pool> {
    vec![
        sample(
            "sample-aave",
            "aave-v3",
            PoolCategory::Lending,
            "aUSDC",
            1_250_000_000.0,
            (4.25, 4.18, 4.30, 0.85),
            "USDC Lending Pool",
            ("USDC", "AAVE"),
            "https://aave.com",
        ),
        sample(
            "sample-compound",
            "compound-v3",
            PoolCategory::Lending,
            "cUSDC",
            890_000_000.0,
            (3.95, 3.87, 4.05, 0.78),
            "USDC Lending Pool",
            ("USDC", "COMP"),
            "https://compound.finance",
        ),
        sample(
            "sample-lido",
            "lido",
            PoolCategory::LiquidStaking,
            "stETH",
            21_500_000_000.0,
            (5.12, 5.08, 5.15, 0.92),
            "Liquid Staking Pool",
            ("ETH", "LDO"),
            "https://lido.fi",
        ),
        sample(
            "sample-yearn",
            "yearn-finance",
            PoolCategory::YieldAggregator,
            "yUSDC",
            450_000_000.0,
            (6.78, 6.65, 6.85, 1.15),
            "USDC Yield Strategy",
            ("USDC", "YFI"),
            "https://yearn.finance",
        ),
    ]
}

/// Pools of `category`, or every pool when `category` is `None`.
#[must_use]
pub fn pools_in_category(pools: &[Pool], category: Option<PoolCategory>) -> Vec<Pool> {
    pools
        .iter()
        .filter(|p| category.is_none_or(|c| p.category == c))
        .cloned()
        .collect()
}

/// Count the pools of `category` (all pools when `None`) and how many of them
/// the session can see.
///
/// Gated categories are fully locked unless `unlocked` is true. With no
/// category filter, only the gated pools among all pools are counted as locked.
#[must_use]
pub fn category_stats(
    pools: &[Pool],
    category: Option<PoolCategory>,
    unlocked: bool,
) -> CategoryStats {
    let selected = pools
        .iter()
        .filter(|p| category.is_none_or(|c| p.category == c));
    let mut stats = CategoryStats::default();
    for pool in selected {
        stats.total += 1;
        if pool.category.is_gated() && !unlocked {
            stats.locked += 1;
        } else {
            stats.unlocked += 1;
        }
    }
    stats
}
