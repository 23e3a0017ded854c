//! Display helpers for dashboard values.

/// Format a USD amount with a magnitude suffix, e.g. `$1.25B`, `$890.00M`, `$12.50K`.
///
/// ```
/// assert_eq!(yieldlens_core::format_tvl(1_250_000_000.0), "$1.25B");
/// assert_eq!(yieldlens_core::format_tvl(999.0), "$999.00");
/// ```
#[must_use]
pub fn format_tvl(tvl: f64) -> String {
    if tvl >= 1e9 {
        format!("${:.2}B", tvl / 1e9)
    } else if tvl >= 1e6 {
        format!("${:.2}M", tvl / 1e6)
    } else if tvl >= 1e3 {
        format!("${:.2}K", tvl / 1e3)
    } else {
        format!("${tvl:.2}")
    }
}

/// Format a percentage with two decimals, e.g. `4.25%`.
#[must_use]
pub fn format_apy(apy: f64) -> String {
    format!("{apy:.2}%")
}

/// Up to two uppercase initials from a dash-separated project slug.
///
/// `"aave-v3"` becomes `"AV"`, `"lido"` becomes `"L"`.
#[must_use]
pub fn project_initials(project: &str) -> String {
    project
        .split('-')
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}
