use yieldlens_core::{
    Capability, CategoryStats, Pool, PoolCategory, RawPool, Session, YieldError, catalog,
};

use crate::Dashboard;

impl Dashboard {
    /// Every pool the first answering provider tracks, unfiltered.
    ///
    /// # Errors
    /// Returns `Unsupported` when no registered connector lists pools, or the
    /// collapsed provider failures otherwise.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "yieldlens::router", skip(self))
    )]
    pub async fn all_pools(&self) -> Result<Vec<RawPool>, YieldError> {
        let raw = self
            .fetch_single(Capability::Pools, "pools".to_string(), |c| {
                c.as_pools_provider()?;
                Some(async move {
                    match c.as_pools_provider() {
                        Some(p) => p.pools().await,
                        None => Err(YieldError::connector(
                            c.name(),
                            "missing pools capability during call",
                        )),
                    }
                })
            })
            .await?;
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "yieldlens::router", count = raw.len(), "fetched pools");
        Ok(raw)
    }

    /// One pool per configured target project, tagged with its category.
    ///
    /// May be empty when the feed lists none of the target projects.
    ///
    /// # Errors
    /// Propagates errors from [`all_pools`](Self::all_pools).
    pub async fn target_pools(&self) -> Result<Vec<Pool>, YieldError> {
        let raw = self.all_pools().await?;
        Ok(catalog::select_target_pools(&raw, &self.cfg.catalog))
    }

    /// Pools to display, never failing.
    ///
    /// Tries target pools first, then the first nine feed entries split across
    /// categories, then the built-in sample pools. Each step down is logged.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "yieldlens::router", skip(self))
    )]
    pub async fn pools_with_fallback(&self) -> Vec<Pool> {
        let raw = match self.all_pools().await {
            Ok(raw) => raw,
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(target: "yieldlens::router", error = %_e, "pool feed unavailable; using sample pools");
                return catalog::sample_pools();
            }
        };

        let targets = catalog::select_target_pools(&raw, &self.cfg.catalog);
        if !targets.is_empty() {
            return targets;
        }
        #[cfg(feature = "tracing")]
        tracing::warn!(target: "yieldlens::router", "no target projects in feed; using example pools");

        let examples = catalog::example_pools(&raw);
        if !examples.is_empty() {
            return examples;
        }
        #[cfg(feature = "tracing")]
        tracing::warn!(target: "yieldlens::router", "pool feed empty; using sample pools");

        catalog::sample_pools()
    }

    /// Look up a displayed pool by id.
    ///
    /// Searches the same list [`pools_with_fallback`](Self::pools_with_fallback)
    /// returns, so sample pool ids resolve while the feed is down.
    ///
    /// # Errors
    /// Returns `NotFound` when no displayed pool has `id`.
    pub async fn pool_by_id(&self, id: &str) -> Result<Pool, YieldError> {
        self.pools_with_fallback()
            .await
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| YieldError::not_found(format!("pool {id}")))
    }

    /// Pools of `category`, or all of them when `category` is `None`.
    #[must_use]
    pub fn pools_in_category(pools: &[Pool], category: Option<PoolCategory>) -> Vec<Pool> {
        catalog::pools_in_category(pools, category)
    }

    /// Locked/unlocked counts for `category` as seen by `session`.
    #[must_use]
    pub fn category_stats(
        pools: &[Pool],
        category: Option<PoolCategory>,
        session: &Session,
    ) -> CategoryStats {
        catalog::category_stats(pools, category, session.is_yield_aggregator_unlocked())
    }

    /// Pools of `category` the session may open; gated pools are withheld
    /// until the session unlocks them.
    #[must_use]
    pub fn visible_pools(
        pools: &[Pool],
        category: Option<PoolCategory>,
        session: &Session,
    ) -> Vec<Pool> {
        pools
            .iter()
            .filter(|p| category.is_none_or(|c| p.category == c))
            .filter(|p| session.is_unlocked(p.category))
            .cloned()
            .collect()
    }
}
