use chrono::{DateTime, TimeZone};
use yieldlens_core::{Capability, ChartPoint, MonthlyPoint, YieldError, timeseries};

use crate::Dashboard;
use crate::core::checked_months;
use crate::router::util::join_with_deadline;

fn checked_pool_id(pool_id: &str) -> Result<&str, YieldError> {
    let id = pool_id.trim();
    if id.is_empty() {
        return Err(YieldError::InvalidArg("pool id must not be empty".into()));
    }
    Ok(id)
}

impl Dashboard {
    /// Raw historical samples of `pool_id`, as delivered by the first provider
    /// that has them.
    ///
    /// # Errors
    /// Returns `InvalidArg` for a blank id, `NotFound` when every provider
    /// reports the pool unknown, or the collapsed provider failures otherwise.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "yieldlens::router", skip(self))
    )]
    pub async fn historical_apy(&self, pool_id: &str) -> Result<Vec<ChartPoint>, YieldError> {
        let id = checked_pool_id(pool_id)?.to_string();
        let samples = self
            .fetch_single(Capability::Chart, format!("chart for pool {id}"), |c| {
                c.as_chart_provider()?;
                let id = id.clone();
                Some(async move {
                    match c.as_chart_provider() {
                        Some(p) => p.chart(&id).await,
                        None => Err(YieldError::connector(
                            c.name(),
                            "missing chart capability during call",
                        )),
                    }
                })
            })
            .await?;
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "yieldlens::router", count = samples.len(), "fetched chart samples");
        Ok(samples)
    }

    /// Monthly APY series of `pool_id` using the configured length and time zone.
    ///
    /// An empty history yields an empty series rather than an error.
    ///
    /// # Errors
    /// Propagates errors from [`historical_apy`](Self::historical_apy).
    pub async fn monthly_apy(&self, pool_id: &str) -> Result<Vec<MonthlyPoint>, YieldError> {
        self.monthly_apy_with(pool_id, self.cfg.months).await
    }

    /// Monthly APY series of `pool_id` covering `months` months up to the
    /// current one.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `months` is zero or above `MAX_MONTH_COUNT`;
    /// otherwise propagates errors from [`historical_apy`](Self::historical_apy).
    pub async fn monthly_apy_with(
        &self,
        pool_id: &str,
        months: usize,
    ) -> Result<Vec<MonthlyPoint>, YieldError> {
        let months = checked_months(months)?;
        let samples = self.historical_apy(pool_id).await?;
        Ok(timeseries::monthly::resample_monthly_in(
            &samples,
            months,
            self.cfg.chart_timezone,
        ))
    }

    /// Monthly APY series ending at the month containing `now`.
    ///
    /// Month boundaries follow the time zone of `now`; the configured
    /// `chart_timezone` is not consulted.
    ///
    /// # Errors
    /// Same as [`monthly_apy_with`](Self::monthly_apy_with).
    pub async fn monthly_apy_at<Tz: TimeZone>(
        &self,
        pool_id: &str,
        months: usize,
        now: DateTime<Tz>,
    ) -> Result<Vec<MonthlyPoint>, YieldError> {
        let months = checked_months(months)?;
        let samples = self.historical_apy(pool_id).await?;
        Ok(timeseries::monthly::resample_monthly_at(
            &samples, months, now,
        ))
    }

    /// Monthly series for several pools fetched concurrently.
    ///
    /// Results keep the order of `pool_ids`; a failing pool does not fail the
    /// others.
    ///
    /// # Errors
    /// Returns `RequestTimeout` for the chart capability when the configured
    /// request deadline elapses before every pool has answered.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "yieldlens::router", skip(self, pool_ids), fields(pools = pool_ids.len()))
    )]
    pub async fn monthly_apy_many(
        &self,
        pool_ids: &[&str],
    ) -> Result<Vec<(String, Result<Vec<MonthlyPoint>, YieldError>)>, YieldError> {
        let tasks = pool_ids.iter().map(|id| async move {
            ((*id).to_string(), self.monthly_apy(id).await)
        });
        join_with_deadline(tasks, self.cfg.request_timeout)
            .await
            .map_err(|_| YieldError::request_timeout(Capability::Chart.as_str()))
    }
}
