use proptest::prelude::*;
use yieldlens::{CategoryStats, Dashboard, PoolCategory, Session};

fn session(unlocked: bool) -> Session {
    let mut s = Session::new();
    if unlocked {
        s.login("user@example.com", "hunter2").unwrap();
    }
    s
}

#[test]
fn gated_category_is_locked_until_login() {
    let pools = yieldlens_core::sample_pools();
    let locked = Dashboard::category_stats(&pools, Some(PoolCategory::YieldAggregator), &session(false));
    assert_eq!(
        locked,
        CategoryStats {
            total: 1,
            locked: 1,
            unlocked: 0
        }
    );
    let open = Dashboard::category_stats(&pools, Some(PoolCategory::YieldAggregator), &session(true));
    assert_eq!(
        open,
        CategoryStats {
            total: 1,
            locked: 0,
            unlocked: 1
        }
    );
}

#[test]
fn overview_counts_only_gated_pools_as_locked() {
    let pools = yieldlens_core::sample_pools();
    let stats = Dashboard::category_stats(&pools, None, &session(false));
    assert_eq!(stats.total, 4);
    assert_eq!(stats.locked, 1);
    assert_eq!(stats.unlocked, 3);
}

#[test]
fn visible_pools_hide_gated_category() {
    let pools = yieldlens_core::sample_pools();
    let anon = Dashboard::visible_pools(&pools, None, &session(false));
    assert_eq!(anon.len(), 3);
    assert!(anon.iter().all(|p| p.category != PoolCategory::YieldAggregator));
    let user = Dashboard::visible_pools(&pools, Some(PoolCategory::YieldAggregator), &session(true));
    assert_eq!(user.len(), 1);
    assert_eq!(user[0].id, "sample-yearn");
}

#[test]
fn category_filter() {
    let pools = yieldlens_core::sample_pools();
    assert_eq!(Dashboard::pools_in_category(&pools, None).len(), 4);
    let lending = Dashboard::pools_in_category(&pools, Some(PoolCategory::Lending));
    assert_eq!(lending.len(), 2);
    assert!(lending.iter().all(|p| p.category == PoolCategory::Lending));
}

proptest! {
    #[test]
    fn stats_always_partition_total(
        cats in proptest::collection::vec(0_usize..3, 0..40),
        filter in proptest::option::of(0_usize..3),
        unlocked in any::<bool>(),
    ) {
        let template = yieldlens_core::sample_pools().remove(0);
        let pools: Vec<_> = cats
            .iter()
            .map(|&i| {
                let mut p = template.clone();
                p.category = PoolCategory::ALL[i];
                p
            })
            .collect();
        let filter = filter.map(|i| PoolCategory::ALL[i]);
        let stats = Dashboard::category_stats(&pools, filter, &session(unlocked));
        prop_assert_eq!(stats.total, stats.locked + stats.unlocked);
        prop_assert_eq!(stats.total, Dashboard::pools_in_category(&pools, filter).len());
        if unlocked {
            prop_assert_eq!(stats.locked, 0);
        }
        let visible = Dashboard::visible_pools(&pools, filter, &session(unlocked));
        prop_assert_eq!(visible.len(), stats.unlocked);
    }
}
