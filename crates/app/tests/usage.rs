mod support;

use quota_app::{AppError, UsageCounter};
use quota_core::UsageSnapshot;
use support::MemoryStore;

#[test]
fn usage_is_zero_for_empty_sources() {
    let store = MemoryStore::new();
    let usage = UsageCounter::new(&store).get_usage("acme").expect("usage");
    assert_eq!(usage, UsageSnapshot::new(0, 0));
    assert_eq!(usage.total, 0);
    assert_eq!(store.counts.get(), 2);
}

#[test]
fn usage_total_sums_both_sources() {
    for (transactions, trips) in [(0usize, 0usize), (3, 0), (0, 4), (120, 7), (2, 90)] {
        let store = MemoryStore::new();
        store.add_transactions("acme", transactions);
        store.add_trips("acme", trips);
        let usage = UsageCounter::new(&store).get_usage("acme").expect("usage");
        assert_eq!(usage.bank_transactions, transactions as u64);
        assert_eq!(usage.receipt_trips, trips as u64);
        assert_eq!(usage.total, (transactions + trips) as u64);
    }
}

#[test]
fn usage_ignores_other_tenants() {
    let store = MemoryStore::new();
    store.add_transactions("acme", 2);
    store.add_trips("other", 5);
    let usage = UsageCounter::new(&store).get_usage("acme").expect("usage");
    assert_eq!(usage, UsageSnapshot::new(2, 0));
}

#[test]
fn usage_propagates_storage_failures() {
    let store = MemoryStore {
        fail_count: true,
        ..MemoryStore::new()
    };
    let err = UsageCounter::new(&store)
        .get_usage("acme")
        .expect_err("count failure");
    assert!(matches!(err, AppError::Storage(_)));
}
