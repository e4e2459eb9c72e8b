use quota_core::{CapDecision, EvictionCandidate, RecordSource, merge_oldest};
use tracing::debug;

use crate::error::Result;
use crate::quota::usage::UsageCounter;
use crate::store::RecordStore;

/// Picks the oldest records across both sources.
pub struct EvictionSelector<'a, S: ?Sized> {
    store: &'a S,
    usage: UsageCounter<'a, S>,
}

impl<'a, S: RecordStore + ?Sized> EvictionSelector<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            usage: UsageCounter::new(store),
        }
    }

    /// How many records must go for the tenant to fit `target_cap`.
    /// A non-positive target yields an empty decision without reading the
    /// store.
    pub fn calculate_deletions_for_cap(&self, tenant_id: &str, target_cap: i64) -> Result<CapDecision> {
        if target_cap <= 0 {
            return Ok(CapDecision::empty());
        }
        let current_total = self.usage.get_usage(tenant_id)?.total;
        let decision = CapDecision::compute(current_total, target_cap as u64);
        debug!(
            tenant_id,
            current_total = decision.current_total,
            target_cap = decision.target_cap,
            to_delete = decision.to_delete,
            "cap decision computed"
        );
        Ok(decision)
    }

    /// The `count` oldest records in global order. Returns an empty list
    /// without touching the store when `count <= 0`.
    pub fn get_oldest_candidates(&self, tenant_id: &str, count: i64) -> Result<Vec<EvictionCandidate>> {
        if count <= 0 {
            return Ok(Vec::new());
        }
        let limit = usize::try_from(count).unwrap_or(usize::MAX);
        let transactions = self
            .store
            .fetch_oldest(tenant_id, RecordSource::Transactions, limit)?;
        let receipt_trips = self
            .store
            .fetch_oldest(tenant_id, RecordSource::ReceiptTrips, limit)?;
        Ok(merge_oldest(transactions, receipt_trips, limit))
    }
}
