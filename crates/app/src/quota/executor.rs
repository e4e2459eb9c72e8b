use quota_core::{EnforcementResult, SourceTally, partition_by_source};
use tracing::{info, warn};

use crate::error::{AppError, Result};
use crate::quota::selector::EvictionSelector;
use crate::store::RecordStore;

/// Deletes the oldest records until a tenant fits a target cap.
///
/// Only ever run on an explicit user request; nothing in this crate
/// schedules it.
pub struct EvictionExecutor<'a, S: ?Sized> {
    store: &'a S,
    selector: EvictionSelector<'a, S>,
}

impl<'a, S: RecordStore + ?Sized> EvictionExecutor<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            selector: EvictionSelector::new(store),
        }
    }

    pub fn enforce_cap(&self, tenant_id: &str, target_cap: i64) -> Result<EnforcementResult> {
        let decision = self
            .selector
            .calculate_deletions_for_cap(tenant_id, target_cap)?;
        if decision.to_delete == 0 {
            return Ok(EnforcementResult::unchanged(&decision));
        }

        let count = i64::try_from(decision.to_delete).unwrap_or(i64::MAX);
        let candidates = self.selector.get_oldest_candidates(tenant_id, count)?;

        // Sources are deleted independently; there is no cross-source rollback.
        let mut tables = SourceTally::default();
        for (source, ids) in partition_by_source(&candidates) {
            match self.store.delete(tenant_id, source, &ids) {
                Ok(deleted) => {
                    if deleted < ids.len() as u64 {
                        warn!(
                            tenant_id,
                            %source,
                            selected = ids.len(),
                            deleted,
                            "fewer records deleted than selected"
                        );
                    }
                    tables.record(source, deleted);
                }
                Err(err) if tables.total() == 0 => return Err(err.into()),
                Err(err) => {
                    let completed = EnforcementResult::from_tally(&decision, tables);
                    warn!(
                        tenant_id,
                        %source,
                        deleted = completed.deleted,
                        error = %err,
                        "eviction stopped part way"
                    );
                    return Err(AppError::PartialEviction {
                        completed,
                        source: err,
                    });
                }
            }
        }

        let result = EnforcementResult::from_tally(&decision, tables);
        info!(
            tenant_id,
            target_cap = decision.target_cap,
            deleted = result.deleted,
            transactions = result.tables.transactions,
            receipt_trips = result.tables.receipt_trips,
            remaining = result.remaining,
            "cap enforced"
        );
        Ok(result)
    }
}
