#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, TimeZone, Utc};
use quota_app::{RecordStore, StoreResult, TenantPlanProvider};
use quota_core::{EvictionCandidate, PlanTier, RecordId, RecordSource};
use quota_db::DbError;

/// In-memory store that records every call and can be told to fail.
#[derive(Default)]
pub struct MemoryStore {
    pub records: RefCell<Vec<(String, EvictionCandidate)>>,
    pub plans: HashMap<String, PlanTier>,
    pub counts: Cell<usize>,
    pub fetches: Cell<usize>,
    pub deletes: Cell<usize>,
    pub fail_delete_for: Option<RecordSource>,
    pub fail_count: bool,
    /// Ids removed behind the engine's back right before a delete runs.
    pub vanish_before_delete: RefCell<HashSet<RecordId>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plan(mut self, tenant_id: &str, plan: &str) -> Self {
        self.plans.insert(tenant_id.to_string(), PlanTier::new(plan));
        self
    }

    pub fn add(&self, tenant_id: &str, candidate: EvictionCandidate) {
        self.records
            .borrow_mut()
            .push((tenant_id.to_string(), candidate));
    }

    pub fn add_transactions(&self, tenant_id: &str, count: usize) {
        for index in 0..count {
            self.add(
                tenant_id,
                EvictionCandidate::transaction(index as i64 + 1, minute(index as i64 * 2)),
            );
        }
    }

    pub fn add_trips(&self, tenant_id: &str, count: usize) {
        for index in 0..count {
            self.add(
                tenant_id,
                EvictionCandidate::receipt_trip(
                    format!("trip-{index:04}"),
                    minute(index as i64 * 2 + 1),
                ),
            );
        }
    }

    pub fn total_calls(&self) -> usize {
        self.counts.get() + self.fetches.get() + self.deletes.get()
    }

    pub fn remaining_ids(&self, tenant_id: &str) -> Vec<RecordId> {
        self.records
            .borrow()
            .iter()
            .filter(|(tenant, _)| tenant == tenant_id)
            .map(|(_, candidate)| candidate.id.clone())
            .collect()
    }
}

impl RecordStore for MemoryStore {
    fn count(&self, tenant_id: &str, source: RecordSource) -> StoreResult<u64> {
        self.counts.set(self.counts.get() + 1);
        if self.fail_count {
            return Err(store_failure());
        }
        Ok(self
            .records
            .borrow()
            .iter()
            .filter(|(tenant, candidate)| tenant == tenant_id && candidate.source() == source)
            .count() as u64)
    }

    fn fetch_oldest(
        &self,
        tenant_id: &str,
        source: RecordSource,
        limit: usize,
    ) -> StoreResult<Vec<EvictionCandidate>> {
        self.fetches.set(self.fetches.get() + 1);
        let mut rows: Vec<EvictionCandidate> = self
            .records
            .borrow()
            .iter()
            .filter(|(tenant, candidate)| tenant == tenant_id && candidate.source() == source)
            .map(|(_, candidate)| candidate.clone())
            .collect();
        rows.sort();
        rows.truncate(limit);
        Ok(rows)
    }

    fn delete(&self, tenant_id: &str, source: RecordSource, ids: &[RecordId]) -> StoreResult<u64> {
        self.deletes.set(self.deletes.get() + 1);
        if self.fail_delete_for == Some(source) {
            return Err(store_failure());
        }
        let vanished = self.vanish_before_delete.borrow();
        let mut records = self.records.borrow_mut();
        records.retain(|(tenant, candidate)| {
            !(tenant == tenant_id && vanished.contains(&candidate.id))
        });
        let before = records.len();
        records.retain(|(tenant, candidate)| {
            !(tenant == tenant_id && candidate.source() == source && ids.contains(&candidate.id))
        });
        Ok((before - records.len()) as u64)
    }
}

impl TenantPlanProvider for MemoryStore {
    fn get_plan(&self, tenant_id: &str) -> StoreResult<Option<PlanTier>> {
        Ok(self.plans.get(tenant_id).cloned())
    }
}

pub fn store_failure() -> DbError {
    DbError::Sqlite(rusqlite::Error::InvalidQuery)
}

pub fn minute(offset: i64) -> DateTime<Utc> {
    let base = Utc
        .with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .expect("base timestamp");
    base + Duration::minutes(offset)
}
