use quota_core::{EvictionCandidate, PlanTier, RecordId, RecordSource};
use quota_db::{Db, DbError};

pub type StoreResult<T> = std::result::Result<T, DbError>;

/// Per-source record access the quota engine needs. Every call is scoped
/// to a single tenant.
pub trait RecordStore {
    fn count(&self, tenant_id: &str, source: RecordSource) -> StoreResult<u64>;

    /// Up to `limit` oldest records of `source`.
    fn fetch_oldest(
        &self,
        tenant_id: &str,
        source: RecordSource,
        limit: usize,
    ) -> StoreResult<Vec<EvictionCandidate>>;

    /// Deletes `ids` from `source`, returning rows actually removed.
    fn delete(&self, tenant_id: &str, source: RecordSource, ids: &[RecordId]) -> StoreResult<u64>;
}

/// Read access to the tenant's current plan tier.
pub trait TenantPlanProvider {
    fn get_plan(&self, tenant_id: &str) -> StoreResult<Option<PlanTier>>;
}

impl RecordStore for Db {
    fn count(&self, tenant_id: &str, source: RecordSource) -> StoreResult<u64> {
        self.count_records(tenant_id, source)
    }

    fn fetch_oldest(
        &self,
        tenant_id: &str,
        source: RecordSource,
        limit: usize,
    ) -> StoreResult<Vec<EvictionCandidate>> {
        self.oldest_records(tenant_id, source, limit)
    }

    fn delete(&self, tenant_id: &str, source: RecordSource, ids: &[RecordId]) -> StoreResult<u64> {
        self.delete_records(tenant_id, source, ids)
    }
}

impl TenantPlanProvider for Db {
    fn get_plan(&self, tenant_id: &str) -> StoreResult<Option<PlanTier>> {
        self.tenant_plan(tenant_id)
    }
}
