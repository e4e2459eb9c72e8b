//! Quota enforcement and eviction over a [`RecordStore`].
//!
//! Components are thin borrows of the store so a caller can build them per
//! request. [`QuotaEngine`] bundles them behind the operations exposed to
//! the request and admin layers.

mod executor;
mod gate;
mod selector;
mod usage;

use quota_core::{
    Admission, CapDecision, EnforcementResult, EvictionCandidate, PlanCatalog, PlanTier,
    UsageSnapshot,
};

use crate::error::Result;
use crate::store::{RecordStore, TenantPlanProvider};

pub use executor::EvictionExecutor;
pub use gate::CapacityGate;
pub use selector::EvictionSelector;
pub use usage::UsageCounter;

pub struct QuotaEngine<'a, S: ?Sized, P: ?Sized> {
    store: &'a S,
    plans: &'a P,
    catalog: &'a PlanCatalog,
}

impl<'a, S, P> QuotaEngine<'a, S, P>
where
    S: RecordStore + ?Sized,
    P: TenantPlanProvider + ?Sized,
{
    pub fn new(store: &'a S, plans: &'a P, catalog: &'a PlanCatalog) -> Self {
        Self {
            store,
            plans,
            catalog,
        }
    }

    pub fn get_usage(&self, tenant_id: &str) -> Result<UsageSnapshot> {
        UsageCounter::new(self.store).get_usage(tenant_id)
    }

    pub fn get_cap(&self, plan: &PlanTier) -> Result<u64> {
        Ok(self.catalog.get_cap(plan)?)
    }

    pub fn get_remaining_capacity(&self, tenant_id: &str) -> Result<u64> {
        self.gate().remaining_capacity(tenant_id)
    }

    pub fn calculate_deletions_for_cap(&self, tenant_id: &str, target_cap: i64) -> Result<CapDecision> {
        EvictionSelector::new(self.store).calculate_deletions_for_cap(tenant_id, target_cap)
    }

    pub fn get_oldest_candidates(&self, tenant_id: &str, count: i64) -> Result<Vec<EvictionCandidate>> {
        EvictionSelector::new(self.store).get_oldest_candidates(tenant_id, count)
    }

    pub fn enforce_cap(&self, tenant_id: &str, target_cap: i64) -> Result<EnforcementResult> {
        EvictionExecutor::new(self.store).enforce_cap(tenant_id, target_cap)
    }

    pub fn check_admission(&self, tenant_id: &str, incoming_count: u64) -> Result<Admission> {
        self.gate().check_admission(tenant_id, incoming_count)
    }

    fn gate(&self) -> CapacityGate<'a, S, P> {
        CapacityGate::new(self.store, self.plans, self.catalog)
    }
}
