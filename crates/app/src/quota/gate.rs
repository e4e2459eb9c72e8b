use quota_core::{Admission, PlanCatalog, PlanTier, evaluate_admission};
use tracing::info;

use crate::error::{AppError, Result};
use crate::quota::usage::UsageCounter;
use crate::store::{RecordStore, TenantPlanProvider};

/// Admission control run before new records are accepted.
pub struct CapacityGate<'a, S: ?Sized, P: ?Sized> {
    usage: UsageCounter<'a, S>,
    plans: &'a P,
    catalog: &'a PlanCatalog,
}

impl<'a, S, P> CapacityGate<'a, S, P>
where
    S: RecordStore + ?Sized,
    P: TenantPlanProvider + ?Sized,
{
    pub fn new(store: &'a S, plans: &'a P, catalog: &'a PlanCatalog) -> Self {
        Self {
            usage: UsageCounter::new(store),
            plans,
            catalog,
        }
    }

    pub fn check_admission(&self, tenant_id: &str, incoming_count: u64) -> Result<Admission> {
        let used = self.usage.get_usage(tenant_id)?.total;
        let plan = self.tenant_plan(tenant_id)?;
        let cap = self.catalog.get_cap(&plan)?;
        let admission = evaluate_admission(self.catalog, &plan, cap, used, incoming_count);
        if let Admission::LimitExceeded(denial) = &admission {
            info!(
                tenant_id,
                plan = %denial.plan,
                cap = denial.cap,
                used = denial.used,
                incoming_count = denial.incoming_count,
                "admission denied"
            );
        }
        Ok(admission)
    }

    /// `max(0, cap - used)` for the tenant's current plan.
    pub fn remaining_capacity(&self, tenant_id: &str) -> Result<u64> {
        let used = self.usage.get_usage(tenant_id)?.total;
        let plan = self.tenant_plan(tenant_id)?;
        let cap = self.catalog.get_cap(&plan)?;
        Ok(cap.saturating_sub(used))
    }

    fn tenant_plan(&self, tenant_id: &str) -> Result<PlanTier> {
        self.plans
            .get_plan(tenant_id)?
            .ok_or_else(|| AppError::NotFound(format!("tenant not found: {tenant_id}")))
    }
}
