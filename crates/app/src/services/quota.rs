use std::sync::Arc;

use quota_core::{
    Admission, CapDecision, EnforcementResult, EvictionCandidate, PlanCatalog, PlanTier,
    UsageSnapshot,
};
use quota_db::Db;

use crate::error::Result;
use crate::quota::QuotaEngine;
use crate::services::{SharedConfig, open_db};

/// Quota operations addressed by tenant id, each against a fresh
/// connection to the configured database.
#[derive(Clone)]
pub struct QuotaService {
    config: SharedConfig,
    catalog: Arc<PlanCatalog>,
}

impl QuotaService {
    pub(super) fn new(config: SharedConfig, catalog: Arc<PlanCatalog>) -> Self {
        Self { config, catalog }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    fn with_engine<T>(&self, op: impl FnOnce(&QuotaEngine<'_, Db, Db>) -> Result<T>) -> Result<T> {
        let db = self.db()?;
        let engine = QuotaEngine::new(&db, &db, &self.catalog);
        op(&engine)
    }

    pub fn catalog(&self) -> &PlanCatalog {
        &self.catalog
    }

    pub fn get_cap(&self, plan: &str) -> Result<u64> {
        Ok(self.catalog.get_cap(&PlanTier::new(plan))?)
    }

    pub fn get_usage(&self, tenant_id: &str) -> Result<UsageSnapshot> {
        self.with_engine(|engine| engine.get_usage(tenant_id))
    }

    pub fn get_remaining_capacity(&self, tenant_id: &str) -> Result<u64> {
        self.with_engine(|engine| engine.get_remaining_capacity(tenant_id))
    }

    pub fn calculate_deletions_for_cap(&self, tenant_id: &str, target_cap: i64) -> Result<CapDecision> {
        self.with_engine(|engine| engine.calculate_deletions_for_cap(tenant_id, target_cap))
    }

    pub fn get_oldest_candidates(&self, tenant_id: &str, count: i64) -> Result<Vec<EvictionCandidate>> {
        self.with_engine(|engine| engine.get_oldest_candidates(tenant_id, count))
    }

    /// Destructive. Callers must only reach this from an explicit user
    /// action.
    pub fn enforce_cap(&self, tenant_id: &str, target_cap: i64) -> Result<EnforcementResult> {
        self.with_engine(|engine| engine.enforce_cap(tenant_id, target_cap))
    }

    pub fn check_admission(&self, tenant_id: &str, incoming_count: u64) -> Result<Admission> {
        self.with_engine(|engine| engine.check_admission(tenant_id, incoming_count))
    }
}
