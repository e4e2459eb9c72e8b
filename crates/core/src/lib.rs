//! Domain types and pure decision logic for record quotas.

pub mod admission;
pub mod plans;
pub mod records;
pub mod usage;

use serde::{Deserialize, Serialize};

pub use admission::{
    Admission, AdmittedBatch, DenialCode, LimitExceededResult, SuggestedAction,
    evaluate_admission, limit_exceeded, suggested_actions,
};
pub use plans::{PlanCap, PlanCatalog, PlanError, PlanTier};
pub use records::{EvictionCandidate, RecordId, RecordSource, merge_oldest, partition_by_source};
pub use usage::{CapDecision, EnforcementResult, SourceTally, UsageSnapshot};

/// An account the quota applies to. The plan is owned by billing and only
/// read here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: String,
    pub plan: PlanTier,
    pub created_at: String,
}
