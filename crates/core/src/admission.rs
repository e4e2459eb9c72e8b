use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::plans::{PlanCatalog, PlanTier};

/// Remediation a client can offer after a denied write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuggestedAction {
    ImportPartial,
    FilterByDate,
    Upgrade,
    DeleteExisting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DenialCode {
    #[serde(rename = "LIMIT_EXCEEDED")]
    LimitExceeded,
}

/// Structured denial returned to the presentation layer. Field names are
/// part of the wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitExceededResult {
    pub code: DenialCode,
    pub plan: PlanTier,
    pub cap: u64,
    pub used: u64,
    pub remaining: u64,
    pub incoming_count: u64,
    pub suggested_actions: BTreeSet<SuggestedAction>,
    pub upgrade_plans: Vec<PlanTier>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct AdmittedBatch {
    pub plan: PlanTier,
    pub cap: u64,
    pub used: u64,
    pub remaining: u64,
    pub incoming_count: u64,
}

/// Serialized without an envelope: a denial is exactly the
/// [`LimitExceededResult`] object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Admission {
    Admitted(AdmittedBatch),
    LimitExceeded(LimitExceededResult),
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted(_))
    }
}

/// Admission decision over already-resolved inputs. Performs no I/O.
pub fn evaluate_admission(
    catalog: &PlanCatalog,
    plan: &PlanTier,
    cap: u64,
    used: u64,
    incoming_count: u64,
) -> Admission {
    let remaining = cap.saturating_sub(used);
    if incoming_count <= remaining {
        return Admission::Admitted(AdmittedBatch {
            plan: plan.clone(),
            cap,
            used,
            remaining,
            incoming_count,
        });
    }
    Admission::LimitExceeded(limit_exceeded(
        catalog,
        plan,
        cap,
        used,
        remaining,
        incoming_count,
    ))
}

pub fn limit_exceeded(
    catalog: &PlanCatalog,
    plan: &PlanTier,
    cap: u64,
    used: u64,
    remaining: u64,
    incoming_count: u64,
) -> LimitExceededResult {
    let upgrade_plans = catalog.upgrades_above(cap);
    LimitExceededResult {
        code: DenialCode::LimitExceeded,
        plan: plan.clone(),
        cap,
        used,
        remaining,
        incoming_count,
        suggested_actions: suggested_actions(remaining, &upgrade_plans),
        upgrade_plans,
    }
}

pub fn suggested_actions(remaining: u64, upgrade_plans: &[PlanTier]) -> BTreeSet<SuggestedAction> {
    let mut actions = BTreeSet::from([SuggestedAction::DeleteExisting, SuggestedAction::FilterByDate]);
    if remaining > 0 {
        actions.insert(SuggestedAction::ImportPartial);
    }
    if !upgrade_plans.is_empty() {
        actions.insert(SuggestedAction::Upgrade);
    }
    actions
}
