use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

const BUILTIN_CATALOG: &str = include_str!("../plan-caps.json");

#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("unknown plan tier: {0}")]
    UnknownPlan(String),
    #[error("invalid plan catalog: {0}")]
    InvalidCatalog(String),
    #[error("plan catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlanError>;

/// Subscription tier name as stored on the tenant.
///
/// Tiers are open-ended; whether a tier is known is decided by the
/// [`PlanCatalog`], never by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PlanTier(String);

impl PlanTier {
    pub const FREE: &'static str = "free";
    pub const PRO: &'static str = "pro";
    pub const MAX: &'static str = "max";

    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_ascii_lowercase())
    }

    pub fn free() -> Self {
        Self::new(Self::FREE)
    }

    pub fn pro() -> Self {
        Self::new(Self::PRO)
    }

    pub fn max() -> Self {
        Self::new(Self::MAX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlanTier {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PlanTier {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<PlanTier> for String {
    fn from(value: PlanTier) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanCap {
    pub plan: PlanTier,
    pub cap: u64,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    version: u32,
    plans: Vec<PlanCap>,
}

/// Versioned plan → cap table shared by enforcement and anything that
/// displays limits. Plans are kept in ascending cap order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanCatalog {
    version: u32,
    plans: Vec<PlanCap>,
}

impl PlanCatalog {
    pub fn new(version: u32, mut plans: Vec<PlanCap>) -> Result<Self> {
        if plans.is_empty() {
            return Err(PlanError::InvalidCatalog("no plans defined".to_string()));
        }
        let mut seen = HashSet::new();
        for entry in &plans {
            if entry.plan.as_str().is_empty() {
                return Err(PlanError::InvalidCatalog("empty plan name".to_string()));
            }
            if entry.cap == 0 {
                return Err(PlanError::InvalidCatalog(format!(
                    "plan {} has a zero cap",
                    entry.plan
                )));
            }
            if !seen.insert(entry.plan.clone()) {
                return Err(PlanError::InvalidCatalog(format!(
                    "plan {} defined more than once",
                    entry.plan
                )));
            }
        }
        plans.sort_by(|a, b| a.cap.cmp(&b.cap).then_with(|| a.plan.cmp(&b.plan)));
        Ok(Self { version, plans })
    }

    /// The catalog compiled into the binary (`plan-caps.json`).
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(data)?;
        Self::new(file.version, file.plans)
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn plans(&self) -> &[PlanCap] {
        &self.plans
    }

    /// Cap for `plan`. An unknown tier is a configuration defect and fails
    /// instead of falling back to another tier's cap.
    pub fn get_cap(&self, plan: &PlanTier) -> Result<u64> {
        self.plans
            .iter()
            .find(|entry| entry.plan == *plan)
            .map(|entry| entry.cap)
            .ok_or_else(|| PlanError::UnknownPlan(plan.to_string()))
    }

    /// Tiers whose cap is strictly above `cap`, ascending.
    pub fn upgrades_above(&self, cap: u64) -> Vec<PlanTier> {
        self.plans
            .iter()
            .filter(|entry| entry.cap > cap)
            .map(|entry| entry.plan.clone())
            .collect()
    }
}
