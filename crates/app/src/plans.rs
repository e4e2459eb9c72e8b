use std::fs;
use std::path::Path;

use quota_core::PlanCatalog;
use tracing::info;

use crate::error::Result;

/// Loads the plan catalog: the file at `override_path` when one is
/// configured, the built-in table otherwise. A missing or invalid override
/// is an error.
pub fn load_plan_catalog(override_path: Option<&Path>) -> Result<PlanCatalog> {
    let catalog = match override_path {
        Some(path) => load_plan_catalog_file(path)?,
        None => PlanCatalog::builtin()?,
    };
    match override_path {
        Some(path) => info!(
            path = %path.display(),
            version = catalog.version(),
            "plan catalog loaded from file"
        ),
        None => info!(version = catalog.version(), "built-in plan catalog loaded"),
    }
    Ok(catalog)
}

pub fn load_plan_catalog_file(path: &Path) -> Result<PlanCatalog> {
    let data = fs::read_to_string(path)?;
    Ok(PlanCatalog::from_json(&data)?)
}
