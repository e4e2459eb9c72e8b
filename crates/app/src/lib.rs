pub mod app;
pub mod error;
pub mod plans;
pub mod quota;
pub mod services;
pub mod startup;
pub mod store;

pub use app::{AppConfig, AppState};
pub use error::{ApiError, AppError, Result};
pub use plans::{load_plan_catalog, load_plan_catalog_file};
pub use quota::{
    CapacityGate, EvictionExecutor, EvictionSelector, QuotaEngine, UsageCounter,
};
pub use services::{AppServices, QuotaService};
pub use startup::{AppPaths, ensure_app_data_dir};
pub use store::{RecordStore, StoreResult, TenantPlanProvider};
