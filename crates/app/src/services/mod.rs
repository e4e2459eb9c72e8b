mod quota;

use std::sync::Arc;

use crate::app::AppConfig;
use crate::error::Result;
use crate::plans::load_plan_catalog;
use quota_db::Db;

pub use quota::QuotaService;

type SharedConfig = Arc<AppConfig>;

/// Service registry for app-level operations.
#[derive(Clone)]
pub struct AppServices {
    pub quota: QuotaService,
}

impl AppServices {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let shared = Arc::new(config.clone());
        let catalog = Arc::new(load_plan_catalog(config.plan_caps_path.as_deref())?);
        Ok(Self {
            quota: QuotaService::new(shared, catalog),
        })
    }
}

fn open_db(config: &SharedConfig) -> Result<Db> {
    Ok(Db::open(&config.db_path)?)
}
