use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::services::AppServices;
use quota_db::Db;

/// Paths and files needed to run the quota engine.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub plan_caps_path: Option<PathBuf>,
}

/// Application state shared by frontends (CLI, request handlers).
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub services: AppServices,
}

impl AppState {
    pub fn new(db_path: PathBuf, plan_caps_path: Option<PathBuf>) -> Result<Self> {
        Self::from_config(AppConfig {
            db_path,
            plan_caps_path,
        })
    }

    pub fn from_config(config: AppConfig) -> Result<Self> {
        let services = AppServices::new(&config)?;
        Ok(Self { config, services })
    }

    pub fn setup_db(&self) -> Result<()> {
        setup_db(&self.config.db_path)
    }

    pub fn initialize(&self) -> Result<()> {
        self.setup_db()
            .map_err(|err| AppError::Message(format!("initialize db: {}", err)))
    }
}

pub fn setup_db(path: &Path) -> Result<()> {
    let mut db = Db::open(path)?;
    db.migrate()?;
    Ok(())
}
