use std::fs;
use std::path::{Path, PathBuf};

use quota_app::{AppConfig, AppPaths};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_caps_path: Option<PathBuf>,
    pub log_json: bool,
}

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub dir: PathBuf,
    pub file: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: CliConfig,
    pub paths: ConfigPaths,
    pub created: bool,
}

impl ConfigLoad {
    /// Engine paths for this run. `db_override` wins over `db_path`, which
    /// wins over the data directory default. The plan catalog override is
    /// read from `plan_caps_path` only.
    pub fn app_config(&self, db_override: Option<PathBuf>) -> AppConfig {
        let paths = AppPaths::new(self.paths.dir.clone());
        AppConfig {
            db_path: db_override
                .or_else(|| self.config.db_path.clone())
                .unwrap_or(paths.db_path),
            plan_caps_path: self.config.plan_caps_path.clone(),
        }
    }
}

pub fn load_or_create(dir: &Path, explicit_file: Option<&Path>) -> Result<ConfigLoad, String> {
    let file = explicit_file
        .map(Path::to_path_buf)
        .unwrap_or_else(|| dir.join(CONFIG_FILE_NAME));
    let dir = file
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| dir.to_path_buf());
    fs::create_dir_all(&dir)
        .map_err(|err| format!("create config dir {}: {}", dir.display(), err))?;
    let paths = ConfigPaths { dir, file };

    if paths.file.exists() {
        let contents = fs::read_to_string(&paths.file)
            .map_err(|err| format!("read config {}: {}", paths.file.display(), err))?;
        let config: CliConfig = toml::from_str(&contents)
            .map_err(|err| format!("parse config {}: {}", paths.file.display(), err))?;
        return Ok(ConfigLoad {
            config,
            paths,
            created: false,
        });
    }

    let config = CliConfig::default();
    let contents =
        toml::to_string_pretty(&config).map_err(|err| format!("serialize config: {}", err))?;
    fs::write(&paths.file, contents)
        .map_err(|err| format!("write config {}: {}", paths.file.display(), err))?;

    Ok(ConfigLoad {
        config,
        paths,
        created: true,
    })
}
