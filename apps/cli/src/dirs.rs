use std::path::PathBuf;

const CONFIG_DIR_NAME: &str = "quota";

/// `$QUOTA_CONFIG_DIR`, else `$HOME/.config/quota`.
pub fn resolve_config_dir() -> Result<PathBuf, String> {
    if let Ok(dir) = std::env::var("QUOTA_CONFIG_DIR")
        && !dir.trim().is_empty()
    {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").map_err(|err| format!("resolve HOME: {}", err))?;
    Ok(PathBuf::from(home).join(".config").join(CONFIG_DIR_NAME))
}
