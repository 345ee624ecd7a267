use anyhow::Result;
use std::path::PathBuf;

pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    let tally_dir = config_dir.join("tally");
    std::fs::create_dir_all(&tally_dir)?;

    Ok(tally_dir)
}

pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.toml"))
}

/// Cached sign-in session (access token + user identity).
pub fn get_session_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("session.json"))
}
