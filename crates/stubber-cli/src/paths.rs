//! Snapshot path resolution.

use std::path::PathBuf;

pub const SNAPSHOT_FILE_NAME: &str = "configuration.json";

pub fn default_snapshot_path() -> anyhow::Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    Ok(config_dir.join("stubber").join(SNAPSHOT_FILE_NAME))
}
