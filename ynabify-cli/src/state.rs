use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$YNABIFY_HOME`, or `~/.ynabify`.
pub fn ynabify_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("YNABIFY_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".ynabify"))
}

pub fn ensure_ynabify_home() -> Result<PathBuf> {
    let dir = ynabify_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
