// src/config/io.rs
use super::types::Config;
use crate::error::{DocGenError, Result};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "docgen.toml";

/// Reads `docgen.toml` from `dir`. A missing file yields defaults.
///
/// # Errors
/// Returns error if the file exists but cannot be read or parsed.
pub fn load_toml_config(dir: &Path) -> Result<Config> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(&path).map_err(|e| DocGenError::io(e, &path))?;
    parse_toml(&content)
}

/// Parses the contents of a `docgen.toml`.
///
/// # Errors
/// Returns a config error describing the TOML problem.
pub fn parse_toml(content: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| DocGenError::Config(format!("{CONFIG_FILE}: {e}")))
}
