// src/config/mod.rs
//! Layered configuration: defaults, then `docgen.toml`, then environment,
//! then command-line overrides applied by the binary.

pub mod io;
pub mod types;

pub use self::types::{Config, GenerationConfig, OutputConfig};
use crate::error::Result;
use std::path::Path;
use std::time::Duration;

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_MODEL: &str = "OPENAI_MODEL";
pub const ENV_API_BASE: &str = "OPENAI_BASE";

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `docgen.toml` from `dir` and applies the process environment.
    ///
    /// # Errors
    /// Returns error if the config file is unreadable or malformed.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut config = io::load_toml_config(dir)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Overrides generation settings from environment-style lookups.
    /// Empty values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(key) = get(ENV_API_KEY) {
            self.generation.api_key = Some(key);
        }
        if let Some(model) = get(ENV_MODEL) {
            self.generation.model = model;
        }
        if let Some(base) = get(ENV_API_BASE) {
            self.generation.api_base = base;
        }
    }
}

impl GenerationConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `<base>/chat/completions`, tolerant of a trailing slash on the base.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}
