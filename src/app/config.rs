use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_USER_AGENT, HTTP_REQUEST_TIMEOUT_SECS};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote API configuration
    #[serde(default)]
    pub api: ApiConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL the resource paths are appended to
    pub base_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: HTTP_REQUEST_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Load configuration from multiple sources
pub fn load_config() -> Result<Config> {
    let global_config = get_config_dir().map(|dir| dir.join("config.toml"));
    let local_config = PathBuf::from(".pokedex/config.toml");

    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    // Add global config if it exists
    if let Some(global_config) = global_config.filter(|p| p.exists()) {
        figment = figment.merge(Toml::file(global_config));
    }

    // Add local config if it exists
    if local_config.exists() {
        figment = figment.merge(Toml::file(&local_config));
    }

    // Add environment variables (POKEDEX_ prefix, `__` for nesting)
    figment = figment.merge(Env::prefixed("POKEDEX_").split("__"));

    figment.extract().context("Failed to load configuration")
}

/// Load configuration from a single TOML file given on the command line
pub fn load_config_from(path: &Path) -> Result<Config> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&toml_str)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

/// Get the configuration directory, if the platform has one
pub fn get_config_dir() -> Option<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "pokedex") {
        Some(proj_dirs.config_dir().to_path_buf())
    } else {
        // Fallback to home directory
        std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .ok()
            .map(|home| PathBuf::from(home).join(".config").join("pokedex"))
    }
}
