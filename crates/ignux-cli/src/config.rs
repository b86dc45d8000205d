//! Persistent CLI configuration and effective settings.
//!
//! Precedence for every value: command-line flag, then environment, then
//! `cli-config.json`, then the library default.

use std::path::{Path, PathBuf};

use ignux_core::config::{
    ENV_API_BASE_URL, ENV_CACHE_NAMESPACE, ENV_CONTENT_API_URL, ENV_HTTP_TIMEOUT_SECS,
};
use ignux_core::util::normalize_text_option;
use ignux_core::{ClientConfig, SyncOptions};
use serde::{Deserialize, Serialize};

use crate::cli::GlobalArgs;
use crate::error::CliError;

const CONFIG_FILE_NAME: &str = "cli-config.json";
const CACHE_FILE_NAME: &str = "content-cache.json";
const ENV_CACHE_PATH: &str = "IGNUX_CACHE_PATH";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub content_api_url: Option<String>,
    #[serde(default)]
    pub cache_namespace: Option<String>,
}

const fn default_config_version() -> u32 {
    1
}

pub fn default_config_path() -> Result<PathBuf, CliError> {
    dirs::config_dir()
        .map(|dir| dir.join("ignux").join(CONFIG_FILE_NAME))
        .ok_or_else(|| CliError::Config("Failed to resolve CLI config directory".to_string()))
}

pub fn default_cache_path() -> Result<PathBuf, CliError> {
    dirs::cache_dir()
        .map(|dir| dir.join("ignux").join(CACHE_FILE_NAME))
        .ok_or_else(|| CliError::Config("Failed to resolve CLI cache directory".to_string()))
}

impl CliConfig {
    pub fn load() -> Result<Self, CliError> {
        Self::load_from_path(&default_config_path()?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Ok(Self {
                version: default_config_version(),
                ..Self::default()
            });
        }

        let raw = std::fs::read_to_string(path).map_err(|error| {
            CliError::Config(format!(
                "Failed to read config at {}: {error}",
                path.display()
            ))
        })?;
        let mut config = serde_json::from_str::<Self>(&raw).map_err(|error| {
            CliError::Config(format!(
                "Failed to parse config at {}: {error}",
                path.display()
            ))
        })?;
        config.normalize();
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, CliError> {
        let path = default_config_path()?;
        self.save_to_path(&path)?;
        Ok(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), CliError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                CliError::Config(format!(
                    "Failed to create config directory {}: {error}",
                    parent.display()
                ))
            })?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        let serialized = serde_json::to_string_pretty(&normalized)?;
        std::fs::write(path, serialized).map_err(|error| {
            CliError::Config(format!(
                "Failed to write config at {}: {error}",
                path.display()
            ))
        })
    }

    /// Stored value for an `IGNUX_*` setting name.
    fn value_for(&self, name: &str) -> Option<String> {
        match name {
            ENV_API_BASE_URL => self.api_base_url.clone(),
            ENV_CONTENT_API_URL => self.content_api_url.clone(),
            ENV_CACHE_NAMESPACE => self.cache_namespace.clone(),
            _ => None,
        }
    }

    fn normalize(&mut self) {
        self.api_base_url = normalize_text_option(self.api_base_url.take());
        self.content_api_url = normalize_text_option(self.content_api_url.take());
        self.cache_namespace = normalize_text_option(self.cache_namespace.take());
    }
}

/// Effective settings for one CLI invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub client: ClientConfig,
    pub sync: SyncOptions,
    pub cache_path: PathBuf,
}

impl Settings {
    pub fn load(global: &GlobalArgs) -> Result<Self, CliError> {
        let config = CliConfig::load()?;
        Self::resolve(global, &config, |name| std::env::var(name).ok())
    }

    pub fn resolve(
        global: &GlobalArgs,
        config: &CliConfig,
        env_lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, CliError> {
        let lookup = |name: &str| {
            let flag = match name {
                ENV_API_BASE_URL => global.api_url.clone(),
                ENV_CONTENT_API_URL => global.content_url.clone(),
                _ => None,
            };
            normalize_text_option(flag)
                .or_else(|| normalize_text_option(env_lookup(name)))
                .or_else(|| config.value_for(name))
        };

        let client = ClientConfig::from_lookup(&lookup)?;
        let mut sync = SyncOptions::from_lookup(&lookup)?;
        if global.offline {
            sync.remote_base_url = None;
        }

        let cache_path = match global
            .cache_path
            .clone()
            .or_else(|| env_lookup(ENV_CACHE_PATH).map(PathBuf::from))
        {
            Some(path) => path,
            None => default_cache_path()?,
        };

        Ok(Self {
            client,
            sync,
            cache_path,
        })
    }

    /// Human-readable summary for `config show`.
    pub fn describe(&self) -> Vec<String> {
        vec![
            format!("api_base_url     {}", self.client.base_url),
            format!(
                "content_api_url  {}",
                self.sync
                    .remote_base_url
                    .as_deref()
                    .unwrap_or("(none, cache-only)")
            ),
            format!("cache_namespace  {}", self.sync.namespace),
            format!("cache_path       {}", self.cache_path.display()),
            format!(
                "timeout          {}s (set {ENV_HTTP_TIMEOUT_SECS} to change)",
                self.client.timeout.as_secs()
            ),
        ]
    }
}
