//! Configuration loading and model factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use leiturapro_core::traits::GenerativeModel;

use crate::error::ConfigError;
use crate::gemini::{GeminiProvider, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};

/// Environment variables that override `[gemini].api_key`, first match wins.
pub const API_KEY_ENV_VARS: [&str; 3] = ["LEITURAPRO_API_KEY", "GEMINI_API_KEY", "API_KEY"];

/// Gemini backend settings.
///
/// Note: Custom Debug impl masks the API key to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: None,
            model: default_model(),
            timeout_secs: default_timeout(),
        }
    }
}

impl GeminiConfig {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Top-level leiturapro configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeituraproConfig {
    #[serde(default)]
    pub gemini: GeminiConfig,
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    expand_vars(s, |name| std::env::var(name).ok())
}

fn expand_vars<F>(s: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        result.push_str(&lookup(&rest[start + 2..start + len]).unwrap_or_default());
        rest = &rest[start + len + 1..];
    }
    result.push_str(rest);
    result
}

/// Replace the API key with the first non-empty override found by `lookup`.
fn apply_env_overrides<F>(config: &mut LeituraproConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.trim().is_empty())
    {
        config.gemini.api_key = key;
    }
}

/// Load config from an explicit path, or search the well-known paths:
///
/// 1. `leiturapro.toml` in the current directory
/// 2. `~/.config/leiturapro/config.toml`
///
/// Environment variable overrides: `LEITURAPRO_API_KEY`, `GEMINI_API_KEY`, `API_KEY`.
pub fn load_config_from(path: Option<&Path>) -> Result<LeituraproConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("leiturapro.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<LeituraproConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => LeituraproConfig::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());

    config.gemini.api_key = resolve_env_vars(&config.gemini.api_key);
    config.gemini.base_url = config.gemini.base_url.as_deref().map(resolve_env_vars);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("leiturapro"))
}

/// Create the configured model backend.
///
/// Fails with [`ConfigError::MissingApiKey`] when no key is configured.
pub fn create_model(config: &GeminiConfig) -> Result<Arc<dyn GenerativeModel>> {
    if !config.has_api_key() {
        return Err(ConfigError::MissingApiKey.into());
    }
    let provider = GeminiProvider::new(
        config.api_key.trim(),
        config.base_url.clone(),
        config.timeout_secs,
    )?
    .with_default_model(config.model.clone());
    Ok(Arc::new(provider))
}
