//! Provider and configuration error types.

use thiserror::Error;

pub use leiturapro_core::error::ProviderError;

/// Errors raised while turning configuration into a usable backend.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No API key in the config file or the environment.
    #[error(
        "no API key configured: set GEMINI_API_KEY (or LEITURAPRO_API_KEY) \
         or [gemini].api_key in leiturapro.toml"
    )]
    MissingApiKey,
}
