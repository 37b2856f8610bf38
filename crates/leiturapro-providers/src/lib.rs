//! leiturapro-providers: generative-model backends.
//!
//! Implements the `GenerativeModel` trait for Google Gemini, plus in-process
//! mock models for tests, and the configuration that selects between them.

pub mod config;
pub mod error;
pub mod gemini;
pub mod mock;

pub use config::{create_model, load_config_from, GeminiConfig, LeituraproConfig};
pub use error::{ConfigError, ProviderError};
