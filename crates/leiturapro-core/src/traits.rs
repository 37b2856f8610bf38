//! Trait definitions for generative-model backends.
//!
//! Implemented by the `leiturapro-providers` crate. Tests implement it with
//! in-process fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Generative model trait
// ---------------------------------------------------------------------------

/// A text-generation backend, optionally grounded by web search.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Human-readable backend name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Model used when a request leaves `model` empty.
    fn default_model(&self) -> &str;

    /// Generate text from a prompt.
    async fn generate(&self, request: &GenerateRequest) -> anyhow::Result<GenerateResponse>;
}

/// Request to generate text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Model identifier; empty means the backend default.
    #[serde(default)]
    pub model: String,
    /// The prompt.
    pub prompt: String,
    /// Allow the model to ground its answer with web search.
    #[serde(default)]
    pub grounded_search: bool,
    /// JSON schema the response text must follow (forces a JSON response).
    #[serde(default)]
    pub response_schema: Option<serde_json::Value>,
    /// Reasoning token budget; `Some(0)` disables extended reasoning.
    #[serde(default)]
    pub thinking_budget: Option<u32>,
}

/// Response from a generation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Concatenated text of the first candidate.
    pub text: String,
    /// Web sources the answer was grounded on.
    #[serde(default)]
    pub sources: Vec<GroundingSource>,
    /// Model that actually generated the response.
    #[serde(default)]
    pub model: String,
    /// Latency in milliseconds.
    #[serde(default)]
    pub latency_ms: u64,
}

/// A cited web reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub uri: String,
    #[serde(default)]
    pub title: Option<String>,
}

impl GroundingSource {
    /// Title when present, otherwise the URI.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.uri)
    }
}

// ---------------------------------------------------------------------------
// JSON extraction
// ---------------------------------------------------------------------------

/// Extract a JSON payload from a model response.
///
/// Handles:
/// - Raw JSON (returned trimmed)
/// - A ```json``` or generic ``` fenced block (first one wins)
/// - A truncated (unclosed) fenced block
pub fn extract_json_block(response: &str) -> &str {
    let trimmed = response.trim();
    if !trimmed.starts_with("```") {
        if let Some(start) = trimmed.find("\n```") {
            return extract_json_block(&trimmed[start + 1..]);
        }
        return trimmed;
    }

    // Skip the opening fence line.
    let body = match trimmed.find('\n') {
        Some(newline) => &trimmed[newline + 1..],
        None => return "",
    };

    match body.find("```") {
        Some(end) => body[..end].trim(),
        None => body.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_raw_json() {
        let input = "  {\"title\": \"A\"}\n";
        assert_eq!(extract_json_block(input), "{\"title\": \"A\"}");
    }

    #[test]
    fn extract_fenced_json() {
        let input = "```json\n{\"title\": \"A\"}\n```";
        assert_eq!(extract_json_block(input), "{\"title\": \"A\"}");
    }

    #[test]
    fn extract_generic_fence_after_prose() {
        let input = "Aqui está:\n```\n{\"a\": 1}\n```\nFim.";
        assert_eq!(extract_json_block(input), "{\"a\": 1}");
    }

    #[test]
    fn extract_truncated_fence() {
        let input = "```json\n{\"title\": \"A\"";
        assert_eq!(extract_json_block(input), "{\"title\": \"A\"");
    }

    #[test]
    fn extract_empty_fence() {
        assert_eq!(extract_json_block("```"), "");
        assert_eq!(extract_json_block(""), "");
    }

    #[test]
    fn source_display_title_falls_back_to_uri() {
        let titled = GroundingSource {
            uri: "https://a.example".into(),
            title: Some("Nova Escola".into()),
        };
        let bare = GroundingSource {
            uri: "https://b.example".into(),
            title: Some("  ".into()),
        };
        assert_eq!(titled.display_title(), "Nova Escola");
        assert_eq!(bare.display_title(), "https://b.example");
    }
}
