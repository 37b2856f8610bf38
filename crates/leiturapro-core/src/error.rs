//! Error types for the classroom store, the AI advisor, and model providers.
//!
//! `ProviderError` lives here rather than in `leiturapro-providers` so the
//! advisor can classify failures without string matching.

use thiserror::Error;

/// A form-boundary error. Raised before any store mutation is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was empty.
    #[error("required field is missing: {0}")]
    MissingField(&'static str),

    /// A numeric field fell outside its allowed range.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// A reading level label that is not one of the five canonical labels.
    #[error("unknown reading level: {0}")]
    UnknownReadingLevel(String),
}

/// Errors raised by the entity store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Update or delete targeted an identifier that is not in the collection.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// A student referenced a class that does not exist.
    #[error("unknown class: {0}")]
    UnknownClass(String),

    /// An assessment referenced a student that does not exist.
    #[error("unknown student: {0}")]
    UnknownStudent(String),

    /// Two roster records share a key.
    #[error("duplicate {kind} key: {key}")]
    DuplicateKey { kind: &'static str, key: String },
}

/// Errors that can occur when interacting with a generative-model provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Authentication failed (invalid API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The requested model was not found.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Returns `true` if this error is permanent and should not be retried.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            ProviderError::AuthenticationFailed(_) | ProviderError::ModelNotFound(_)
        )
    }

    /// Returns the retry-after delay in milliseconds, if applicable.
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            ProviderError::RateLimited { retry_after_ms } => Some(*retry_after_ms),
            _ => None,
        }
    }
}

/// Errors surfaced by the reading-passage generator.
///
/// The narrative analysis path never returns these; it degrades to a fixed
/// fallback message instead.
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The model call itself failed.
    #[error("model request failed: {0}")]
    Provider(#[source] anyhow::Error),

    /// The model answered with no text at all.
    #[error("model returned an empty response")]
    EmptyResponse,

    /// The model answered, but not with the requested JSON shape.
    #[error("malformed passage response: {0}")]
    MalformedPassage(String),
}

impl AdvisorError {
    /// Returns the underlying `ProviderError`, if the failure came from one.
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            AdvisorError::Provider(e) => e.downcast_ref::<ProviderError>(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permanent_provider_errors() {
        assert!(ProviderError::AuthenticationFailed("bad key".into()).is_permanent());
        assert!(ProviderError::ModelNotFound("x".into()).is_permanent());
        assert!(!ProviderError::Timeout(30).is_permanent());
        assert_eq!(
            ProviderError::RateLimited {
                retry_after_ms: 5000
            }
            .retry_after_ms(),
            Some(5000)
        );
    }

    #[test]
    fn advisor_error_exposes_provider_error() {
        let err = AdvisorError::Provider(ProviderError::Timeout(60).into());
        assert!(matches!(
            err.provider_error(),
            Some(ProviderError::Timeout(60))
        ));
        assert!(AdvisorError::EmptyResponse.provider_error().is_none());
    }

    #[test]
    fn validation_converts_into_store_error() {
        let err: StoreError = ValidationError::MissingField("name").into();
        assert_eq!(err.to_string(), "required field is missing: name");
    }
}
