//! Error types for the AI image generation client.

use thiserror::Error;

/// Errors that can occur when generating a design image.
#[derive(Debug, Error)]
pub enum AiError {
    /// The configured provider requires a credential that is not set.
    #[error("Missing {0} for AI image generation.")]
    MissingCredential(&'static str),

    /// The configured provider identifier is not usable.
    #[error("{0}")]
    UnsupportedProvider(String),

    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider returned a non-success status.
    #[error("{provider} image generation failed ({status}): {message}")]
    Upstream {
        /// Provider name.
        provider: &'static str,
        /// HTTP status code.
        status: u16,
        /// Upstream body text, or the status reason when the body is empty.
        message: String,
    },

    /// The provider responded successfully but without a usable result.
    #[error("{0} image generation returned no URL.")]
    EmptyResponse(&'static str),
}

impl AiError {
    /// Unsupported-provider error for an identifier nothing is wired to.
    #[must_use]
    pub fn unknown_provider(provider: &str) -> Self {
        Self::UnsupportedProvider(format!("Unsupported AI provider: {provider}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_display() {
        let err = AiError::MissingCredential("OPENAI_API_KEY");
        assert_eq!(
            err.to_string(),
            "Missing OPENAI_API_KEY for AI image generation."
        );
    }

    #[test]
    fn test_unknown_provider_display() {
        let err = AiError::unknown_provider("dall-e-9000");
        assert_eq!(err.to_string(), "Unsupported AI provider: dall-e-9000");
    }

    #[test]
    fn test_upstream_display_includes_status_and_body() {
        let err = AiError::Upstream {
            provider: "openai",
            status: 429,
            message: "rate limit".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "openai image generation failed (429): rate limit"
        );
    }
}
