//! AI image generation client.
//!
//! Turns a prompt + style + color preferences into a print-ready design image
//! URL. The provider is selected by configuration:
//!
//! - `AI_PROVIDER=openai` (default) - `OpenAI` Images API, requires
//!   `OPENAI_API_KEY`
//! - `AI_PROVIDER=gemini` - recognized but not wired yet
//!
//! One outbound request per generation; no retry and no streaming.

mod error;
mod openai;
pub mod prompt;

pub use error::AiError;
pub use prompt::compose_prompt;

use std::sync::Arc;
use std::time::Duration;

use tracing::instrument;

use crate::config::{AiConfig, OpenAiConfig};

/// Input for a design generation call.
#[derive(Debug, Clone)]
pub struct GenerationInput {
    /// The user's prompt (already trimmed and validated non-trivial).
    pub prompt: String,
    /// Optional style hint.
    pub style: Option<String>,
    /// Optional ordered color preferences.
    pub colors: Option<Vec<String>>,
}

/// A successfully generated image.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    /// URL of the generated image.
    pub url: String,
    /// Provider that produced it.
    pub provider: String,
    /// Model used, when the provider reports one.
    pub model: Option<String>,
}

/// Image generation client.
///
/// Holds the provider selection and credentials; the HTTP client is shared
/// across calls.
#[derive(Clone)]
pub struct ImageClient {
    inner: Arc<ImageClientInner>,
}

struct ImageClientInner {
    http: reqwest::Client,
    provider: String,
    openai: Option<OpenAiConfig>,
}

impl ImageClient {
    /// Create a new image generation client.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created. This should never happen
    /// under normal circumstances as we use standard TLS configuration.
    #[must_use]
    pub fn new(config: &AiConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            inner: Arc::new(ImageClientInner {
                http,
                provider: config.provider.clone(),
                openai: config.openai.clone(),
            }),
        }
    }

    /// The configured provider identifier.
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.inner.provider
    }

    /// Generate a design image.
    ///
    /// # Errors
    ///
    /// - `AiError::MissingCredential` when the selected provider's credential
    ///   is not configured
    /// - `AiError::UnsupportedProvider` when the provider identifier is
    ///   unknown or not wired
    /// - `AiError::Upstream` / `AiError::EmptyResponse` / `AiError::Http` on
    ///   provider failures
    #[instrument(skip(self, input), fields(provider = %self.inner.provider))]
    pub async fn generate(&self, input: &GenerationInput) -> Result<GeneratedImage, AiError> {
        match self.inner.provider.as_str() {
            "openai" => {
                let config = self
                    .inner
                    .openai
                    .as_ref()
                    .ok_or(AiError::MissingCredential("OPENAI_API_KEY"))?;
                openai::generate(&self.inner.http, config, input).await
            }
            "gemini" => Err(AiError::UnsupportedProvider(
                "AI_PROVIDER=gemini is not wired yet. Set AI_PROVIDER=openai and provide OPENAI_API_KEY."
                    .to_string(),
            )),
            other => Err(AiError::unknown_provider(other)),
        }
    }
}
