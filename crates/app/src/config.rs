//! Application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DATABASE_URL` - `PostgreSQL` connection string
//! - `SHOPIFY_API_KEY` - Shopify app client ID (audience of session tokens)
//! - `SHOPIFY_API_SECRET` - Shopify app client secret (signs session tokens)
//!
//! ## Optional
//! - `APP_HOST` - Bind address (default: 0.0.0.0)
//! - `APP_PORT` - Listen port (default: 3000)
//! - `SHOPIFY_API_VERSION` - Admin API version (default: 2025-07)
//! - `AI_PROVIDER` - Image generation provider (default: openai)
//! - `OPENAI_API_KEY` - `OpenAI` API key; its absence surfaces as a
//!   configuration error at generation time, not at boot
//! - `OPENAI_IMAGE_MODEL` - Image model ID (default: gpt-image-1)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` / `SENTRY_TRACES_SAMPLE_RATE` - Sample rates (default: 1.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_API_VERSION: &str = "2025-07";
const DEFAULT_AI_PROVIDER: &str = "openai";
const DEFAULT_IMAGE_MODEL: &str = "gpt-image-1";

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Shopify app credentials and Admin API settings
    pub shopify: ShopifyAppConfig,
    /// AI image generation settings
    pub ai: AiConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Shopify app configuration.
///
/// Implements `Debug` manually to redact the client secret, which both
/// signs session tokens and authorizes token exchange.
#[derive(Clone)]
pub struct ShopifyAppConfig {
    /// App client ID (public; the `aud` claim of session tokens)
    pub api_key: String,
    /// App client secret (signs session tokens, authorizes token exchange)
    pub api_secret: SecretString,
    /// Admin API version (e.g., 2025-07)
    pub api_version: String,
}

impl std::fmt::Debug for ShopifyAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyAppConfig")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .finish()
    }
}

/// AI image generation configuration.
///
/// The provider selector is read eagerly; provider credentials stay optional
/// so that a misconfigured deployment fails the generate call with a precise
/// error instead of refusing to boot.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Provider identifier (default: "openai")
    pub provider: String,
    /// `OpenAI` credentials, when configured
    pub openai: Option<OpenAiConfig>,
}

/// `OpenAI` Images API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct OpenAiConfig {
    /// `OpenAI` API key
    pub api_key: SecretString,
    /// Image model ID (e.g., gpt-image-1)
    pub model: String,
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = SecretString::from(get_required_env("DATABASE_URL")?);
        let host = get_env_or_default("APP_HOST", "0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("APP_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("APP_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("APP_PORT".to_string(), e.to_string()))?;

        let shopify = ShopifyAppConfig::from_env()?;
        let ai = AiConfig::from_env();
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            database_url,
            host,
            port,
            shopify,
            ai,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Returns a reference to the Shopify app configuration.
    #[must_use]
    pub const fn shopify(&self) -> &ShopifyAppConfig {
        &self.shopify
    }

    /// Returns a reference to the AI configuration.
    #[must_use]
    pub const fn ai(&self) -> &AiConfig {
        &self.ai
    }
}

impl ShopifyAppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: get_required_env("SHOPIFY_API_KEY")?,
            api_secret: get_validated_secret("SHOPIFY_API_SECRET")?,
            api_version: get_env_or_default("SHOPIFY_API_VERSION", DEFAULT_API_VERSION),
        })
    }
}

impl AiConfig {
    /// Load AI configuration from environment.
    ///
    /// The `OpenAI` key is optional here; the generation client reports a
    /// configuration error when it is needed but absent.
    fn from_env() -> Self {
        let provider = get_env_or_default("AI_PROVIDER", DEFAULT_AI_PROVIDER).to_lowercase();

        let openai = get_optional_env("OPENAI_API_KEY").map(|key| {
            if let Err(e) = validate_secret_strength(&key, "OPENAI_API_KEY") {
                tracing::warn!("OPENAI_API_KEY validation warning: {e}");
            }
            OpenAiConfig {
                api_key: SecretString::from(key),
                model: get_env_or_default("OPENAI_IMAGE_MODEL", DEFAULT_IMAGE_MODEL),
            }
        });

        Self { provider, openai }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use the secret issued by the Partner Dashboard."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_entropy_uniform_string_is_zero() {
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_symbols() {
        // "ab" has entropy of 1 bit per char (50% a, 50% b)
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_shannon_entropy_random_looking_string() {
        let entropy = shannon_entropy("aB3$xY9!mK2@nL5#");
        assert!(entropy > 3.3);
    }

    #[test]
    fn test_validate_secret_strength_rejects_placeholders() {
        assert!(validate_secret_strength("your-api-secret-here", "TEST_VAR").is_err());
        assert!(validate_secret_strength("changeme123", "TEST_VAR").is_err());
    }

    #[test]
    fn test_validate_secret_strength_rejects_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InsecureSecret(_, _)
        ));
    }

    #[test]
    fn test_validate_secret_strength_accepts_random_secret() {
        assert!(validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "TEST_VAR").is_ok());
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            shopify: ShopifyAppConfig {
                api_key: "test_client_id".to_string(),
                api_secret: SecretString::from("test_client_secret"),
                api_version: DEFAULT_API_VERSION.to_string(),
            },
            ai: AiConfig {
                provider: "openai".to_string(),
                openai: None,
            },
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_shopify_config_debug_redacts_secret() {
        let config = ShopifyAppConfig {
            api_key: "test_client_id".to_string(),
            api_secret: SecretString::from("super_secret_value"),
            api_version: "2025-07".to_string(),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("test_client_id"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_value"));
    }

    #[test]
    fn test_openai_config_debug_redacts_key() {
        let config = OpenAiConfig {
            api_key: SecretString::from("sk-super-secret"),
            model: DEFAULT_IMAGE_MODEL.to_string(),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("gpt-image-1"));
        assert!(!debug_output.contains("sk-super-secret"));
    }
}
