//! Shopify Admin API GraphQL client.
//!
//! This module provides a client for the Admin API mutations the app needs.
//! Requests authenticate per shop: the caller's App Bridge session token is
//! exchanged for an offline Admin API access token (OAuth token exchange
//! grant), which is cached in-process per shop.
//!
//! The two mutations used here are small fixed documents sent as raw GraphQL
//! with typed serde responses; the execution envelope (`data`/`errors`,
//! rate-limit and auth handling) is shared by [`AdminClient::execute`].

mod products;

pub use products::{AttachedMedia, CreatedProduct, MediaImageDetails};

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::instrument;

use printmint_core::ShopDomain;

use crate::config::ShopifyAppConfig;

/// Offline access tokens are valid until uninstall; refresh daily anyway so a
/// reinstalled shop picks up a fresh token without a restart.
const TOKEN_CACHE_TTL: Duration = Duration::from_secs(23 * 60 * 60);
const TOKEN_CACHE_CAPACITY: u64 = 10_000;

const TOKEN_EXCHANGE_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:token-exchange";
const SESSION_TOKEN_TYPE: &str = "urn:ietf:params:oauth:token-type:id_token";
const OFFLINE_TOKEN_TYPE: &str = "urn:shopify:params:oauth:token-type:offline-access-token";

/// Errors that can occur when interacting with the Shopify Admin API.
#[derive(Debug, Error)]
pub enum AdminShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// The mutation reported user-facing field errors.
    #[error("{0}")]
    UserError(String),

    /// A successful-looking response was missing the expected resource.
    #[error("{0}")]
    MissingResource(String),

    /// Session token could not be exchanged for an access token.
    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

/// A GraphQL error returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query document.
    #[serde(default)]
    pub locations: Vec<GraphQLErrorLocation>,
    /// Response path the error applies to.
    #[serde(default)]
    pub path: Vec<serde_json::Value>,
}

/// Location of a GraphQL error in the query document.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLErrorLocation {
    /// Line number (1-based).
    pub line: i64,
    /// Column number (1-based).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// GraphQL response wrapper.
#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLError>>,
}

/// Access token response from the token exchange endpoint.
#[derive(Debug, Deserialize)]
struct TokenExchangeResponse {
    access_token: String,
    #[allow(dead_code)]
    scope: Option<String>,
}

/// Shopify Admin API GraphQL client.
///
/// One client serves every installed shop: per-shop access tokens are
/// obtained by exchanging the request's session token and cached.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    api_key: String,
    api_secret: String,
    api_version: String,
    /// Per-shop access token cache.
    tokens: Cache<String, String>,
}

impl AdminClient {
    /// Create a new Admin API client.
    #[must_use]
    pub fn new(config: &ShopifyAppConfig) -> Self {
        let tokens = Cache::builder()
            .max_capacity(TOKEN_CACHE_CAPACITY)
            .time_to_live(TOKEN_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(AdminClientInner {
                client: reqwest::Client::new(),
                api_key: config.api_key.clone(),
                api_secret: config.api_secret.expose_secret().to_string(),
                api_version: config.api_version.clone(),
                tokens,
            }),
        }
    }

    // =========================================================================
    // Token exchange
    // =========================================================================

    /// Get a cached Admin API access token for the shop, exchanging the
    /// session token when none is cached.
    ///
    /// # Errors
    ///
    /// Returns `AdminShopifyError::TokenExchange` if Shopify rejects the
    /// exchange, or `AdminShopifyError::Http` on transport failure.
    async fn access_token(
        &self,
        shop: &ShopDomain,
        session_token: &str,
    ) -> Result<String, AdminShopifyError> {
        if let Some(token) = self.inner.tokens.get(shop.as_str()).await {
            return Ok(token);
        }

        let token = self.exchange_session_token(shop, session_token).await?;
        self.inner
            .tokens
            .insert(shop.as_str().to_string(), token.clone())
            .await;

        Ok(token)
    }

    /// Exchange a verified session token for an offline access token.
    #[instrument(skip(self, session_token), fields(shop = %shop))]
    async fn exchange_session_token(
        &self,
        shop: &ShopDomain,
        session_token: &str,
    ) -> Result<String, AdminShopifyError> {
        let url = format!("https://{}/admin/oauth/access_token", shop.as_str());

        let body = serde_json::json!({
            "client_id": self.inner.api_key,
            "client_secret": self.inner.api_secret,
            "grant_type": TOKEN_EXCHANGE_GRANT_TYPE,
            "subject_token": session_token,
            "subject_token_type": SESSION_TOKEN_TYPE,
            "requested_token_type": OFFLINE_TOKEN_TYPE,
        });

        let response = self.inner.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AdminShopifyError::TokenExchange(text));
        }

        let token: TokenExchangeResponse = response.json().await?;
        Ok(token.access_token)
    }

    // =========================================================================
    // GraphQL Execution
    // =========================================================================

    /// Execute a GraphQL operation against a shop's Admin API.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, rate limiting, auth failure,
    /// GraphQL errors, or a missing `data` payload.
    async fn execute<R: DeserializeOwned>(
        &self,
        shop: &ShopDomain,
        session_token: &str,
        query: &'static str,
        variables: serde_json::Value,
    ) -> Result<R, AdminShopifyError> {
        let access_token = self.access_token(shop, session_token).await?;
        let endpoint = format!(
            "https://{}/admin/api/{}/graphql.json",
            shop.as_str(),
            self.inner.api_version
        );

        let body = serde_json::json!({
            "query": query,
            "variables": variables,
        });

        let response = self
            .inner
            .client
            .post(&endpoint)
            .header("X-Shopify-Access-Token", &access_token)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(AdminShopifyError::RateLimited(retry_after));
        }

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            // Drop the cached token so the next request re-exchanges.
            self.inner.tokens.invalidate(shop.as_str()).await;
            return Err(AdminShopifyError::Unauthorized(
                "Invalid or expired access token".to_string(),
            ));
        }

        let graphql_response: GraphQLResponse<R> = response.json().await?;

        if let Some(errors) = graphql_response.errors
            && !errors.is_empty()
        {
            return Err(AdminShopifyError::GraphQL(errors));
        }

        graphql_response.data.ok_or_else(|| {
            AdminShopifyError::GraphQL(vec![GraphQLError {
                message: "No data in response".to_string(),
                locations: vec![],
                path: vec![],
            }])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_graphql_errors() {
        let errors = vec![
            GraphQLError {
                message: "first".to_string(),
                locations: vec![],
                path: vec![],
            },
            GraphQLError {
                message: "second".to_string(),
                locations: vec![],
                path: vec![],
            },
        ];
        assert_eq!(format_graphql_errors(&errors), "first; second");
    }

    #[test]
    fn test_graphql_response_deserialization() {
        let json = r#"{
            "data": null,
            "errors": [{"message": "Throttled", "locations": [{"line": 1, "column": 2}]}]
        }"#;

        let response: GraphQLResponse<serde_json::Value> =
            serde_json::from_str(json).expect("deserialize");
        assert!(response.data.is_none());
        let errors = response.errors.expect("errors");
        assert_eq!(errors.first().expect("first").message, "Throttled");
    }

    #[test]
    fn test_admin_client_is_clone_send_sync() {
        fn assert_clone<T: Clone>() {}
        fn assert_send_sync<T: Send + Sync>() {}
        assert_clone::<AdminClient>();
        assert_send_sync::<AdminClient>();
    }
}
