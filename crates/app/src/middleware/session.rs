//! Shopify session-token authentication.
//!
//! Embedded apps authenticate every API request with a short-lived session
//! token minted by App Bridge: an HS256 JWT signed with the app's client
//! secret, whose audience is the app's client ID and whose `dest` claim
//! names the shop. The [`ShopSession`] extractor verifies the token and
//! yields the shop; the raw token is kept for the Admin API token exchange.

use axum::{
    Json,
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use serde_json::json;

use printmint_core::ShopDomain;

use crate::config::ShopifyAppConfig;
use crate::state::AppState;

/// Claims carried by an App Bridge session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionTokenClaims {
    /// Issuer: the shop's admin URL.
    pub iss: String,
    /// Destination: the shop's URL (`https://{shop}`).
    pub dest: String,
    /// Audience: the app's client ID.
    pub aud: String,
    /// Subject: the user ID within the shop.
    pub sub: Option<String>,
    /// Expiry (Unix seconds).
    pub exp: usize,
}

/// Errors that can occur while authenticating a request.
#[derive(Debug, thiserror::Error)]
pub enum SessionTokenError {
    /// No `Authorization` header on the request.
    #[error("Missing Authorization header")]
    MissingHeader,
    /// The header was not of the form `Bearer <token>`.
    #[error("Invalid Authorization header format")]
    MalformedHeader,
    /// Signature, expiry, or audience validation failed.
    #[error("Session token validation failed: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),
    /// The `dest` claim did not name a usable shop domain.
    #[error("Session token has an invalid destination: {0}")]
    BadDestination(String),
}

/// Verify a session token against the app credentials and extract the shop.
///
/// # Errors
///
/// Returns `SessionTokenError::Invalid` when the signature, expiry, or
/// audience check fails, and `SessionTokenError::BadDestination` when the
/// `dest` claim does not parse as a shop domain.
pub fn verify_session_token(
    token: &str,
    config: &ShopifyAppConfig,
) -> Result<(ShopDomain, SessionTokenClaims), SessionTokenError> {
    let decoding_key = DecodingKey::from_secret(config.api_secret.expose_secret().as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[config.api_key.as_str()]);

    let token_data = decode::<SessionTokenClaims>(token, &decoding_key, &validation)?;
    let claims = token_data.claims;

    let shop = ShopDomain::parse(&claims.dest)
        .map_err(|e| SessionTokenError::BadDestination(e.to_string()))?;

    Ok((shop, claims))
}

/// An authenticated shop session.
///
/// Extracting this from a request verifies the App Bridge session token.
/// The raw token is retained because the Admin API client exchanges it for
/// an access token.
#[derive(Debug, Clone)]
pub struct ShopSession {
    /// The authenticated shop.
    pub shop: ShopDomain,
    /// The verified raw session token.
    pub token: String,
}

impl<S> FromRequestParts<S> for ShopSession
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = SessionRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .ok_or(SessionRejection(SessionTokenError::MissingHeader))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| SessionRejection(SessionTokenError::MalformedHeader))?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .ok_or(SessionRejection(SessionTokenError::MalformedHeader))?;

        let (shop, _claims) =
            verify_session_token(token, state.config().shopify()).map_err(SessionRejection)?;

        Ok(Self {
            shop,
            token: token.to_string(),
        })
    }
}

/// Rejection for a failed session-token check: 401 with a JSON error body.
#[derive(Debug)]
pub struct SessionRejection(SessionTokenError);

impl IntoResponse for SessionRejection {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self.0, "rejected unauthenticated request");
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": format!("Unauthorized: {}", self.0) })),
        )
            .into_response()
    }
}
