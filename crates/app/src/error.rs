//! Unified error handling for the API surface.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use printmint_core::PlanTier;

use crate::ai::AiError;
use crate::db::RepositoryError;
use crate::shopify::AdminShopifyError;

/// Application-level error type for the API routes.
///
/// Every failure becomes a JSON `{"error": ...}` body carrying the
/// originating message; quota failures additionally carry structured usage
/// metadata so the UI can render a precise message.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing request fields (client's fault).
    #[error("{0}")]
    Validation(String),

    /// The shop has used up its monthly design quota.
    ///
    /// Only finite limits can be exceeded, so the limit is always present.
    #[error("Design quota exceeded for {} plan ({used}/{limit} this month).", .plan.display_name())]
    QuotaExceeded {
        /// Designs generated in the current UTC month.
        used: i64,
        /// Monthly limit of the plan.
        limit: u32,
        /// Effective plan tier.
        plan: PlanTier,
    },

    /// Referenced resource absent for the authenticated shop.
    #[error("{0}")]
    NotFound(String),

    /// Session token missing or invalid.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Database operation failed.
    #[error("{0}")]
    Database(#[from] RepositoryError),

    /// AI image generation failed (configuration or upstream).
    #[error("{0}")]
    Ai(#[from] AiError),

    /// Shopify Admin API operation failed.
    #[error("{0}")]
    Shopify(#[from] AdminShopifyError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::QuotaExceeded { .. } => StatusCode::PAYMENT_REQUIRED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Database(_) | Self::Ai(_) | Self::Shopify(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Dependency and database failures are worth an alert; the rest is
        // client error noise.
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "API request error"
            );
        }

        let body = match &self {
            Self::QuotaExceeded { used, limit, plan } => json!({
                "error": self.to_string(),
                "code": "QUOTA_EXCEEDED",
                "meta": {
                    "used": used,
                    "limit": limit,
                    "plan": plan,
                },
            }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
