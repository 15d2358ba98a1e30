//! Design generation API handlers.
//!
//! `POST /api/design/generate`: enforce quota, call the AI provider, store
//! the design, and return the image URL plus current quota standing.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use printmint_core::DesignId;

use crate::{
    ai::GenerationInput,
    db::DesignRepository,
    error::AppError,
    middleware::ShopSession,
    models::NewDesign,
    services::{QuotaService, QuotaUsage},
    state::AppState,
};

/// Build the design generation router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/design/generate", post(generate_design))
}

/// Request for generating a design.
#[derive(Debug, Deserialize)]
pub struct GenerateDesignRequest {
    /// The user's prompt.
    pub prompt: String,
    /// Optional style hint.
    #[serde(default)]
    pub style: Option<String>,
    /// Optional ordered color preferences.
    #[serde(default)]
    pub colors: Option<Vec<String>>,
}

/// Response for a generated design.
#[derive(Debug, Serialize)]
pub struct GenerateDesignResponse {
    /// The stored design.
    pub design: DesignSummary,
    /// Quota standing after the check that admitted this generation.
    pub quota: QuotaUsage,
}

/// The stored design fields the UI needs for preview.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignSummary {
    /// Design ID.
    pub id: DesignId,
    /// URL of the generated image.
    pub image_url: String,
    /// The prompt the design was generated from.
    pub prompt: String,
    /// Style hint, when one was given.
    pub style: Option<String>,
    /// When the design was generated.
    pub created_at: DateTime<Utc>,
}

/// Generate a design image and persist it.
///
/// # Errors
///
/// Returns 400 for a malformed body or a prompt shorter than 3 characters,
/// 402 when the monthly quota is exhausted, and 500 for provider, database,
/// or configuration failures.
pub async fn generate_design(
    session: ShopSession,
    State(state): State<AppState>,
    body: Result<Json<GenerateDesignRequest>, JsonRejection>,
) -> Result<Json<GenerateDesignResponse>, AppError> {
    let Json(body) = body.map_err(|e| AppError::Validation(e.body_text()))?;

    let prompt = body.prompt.trim().to_string();
    if prompt.chars().count() < 3 {
        return Err(AppError::Validation("Prompt is required.".to_string()));
    }

    let quota = QuotaService::new(state.pool()).check(&session.shop).await?;

    let generated = state
        .ai()
        .generate(&GenerationInput {
            prompt: prompt.clone(),
            style: body.style.clone(),
            colors: body.colors.clone(),
        })
        .await?;

    let design = DesignRepository::new(state.pool())
        .create(NewDesign {
            shop: session.shop.clone(),
            prompt,
            style: body.style,
            colors: body.colors,
            image_url: generated.url,
            provider: Some(generated.provider),
        })
        .await?;

    tracing::info!(shop = %session.shop, design_id = %design.id, "design generated");

    Ok(Json(GenerateDesignResponse {
        design: DesignSummary {
            id: design.id,
            image_url: design.image_url,
            prompt: design.prompt,
            style: design.style,
            created_at: design.created_at,
        },
        quota,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserialization() {
        let body: GenerateDesignRequest = serde_json::from_str(
            r#"{"prompt": "a fox", "style": "vintage", "colors": ["teal", "cream"]}"#,
        )
        .expect("deserialize");
        assert_eq!(body.prompt, "a fox");
        assert_eq!(body.style.as_deref(), Some("vintage"));
        assert_eq!(body.colors.as_deref().map(<[String]>::len), Some(2));
    }

    #[test]
    fn test_request_rejects_non_array_colors() {
        let result: Result<GenerateDesignRequest, _> =
            serde_json::from_str(r#"{"prompt": "a fox", "colors": "teal"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_request_without_optionals() {
        let body: GenerateDesignRequest =
            serde_json::from_str(r#"{"prompt": "a fox"}"#).expect("deserialize");
        assert!(body.style.is_none());
        assert!(body.colors.is_none());
    }

    #[test]
    fn test_response_uses_camel_case() {
        let response = GenerateDesignResponse {
            design: DesignSummary {
                id: DesignId::parse("67e55044-10b1-426f-9247-bb680e5fe0c8").expect("parse"),
                image_url: "https://img.example/a.png".to_string(),
                prompt: "a fox".to_string(),
                style: None,
                created_at: Utc::now(),
            },
            quota: QuotaUsage {
                used: 1,
                limit: Some(30),
                plan: printmint_core::PlanTier::Starter,
            },
        };

        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json["design"]["imageUrl"], "https://img.example/a.png");
        assert!(json["design"]["createdAt"].is_string());
        assert_eq!(json["quota"]["limit"], 30);
        assert_eq!(json["quota"]["plan"], "starter");
    }
}
