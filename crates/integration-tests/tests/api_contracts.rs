//! Integration tests for the API's JSON contracts.
//!
//! Verifies that the request types accept what the UI sends, that responses
//! serialize into the documented shapes, and that application errors map to
//! the documented status codes and bodies.

use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;

use printmint_app::error::AppError;
use printmint_app::routes::api::designs::{DesignSummary, GenerateDesignRequest, GenerateDesignResponse};
use printmint_app::routes::api::products::{AddDesignRequest, AddDesignResponse, AttachMode};
use printmint_app::services::QuotaUsage;
use printmint_core::{DesignId, PlanTier};

async fn response_json(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should collect");
    let json = serde_json::from_slice(&bytes).expect("body should be JSON");
    (status, json)
}

// =============================================================================
// Error body tests
// =============================================================================

#[tokio::test]
async fn test_validation_error_is_400_with_message() {
    let (status, body) = response_json(AppError::Validation("Prompt is required.".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Prompt is required.");
}

#[tokio::test]
async fn test_quota_exceeded_is_402_with_meta() {
    let (status, body) = response_json(AppError::QuotaExceeded {
        used: 30,
        limit: 30,
        plan: PlanTier::Starter,
    })
    .await;

    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(body["code"], "QUOTA_EXCEEDED");
    assert_eq!(body["meta"]["used"], 30);
    assert_eq!(body["meta"]["limit"], 30);
    assert_eq!(body["meta"]["plan"], "starter");
    assert_eq!(
        body["error"],
        "Design quota exceeded for Starter plan (30/30 this month)."
    );
}

#[tokio::test]
async fn test_not_found_is_404() {
    let (status, body) = response_json(AppError::NotFound("Design not found.".into())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Design not found.");
}

#[tokio::test]
async fn test_unsupported_provider_keeps_a_recognizable_message() {
    let err = AppError::Ai(printmint_app::ai::AiError::UnsupportedProvider(
        "Unsupported AI provider: midjourney".to_string(),
    ));
    let (status, body) = response_json(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().expect("error is a string");
    assert!(message.contains("Unsupported AI provider"));
    assert!(message.contains("midjourney"));
}

#[tokio::test]
async fn test_missing_credential_surfaces_as_500_with_message() {
    let err = AppError::Ai(printmint_app::ai::AiError::MissingCredential("OPENAI_API_KEY"));
    let (status, body) = response_json(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        "Missing OPENAI_API_KEY for AI image generation."
    );
}

// =============================================================================
// Generate contract tests
// =============================================================================

#[test]
fn test_generate_request_accepts_documented_body() {
    let body: GenerateDesignRequest = serde_json::from_str(
        r#"{"prompt": "a valid prompt", "style": "retro", "colors": ["navy", "gold"]}"#,
    )
    .expect("deserialize");

    assert_eq!(body.prompt, "a valid prompt");
    assert_eq!(body.colors.expect("colors").len(), 2);
}

#[test]
fn test_generate_request_rejects_non_array_colors() {
    assert!(
        serde_json::from_str::<GenerateDesignRequest>(r#"{"prompt": "ok", "colors": "navy"}"#)
            .is_err()
    );
    assert!(
        serde_json::from_str::<GenerateDesignRequest>(r#"{"prompt": "ok", "colors": 3}"#).is_err()
    );
}

#[test]
fn test_generate_request_requires_prompt_field() {
    assert!(serde_json::from_str::<GenerateDesignRequest>(r#"{"style": "retro"}"#).is_err());
}

#[test]
fn test_generate_response_shape() {
    let response = GenerateDesignResponse {
        design: DesignSummary {
            id: DesignId::parse("67e55044-10b1-426f-9247-bb680e5fe0c8").expect("parse"),
            image_url: "https://img.example/design.png".to_string(),
            prompt: "a valid prompt".to_string(),
            style: Some("retro".to_string()),
            created_at: Utc::now(),
        },
        quota: QuotaUsage {
            used: 3,
            limit: Some(30),
            plan: PlanTier::Starter,
        },
    };

    let json = serde_json::to_value(&response).expect("serialize");
    assert_eq!(json["design"]["id"], "67e55044-10b1-426f-9247-bb680e5fe0c8");
    assert_eq!(json["design"]["imageUrl"], "https://img.example/design.png");
    assert_eq!(json["quota"]["used"], 3);
    assert_eq!(json["quota"]["limit"], 30);
    assert_eq!(json["quota"]["plan"], "starter");
}

#[test]
fn test_unlimited_quota_serializes_limit_as_null() {
    let quota = QuotaUsage {
        used: 1234,
        limit: None,
        plan: PlanTier::Unlimited,
    };

    let json = serde_json::to_value(&quota).expect("serialize");
    assert!(json["limit"].is_null());
    assert_eq!(json["plan"], "unlimited");
}

// =============================================================================
// Add-design contract tests
// =============================================================================

#[test]
fn test_add_design_request_modes() {
    let new_mode: AddDesignRequest =
        serde_json::from_str(r#"{"designId": "d", "mode": "new"}"#).expect("deserialize");
    assert_eq!(new_mode.mode, AttachMode::New);

    let existing: AddDesignRequest = serde_json::from_str(
        r#"{"designId": "d", "mode": "existing", "productId": "gid://shopify/Product/5"}"#,
    )
    .expect("deserialize");
    assert_eq!(existing.mode, AttachMode::Existing);

    assert!(serde_json::from_str::<AddDesignRequest>(r#"{"designId": "d", "mode": "other"}"#).is_err());
}

#[test]
fn test_add_design_response_shape() {
    let response = AddDesignResponse {
        ok: true,
        mode: AttachMode::Existing,
        product_id: "gid://shopify/Product/5".to_string(),
        product: None,
        media: Some(vec![]),
    };

    let json = serde_json::to_value(&response).expect("serialize");
    assert_eq!(json["ok"], true);
    assert_eq!(json["mode"], "existing");
    assert_eq!(json["productId"], "gid://shopify/Product/5");
    assert!(json.get("product").is_none());
    assert!(json["media"].is_array());
}
