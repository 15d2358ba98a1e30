//! Product linking API handlers.
//!
//! `POST /api/products/add-design`: create a new product carrying a design,
//! or attach a design to an existing product, then record the mapping.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use serde::{Deserialize, Serialize};

use printmint_core::DesignId;

use crate::{
    db::DesignRepository,
    error::AppError,
    middleware::ShopSession,
    services::ProductLinkingService,
    shopify::{AttachedMedia, CreatedProduct},
    state::AppState,
};

const DEFAULT_PRODUCT_TITLE: &str = "AI Design Product";

/// Build the product linking router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/products/add-design", post(add_design))
}

/// How the design should reach a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachMode {
    /// Create a new product carrying the design.
    New,
    /// Attach the design to an existing product.
    Existing,
}

/// Request for adding a design to a product.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddDesignRequest {
    /// The design to attach.
    pub design_id: String,
    /// Whether to create a product or attach to an existing one.
    pub mode: AttachMode,
    /// Title for a new product (mode `new` only).
    #[serde(default)]
    pub title: Option<String>,
    /// Target product GID (required for mode `existing`).
    #[serde(default)]
    pub product_id: Option<String>,
}

/// Response for a completed attachment.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddDesignResponse {
    /// Always `true` on success.
    pub ok: bool,
    /// The mode that was executed.
    pub mode: AttachMode,
    /// The product the design now belongs to.
    pub product_id: String,
    /// The created product (mode `new` only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<CreatedProduct>,
    /// The attached media (mode `existing` only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Vec<AttachedMedia>>,
}

/// Add a design to a product.
///
/// # Errors
///
/// Returns 400 for a malformed body or a missing `productId` in existing
/// mode, 404 when the design does not belong to the authenticated shop, and
/// 500 for Admin API or database failures.
pub async fn add_design(
    session: ShopSession,
    State(state): State<AppState>,
    body: Result<Json<AddDesignRequest>, JsonRejection>,
) -> Result<Json<AddDesignResponse>, AppError> {
    let Json(body) = body.map_err(|e| AppError::Validation(e.body_text()))?;

    if body.design_id.trim().is_empty() {
        return Err(AppError::Validation("designId is required.".to_string()));
    }

    // An unparseable ID cannot reference a stored design.
    let design_id = DesignId::parse(body.design_id.trim())
        .map_err(|_| AppError::NotFound("Design not found.".to_string()))?;

    let design = DesignRepository::new(state.pool())
        .find_for_shop(design_id, &session.shop)
        .await?
        .ok_or_else(|| AppError::NotFound("Design not found.".to_string()))?;

    let linking = ProductLinkingService::new(state.pool(), state.shopify());

    match body.mode {
        AttachMode::New => {
            let title = body
                .title
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .unwrap_or(DEFAULT_PRODUCT_TITLE);

            let product = linking
                .create_product_with_design(
                    &session.shop,
                    &session.token,
                    design.id,
                    title,
                    &design.image_url,
                )
                .await?;

            tracing::info!(shop = %session.shop, design_id = %design.id, product_id = %product.id, "product created from design");

            Ok(Json(AddDesignResponse {
                ok: true,
                mode: AttachMode::New,
                product_id: product.id.clone(),
                product: Some(product),
                media: None,
            }))
        }
        AttachMode::Existing => {
            let product_id = body
                .product_id
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .ok_or_else(|| {
                    AppError::Validation("productId is required for mode=existing.".to_string())
                })?;

            let media = linking
                .attach_design_to_product(
                    &session.shop,
                    &session.token,
                    design.id,
                    product_id,
                    &design.image_url,
                )
                .await?;

            tracing::info!(shop = %session.shop, design_id = %design.id, product_id = %product_id, "design attached to product");

            Ok(Json(AddDesignResponse {
                ok: true,
                mode: AttachMode::Existing,
                product_id: product_id.to_string(),
                product: None,
                media: Some(media),
            }))
        }
    }
}
