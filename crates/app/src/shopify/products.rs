//! Product and media mutations for the Admin API.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use printmint_core::ShopDomain;

use super::{AdminClient, AdminShopifyError};

/// Alt text applied to design media attachments.
const DESIGN_MEDIA_ALT: &str = "AI generated design";

const PRODUCT_CREATE_MUTATION: &str = r"
mutation createProductWithMedia($product: ProductCreateInput!) {
  productCreate(product: $product) {
    product {
      id
      title
      handle
      status
    }
    userErrors {
      field
      message
    }
  }
}";

const PRODUCT_CREATE_MEDIA_MUTATION: &str = r"
mutation attachDesignMedia($productId: ID!, $media: [CreateMediaInput!]!) {
  productCreateMedia(productId: $productId, media: $media) {
    media {
      ... on MediaImage {
        id
        image {
          url
        }
      }
    }
    mediaUserErrors {
      field
      message
    }
  }
}";

// =============================================================================
// Response types
// =============================================================================

/// A user-facing mutation error.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct UserError {
    pub field: Option<Vec<String>>,
    pub message: String,
}

/// A product created through [`AdminClient::create_product_with_design`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedProduct {
    /// Product GID (e.g. `gid://shopify/Product/123`).
    pub id: String,
    /// Product title.
    pub title: String,
    /// URL handle.
    pub handle: Option<String>,
    /// Product status (`ACTIVE`, `DRAFT`, ...).
    pub status: Option<String>,
}

/// A media image attached through [`AdminClient::attach_design_media`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachedMedia {
    /// Media GID, when already assigned.
    pub id: Option<String>,
    /// Image details, when already processed.
    pub image: Option<MediaImageDetails>,
}

/// Image details of an attached media item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaImageDetails {
    /// CDN URL of the image.
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductCreateData {
    product_create: Option<ProductCreatePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductCreatePayload {
    product: Option<CreatedProduct>,
    #[serde(default)]
    user_errors: Vec<UserError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductCreateMediaData {
    product_create_media: Option<ProductCreateMediaPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductCreateMediaPayload {
    #[serde(default)]
    media: Vec<AttachedMedia>,
    #[serde(default)]
    media_user_errors: Vec<UserError>,
}

/// Join user-facing mutation errors into one message.
fn join_user_errors(errors: &[UserError]) -> String {
    errors
        .iter()
        .map(|e| {
            let field = e.field.as_ref().map_or_else(String::new, |f| f.join("."));
            if field.is_empty() {
                e.message.clone()
            } else {
                format!("{}: {}", field, e.message)
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn media_input(image_url: &str) -> serde_json::Value {
    serde_json::json!([{
        "originalSource": image_url,
        "mediaContentType": "IMAGE",
        "alt": DESIGN_MEDIA_ALT,
    }])
}

impl AdminClient {
    /// Create a new product with the design image attached as media.
    ///
    /// # Errors
    ///
    /// Returns `AdminShopifyError::UserError` when the mutation reports
    /// user-facing errors, and `AdminShopifyError::MissingResource` when a
    /// successful-looking response carries no product id.
    #[instrument(skip(self, session_token, image_url), fields(shop = %shop))]
    pub async fn create_product_with_design(
        &self,
        shop: &ShopDomain,
        session_token: &str,
        title: &str,
        image_url: &str,
    ) -> Result<CreatedProduct, AdminShopifyError> {
        let variables = serde_json::json!({
            "product": {
                "title": title,
                "media": media_input(image_url),
            }
        });

        let response: ProductCreateData = self
            .execute(shop, session_token, PRODUCT_CREATE_MUTATION, variables)
            .await?;

        let payload = response.product_create.ok_or_else(|| {
            AdminShopifyError::MissingResource(
                "Product creation failed: missing product id.".to_string(),
            )
        })?;

        if !payload.user_errors.is_empty() {
            return Err(AdminShopifyError::UserError(join_user_errors(
                &payload.user_errors,
            )));
        }

        payload.product.ok_or_else(|| {
            AdminShopifyError::MissingResource(
                "Product creation failed: missing product id.".to_string(),
            )
        })
    }

    /// Attach a design image to an existing product as media.
    ///
    /// # Errors
    ///
    /// Returns `AdminShopifyError::UserError` when the mutation reports
    /// user-facing media errors.
    #[instrument(skip(self, session_token, image_url), fields(shop = %shop, product_id = %product_id))]
    pub async fn attach_design_media(
        &self,
        shop: &ShopDomain,
        session_token: &str,
        product_id: &str,
        image_url: &str,
    ) -> Result<Vec<AttachedMedia>, AdminShopifyError> {
        let variables = serde_json::json!({
            "productId": product_id,
            "media": media_input(image_url),
        });

        let response: ProductCreateMediaData = self
            .execute(shop, session_token, PRODUCT_CREATE_MEDIA_MUTATION, variables)
            .await?;

        let payload = response.product_create_media.ok_or_else(|| {
            AdminShopifyError::MissingResource("Media attachment failed.".to_string())
        })?;

        if !payload.media_user_errors.is_empty() {
            return Err(AdminShopifyError::UserError(join_user_errors(
                &payload.media_user_errors,
            )));
        }

        Ok(payload.media)
    }
}
