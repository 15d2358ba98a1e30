//! Design and product-mapping domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use printmint_core::{DesignId, ShopDomain};

/// A generated design: the image URL plus the parameters that produced it.
///
/// Created once per successful generation call and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Design {
    /// Unique design ID.
    pub id: DesignId,
    /// Shop that owns this design.
    pub shop: ShopDomain,
    /// The user's prompt, as submitted (trimmed).
    pub prompt: String,
    /// Optional style hint (e.g. "vintage", "minimalist").
    pub style: Option<String>,
    /// Optional ordered list of preferred colors.
    pub colors: Option<Vec<String>>,
    /// URL of the generated image.
    pub image_url: String,
    /// Provider that produced the image (e.g. "openai").
    pub provider: Option<String>,
    /// When the design was generated.
    pub created_at: DateTime<Utc>,
}

/// Input for persisting a freshly generated design.
#[derive(Debug, Clone)]
pub struct NewDesign {
    /// Shop that owns the design.
    pub shop: ShopDomain,
    /// The user's prompt (trimmed).
    pub prompt: String,
    /// Optional style hint.
    pub style: Option<String>,
    /// Optional ordered list of preferred colors.
    pub colors: Option<Vec<String>>,
    /// URL of the generated image.
    pub image_url: String,
    /// Provider that produced the image.
    pub provider: Option<String>,
}

/// An append-only mapping between a design and a product it was attached to.
///
/// A design may be attached to multiple products; no uniqueness is enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDesign {
    /// Row ID.
    pub id: i64,
    /// Shop that owns the mapping.
    pub shop: ShopDomain,
    /// The attached design.
    pub design_id: DesignId,
    /// Shopify product GID (e.g. `gid://shopify/Product/123`).
    pub product_id: String,
    /// When the attachment was recorded.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_design_serialization() {
        let design = Design {
            id: DesignId::parse("67e55044-10b1-426f-9247-bb680e5fe0c8").expect("parse"),
            shop: ShopDomain::parse("my-shop.myshopify.com").expect("parse"),
            prompt: "a fox reading a book".to_string(),
            style: Some("vintage".to_string()),
            colors: Some(vec!["teal".to_string(), "cream".to_string()]),
            image_url: "https://img.example/fox.png".to_string(),
            provider: Some("openai".to_string()),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&design).expect("serialize");
        assert!(json.contains("\"67e55044-10b1-426f-9247-bb680e5fe0c8\""));
        assert!(json.contains("\"my-shop.myshopify.com\""));
        assert!(json.contains("\"vintage\""));
    }
}
