//! Product linking: put a generated design onto a commerce catalog entry.
//!
//! Each operation issues a single Admin API mutation and then records one
//! design↔product mapping row. There is no idempotency key: retrying a
//! failed or ambiguous call can create a duplicate product or a duplicate
//! mapping row.

use sqlx::PgPool;
use tracing::instrument;

use printmint_core::{DesignId, ShopDomain};

use crate::db::ProductDesignRepository;
use crate::error::AppError;
use crate::shopify::{AdminClient, AttachedMedia, CreatedProduct};

/// Service for creating products from designs and attaching designs to
/// existing products.
pub struct ProductLinkingService<'a> {
    pool: &'a PgPool,
    shopify: &'a AdminClient,
}

impl<'a> ProductLinkingService<'a> {
    /// Create a new product linking service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, shopify: &'a AdminClient) -> Self {
        Self { pool, shopify }
    }

    /// Create a new product carrying the design image, then record the
    /// design↔product mapping.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Shopify` when the mutation fails or the response
    /// carries no product id, and `AppError::Database` when the mapping row
    /// cannot be written (the product exists remotely at that point; there
    /// is no rollback).
    #[instrument(skip(self, session_token, image_url), fields(shop = %shop, design_id = %design_id))]
    pub async fn create_product_with_design(
        &self,
        shop: &ShopDomain,
        session_token: &str,
        design_id: DesignId,
        title: &str,
        image_url: &str,
    ) -> Result<CreatedProduct, AppError> {
        let product = self
            .shopify
            .create_product_with_design(shop, session_token, title, image_url)
            .await?;

        ProductDesignRepository::new(self.pool)
            .create(shop, design_id, &product.id)
            .await?;

        Ok(product)
    }

    /// Attach the design image to an existing product as media, then record
    /// the design↔product mapping.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Shopify` when the mutation fails, and
    /// `AppError::Database` when the mapping row cannot be written.
    #[instrument(skip(self, session_token, image_url), fields(shop = %shop, design_id = %design_id, product_id = %product_id))]
    pub async fn attach_design_to_product(
        &self,
        shop: &ShopDomain,
        session_token: &str,
        design_id: DesignId,
        product_id: &str,
        image_url: &str,
    ) -> Result<Vec<AttachedMedia>, AppError> {
        let media = self
            .shopify
            .attach_design_media(shop, session_token, product_id, image_url)
            .await?;

        ProductDesignRepository::new(self.pool)
            .create(shop, design_id, product_id)
            .await?;

        Ok(media)
    }
}
