//! Database operations for design↔product mappings.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use printmint_core::{DesignId, ShopDomain};

use super::RepositoryError;
use crate::models::ProductDesign;

/// Internal row type for `PostgreSQL` product mapping queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductDesignRow {
    id: i64,
    shop: String,
    design_id: Uuid,
    product_id: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ProductDesignRow> for ProductDesign {
    type Error = RepositoryError;

    fn try_from(row: ProductDesignRow) -> Result<Self, Self::Error> {
        let shop = ShopDomain::parse(&row.shop).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid shop domain in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            shop,
            design_id: DesignId::new(row.design_id),
            product_id: row.product_id,
            created_at: row.created_at,
        })
    }
}

/// Repository for design↔product mapping operations.
pub struct ProductDesignRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductDesignRepository<'a> {
    /// Create a new product mapping repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Append a mapping row. No uniqueness is enforced: attaching the same
    /// design to the same product twice records two rows.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(
        &self,
        shop: &ShopDomain,
        design_id: DesignId,
        product_id: &str,
    ) -> Result<ProductDesign, RepositoryError> {
        let row = sqlx::query_as::<_, ProductDesignRow>(
            r"
            INSERT INTO studio.product_design (shop, design_id, product_id)
            VALUES ($1, $2, $3)
            RETURNING id, shop, design_id, product_id, created_at
            ",
        )
        .bind(shop.as_str())
        .bind(design_id.as_uuid())
        .bind(product_id)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }
}
