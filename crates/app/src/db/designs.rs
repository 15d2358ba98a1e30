//! Database operations for generated designs.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use printmint_core::{DesignId, ShopDomain};

use super::RepositoryError;
use crate::models::{Design, NewDesign};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` design queries.
#[derive(Debug, sqlx::FromRow)]
struct DesignRow {
    id: Uuid,
    shop: String,
    prompt: String,
    style: Option<String>,
    colors_json: Option<String>,
    image_url: String,
    provider: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<DesignRow> for Design {
    type Error = RepositoryError;

    fn try_from(row: DesignRow) -> Result<Self, Self::Error> {
        let shop = ShopDomain::parse(&row.shop).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid shop domain in database: {e}"))
        })?;

        let colors = row
            .colors_json
            .as_deref()
            .map(serde_json::from_str::<Vec<String>>)
            .transpose()
            .map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid colors JSON in database: {e}"))
            })?;

        Ok(Self {
            id: DesignId::new(row.id),
            shop,
            prompt: row.prompt,
            style: row.style,
            colors,
            image_url: row.image_url,
            provider: row.provider,
            created_at: row.created_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for design database operations.
pub struct DesignRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DesignRepository<'a> {
    /// Create a new design repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a freshly generated design and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, design: NewDesign) -> Result<Design, RepositoryError> {
        let colors_json = design
            .colors
            .as_ref()
            .filter(|c| !c.is_empty())
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| RepositoryError::DataCorruption(format!("colors serialization: {e}")))?;

        let row = sqlx::query_as::<_, DesignRow>(
            r"
            INSERT INTO studio.design (shop, prompt, style, colors_json, image_url, provider)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, shop, prompt, style, colors_json, image_url, provider, created_at
            ",
        )
        .bind(design.shop.as_str())
        .bind(&design.prompt)
        .bind(&design.style)
        .bind(&colors_json)
        .bind(&design.image_url)
        .bind(&design.provider)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Get a design by ID, scoped to the owning shop.
    ///
    /// Returns `None` when the design does not exist or belongs to a
    /// different shop.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_for_shop(
        &self,
        id: DesignId,
        shop: &ShopDomain,
    ) -> Result<Option<Design>, RepositoryError> {
        let row = sqlx::query_as::<_, DesignRow>(
            r"
            SELECT id, shop, prompt, style, colors_json, image_url, provider, created_at
            FROM studio.design
            WHERE id = $1 AND shop = $2
            ",
        )
        .bind(id.as_uuid())
        .bind(shop.as_str())
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(r.try_into()?)),
            None => Ok(None),
        }
    }

    /// Count a shop's designs created inside `[start, end)`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_created_between(
        &self,
        shop: &ShopDomain,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            r"
            SELECT COUNT(*)
            FROM studio.design
            WHERE shop = $1 AND created_at >= $2 AND created_at < $3
            ",
        )
        .bind(shop.as_str())
        .bind(start)
        .bind(end)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row(colors_json: Option<&str>) -> DesignRow {
        DesignRow {
            id: Uuid::new_v4(),
            shop: "my-shop.myshopify.com".to_string(),
            prompt: "a fox reading a book".to_string(),
            style: None,
            colors_json: colors_json.map(String::from),
            image_url: "https://img.example/fox.png".to_string(),
            provider: Some("openai".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_conversion_parses_colors() {
        let design: Design = sample_row(Some(r#"["teal","cream"]"#))
            .try_into()
            .expect("convert");
        assert_eq!(
            design.colors,
            Some(vec!["teal".to_string(), "cream".to_string()])
        );
    }

    #[test]
    fn test_row_conversion_without_colors() {
        let design: Design = sample_row(None).try_into().expect("convert");
        assert_eq!(design.colors, None);
    }

    #[test]
    fn test_row_conversion_rejects_bad_colors_json() {
        let result: Result<Design, _> = sample_row(Some("not json")).try_into();
        assert!(matches!(
            result,
            Err(RepositoryError::DataCorruption(_))
        ));
    }

    #[test]
    fn test_row_conversion_rejects_bad_shop() {
        let mut row = sample_row(None);
        row.shop = "not a domain".to_string();
        let result: Result<Design, _> = row.try_into();
        assert!(matches!(result, Err(RepositoryError::DataCorruption(_))));
    }
}
