//! Database operations for shop plan records.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use printmint_core::{PlanStatus, PlanTier, ShopDomain};

use super::RepositoryError;
use crate::models::ShopPlan;

/// Internal row type for `PostgreSQL` shop plan queries.
#[derive(Debug, sqlx::FromRow)]
struct ShopPlanRow {
    shop: String,
    plan: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ShopPlanRow> for ShopPlan {
    type Error = RepositoryError;

    fn try_from(row: ShopPlanRow) -> Result<Self, Self::Error> {
        let shop = ShopDomain::parse(&row.shop).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid shop domain in database: {e}"))
        })?;

        Ok(Self {
            shop,
            plan: row.plan,
            status: PlanStatus::parse(&row.status),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for shop plan database operations.
pub struct PlanRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PlanRepository<'a> {
    /// Create a new plan repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the shop's plan record, creating the default one on first access.
    ///
    /// New records start as starter/inactive until a billing flow upgrades
    /// them. The insert tolerates a concurrent first access for the same
    /// shop (`ON CONFLICT DO NOTHING`).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_or_create(&self, shop: &ShopDomain) -> Result<ShopPlan, RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO studio.shop_plan (shop, plan, status)
            VALUES ($1, $2, $3)
            ON CONFLICT (shop) DO NOTHING
            ",
        )
        .bind(shop.as_str())
        .bind(PlanTier::Starter.as_str())
        .bind(PlanStatus::Inactive.as_str())
        .execute(self.pool)
        .await?;

        let row = sqlx::query_as::<_, ShopPlanRow>(
            r"
            SELECT shop, plan, status, created_at, updated_at
            FROM studio.shop_plan
            WHERE shop = $1
            ",
        )
        .bind(shop.as_str())
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }
}
