//! Monthly design quota enforcement.
//!
//! Usage is counted per shop inside the current UTC calendar month
//! `[first-of-month 00:00, first-of-next-month 00:00)`. The check is a local
//! business rule, not a rate limiter: it is not atomic with the design insert
//! that follows it, so two concurrent generate calls can both pass and exceed
//! a finite quota by one.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tracing::instrument;

use printmint_core::{PlanTier, ShopDomain};

use crate::db::{DesignRepository, PlanRepository};
use crate::error::AppError;
use crate::models::{FallbackReason, PlanResolution};

/// A shop's quota standing for the current month.
#[derive(Debug, Clone, Serialize)]
pub struct QuotaUsage {
    /// Designs generated in the current UTC month.
    pub used: i64,
    /// Monthly limit; `null` in JSON for an unlimited tier.
    pub limit: Option<u32>,
    /// Effective plan tier.
    pub plan: PlanTier,
}

/// Quota service over the plan and design stores.
pub struct QuotaService<'a> {
    pool: &'a PgPool,
}

impl<'a> QuotaService<'a> {
    /// Create a new quota service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Resolve the shop's effective plan.
    ///
    /// A missing record is created as starter/inactive. An unreadable record
    /// or an unrecognized stored tier degrades to a starter fallback (logged,
    /// never an error): a broken plan store should not take design
    /// generation down with it.
    pub async fn resolve_plan(&self, shop: &ShopDomain) -> PlanResolution {
        match PlanRepository::new(self.pool).get_or_create(shop).await {
            Ok(record) => match PlanTier::parse(&record.plan) {
                Some(tier) => PlanResolution::Stored { tier, record },
                None => {
                    let reason = FallbackReason::UnrecognizedTier(record.plan.clone());
                    tracing::warn!(shop = %shop, %reason, "falling back to starter plan");
                    PlanResolution::Fallback {
                        tier: PlanTier::Starter,
                        reason,
                    }
                }
            },
            Err(e) => {
                let reason = FallbackReason::StoreUnavailable(e.to_string());
                tracing::warn!(shop = %shop, %reason, "falling back to starter plan");
                PlanResolution::Fallback {
                    tier: PlanTier::Starter,
                    reason,
                }
            }
        }
    }

    /// Check whether the shop may generate another design this month.
    ///
    /// # Errors
    ///
    /// Returns `AppError::QuotaExceeded` (with usage metadata) when the
    /// shop's finite monthly limit is reached, or `AppError::Database` if
    /// the design count cannot be read.
    #[instrument(skip(self), fields(shop = %shop))]
    pub async fn check(&self, shop: &ShopDomain) -> Result<QuotaUsage, AppError> {
        let tier = self.resolve_plan(shop).await.tier();

        let (start, end) = month_window(Utc::now());
        let used = DesignRepository::new(self.pool)
            .count_created_between(shop, start, end)
            .await?;

        evaluate(tier, used)?;

        Ok(QuotaUsage {
            used,
            limit: tier.monthly_limit(),
            plan: tier,
        })
    }
}

/// The UTC calendar month window containing `now`: `[start, end)`.
#[must_use]
pub fn month_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let (year, month) = (now.year(), now.month());
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    // First-of-month midnights always exist; the unwraps cannot fire.
    #[allow(clippy::unwrap_used)]
    let start = Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).unwrap();
    #[allow(clippy::unwrap_used)]
    let end = Utc
        .with_ymd_and_hms(next_year, next_month, 1, 0, 0, 0)
        .unwrap();

    (start, end)
}

/// Apply the quota rule: a finite limit fails once `used >= limit`.
///
/// # Errors
///
/// Returns `AppError::QuotaExceeded` carrying the usage metadata.
pub fn evaluate(tier: PlanTier, used: i64) -> Result<(), AppError> {
    if let Some(limit) = tier.monthly_limit()
        && used >= i64::from(limit)
    {
        return Err(AppError::QuotaExceeded {
            used,
            limit,
            plan: tier,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_starter_under_limit_passes() {
        for used in [0, 1, 29] {
            assert!(evaluate(PlanTier::Starter, used).is_ok(), "used={used}");
        }
    }

    #[test]
    fn test_starter_at_and_over_limit_fails() {
        for used in [30, 31, 500] {
            let err = evaluate(PlanTier::Starter, used).expect_err("should exceed");
            match err {
                AppError::QuotaExceeded { limit, plan, .. } => {
                    assert_eq!(limit, 30);
                    assert_eq!(plan, PlanTier::Starter);
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_pro_limit_is_300() {
        assert!(evaluate(PlanTier::Pro, 299).is_ok());
        assert!(evaluate(PlanTier::Pro, 300).is_err());
    }

    #[test]
    fn test_unlimited_never_fails() {
        for used in [0, 30, 300, 1_000_000] {
            assert!(evaluate(PlanTier::Unlimited, used).is_ok(), "used={used}");
        }
    }

    #[test]
    fn test_month_window_mid_month() {
        let now = Utc.with_ymd_and_hms(2024, 5, 17, 13, 45, 12).single().expect("valid");
        let (start, end) = month_window(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).single().expect("valid"));
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).single().expect("valid"));
    }

    #[test]
    fn test_month_window_december_rolls_over_year() {
        let now = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).single().expect("valid");
        let (start, end) = month_window(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).single().expect("valid"));
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single().expect("valid"));
    }

    #[test]
    fn test_month_window_boundaries_are_half_open() {
        let now = Utc.with_ymd_and_hms(2024, 5, 17, 0, 0, 0).single().expect("valid");
        let (start, end) = month_window(now);
        let in_window = |ts: DateTime<Utc>| ts >= start && ts < end;

        // Last millisecond of April is out; first millisecond of May is in.
        assert!(!in_window(start - Duration::milliseconds(1)));
        assert!(in_window(start));
        assert!(in_window(end - Duration::milliseconds(1)));
        assert!(!in_window(end));
    }
}
