//! Shop plan domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use printmint_core::{PlanStatus, PlanTier, ShopDomain};

/// A shop's plan record as stored.
///
/// The tier is kept as the raw stored string: quota resolution decides how to
/// treat values that don't parse as a known tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopPlan {
    /// Shop the plan belongs to (one row per shop).
    pub shop: ShopDomain,
    /// Stored tier key (`starter`, `pro`, `unlimited`, or anything a future
    /// billing flow wrote).
    pub plan: String,
    /// Billing status.
    pub status: PlanStatus,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Outcome of resolving a shop's effective plan tier.
///
/// Distinguishes "the shop really is on this tier" from "we could not trust
/// the plan store and fell back", so logs can tell the two apart.
#[derive(Debug, Clone)]
pub enum PlanResolution {
    /// The stored record read cleanly and its tier parsed.
    Stored {
        /// The parsed tier.
        tier: PlanTier,
        /// The underlying record.
        record: ShopPlan,
    },
    /// The record was unusable; the default tier applies.
    Fallback {
        /// The tier applied instead (always starter).
        tier: PlanTier,
        /// Why the stored record could not be used.
        reason: FallbackReason,
    },
}

impl PlanResolution {
    /// The tier quota enforcement should use.
    #[must_use]
    pub const fn tier(&self) -> PlanTier {
        match self {
            Self::Stored { tier, .. } | Self::Fallback { tier, .. } => *tier,
        }
    }
}

/// Why plan resolution fell back to the default tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// The stored tier key is not a known tier (e.g. a corrupted value).
    UnrecognizedTier(String),
    /// The plan store could not be read.
    StoreUnavailable(String),
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnrecognizedTier(raw) => write!(f, "unrecognized stored tier {raw:?}"),
            Self::StoreUnavailable(msg) => write!(f, "plan store unavailable: {msg}"),
        }
    }
}
