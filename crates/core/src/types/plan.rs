//! Plan tier and billing status types.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A named quota tier assigned to a shop.
///
/// The tier decides how many designs a shop may generate per UTC calendar
/// month. Tiers are stored as lowercase strings; parsing is lenient about
/// case but never invents a tier - callers decide how to handle unrecognized
/// stored values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    /// Entry tier: 30 designs per month.
    Starter,
    /// Paid tier: 300 designs per month.
    Pro,
    /// No monthly limit (fair use).
    Unlimited,
}

impl PlanTier {
    /// Monthly design limit, or `None` for an unlimited tier.
    #[must_use]
    pub const fn monthly_limit(self) -> Option<u32> {
        match self {
            Self::Starter => Some(30),
            Self::Pro => Some(300),
            Self::Unlimited => None,
        }
    }

    /// Customer-facing tier name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Starter => "Starter",
            Self::Pro => "Pro",
            Self::Unlimited => "Unlimited",
        }
    }

    /// The lowercase key used in storage and JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Starter => "starter",
            Self::Pro => "pro",
            Self::Unlimited => "unlimited",
        }
    }

    /// Parse a stored tier key (case-insensitive).
    ///
    /// Returns `None` for unrecognized values so callers can apply their own
    /// fallback policy.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "starter" => Some(Self::Starter),
            "pro" => Some(Self::Pro),
            "unlimited" => Some(Self::Unlimited),
            _ => None,
        }
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Billing status of a shop's plan record.
///
/// Until the billing-subscription flow ships, every record is created
/// `inactive` and quotas are enforced from the selected tier alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    /// An active billing subscription backs the plan.
    Active,
    /// No subscription yet.
    Inactive,
}

impl PlanStatus {
    /// The lowercase key used in storage and JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    /// Parse a stored status key, treating anything unrecognized as inactive.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("active") {
            Self::Active
        } else {
            Self::Inactive
        }
    }
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
