//! Shared type definitions.

pub mod id;
pub mod plan;
pub mod shop;

pub use id::*;
pub use plan::{PlanStatus, PlanTier};
pub use shop::{ShopDomain, ShopDomainError};
