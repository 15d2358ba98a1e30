//! Domain models.

pub mod design;
pub mod plan;

pub use design::{Design, NewDesign, ProductDesign};
pub use plan::{FallbackReason, PlanResolution, ShopPlan};
