//! Business services composing repositories and outbound clients.

pub mod linking;
pub mod quota;

pub use linking::ProductLinkingService;
pub use quota::{QuotaService, QuotaUsage};
