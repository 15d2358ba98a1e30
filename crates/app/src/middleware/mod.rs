//! Request middleware and extractors.

pub mod session;

pub use session::{SessionTokenClaims, ShopSession, verify_session_token};
