//! Route definitions.

pub mod api;

use axum::Router;

use crate::state::AppState;

/// Build the full application router.
#[must_use]
pub fn routes() -> Router<AppState> {
    api::router()
}
