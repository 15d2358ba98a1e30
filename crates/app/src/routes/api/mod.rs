//! JSON API routes for the embedded admin UI.

pub mod designs;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Build the API router.
#[must_use]
pub fn router() -> Router<AppState> {
    Router::new().merge(designs::router()).merge(products::router())
}
