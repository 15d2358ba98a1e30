//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::{ai::ImageClient, config::AppConfig, shopify::AdminClient};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    pool: PgPool,
    shopify: AdminClient,
    ai: ImageClient,
}

impl AppState {
    /// Build the application state from loaded configuration and a pool.
    #[must_use]
    pub fn new(config: AppConfig, pool: PgPool) -> Self {
        let shopify = AdminClient::new(config.shopify());
        let ai = ImageClient::new(config.ai());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                shopify,
                ai,
            }),
        }
    }

    /// The loaded configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// The database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// The Shopify Admin API client.
    #[must_use]
    pub fn shopify(&self) -> &AdminClient {
        &self.inner.shopify
    }

    /// The AI image generation client.
    #[must_use]
    pub fn ai(&self) -> &ImageClient {
        &self.inner.ai
    }
}
