//! Common test utilities and fixtures for integration tests.
//!
//! The service is stateless, so every test builds its own router from an
//! `AppConfig` and talks to it through axum-test.

pub mod fixtures;

use axum::Router;

use flashdeck_backend::config::AppConfig;
use flashdeck_backend::{build_router, AppState};

/// Test context holding a fully layered router.
pub struct TestContext {
    app: Router,
}

impl TestContext {
    /// Create a context with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a context with a custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            app: build_router(AppState::new(config)),
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }
}
