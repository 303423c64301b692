pub mod config;
pub mod error;
pub mod model;
pub mod query;
pub mod rating;
pub mod rest;
pub mod review;
pub mod seed;
pub mod store;

use std::sync::Arc;

use config::ServerConfig;
use query::QueryService;
use review::ReviewService;
use store::Store;

/// Shared application state passed to every REST handler.
pub struct AppContext {
    pub config: Arc<ServerConfig>,
    pub store: Arc<dyn Store>,
    /// Review submission path — the only mutator of app aggregates.
    pub reviews: ReviewService,
    /// Read-only lookups for the presentation layer.
    pub queries: QueryService,
    pub started_at: std::time::Instant,
}

impl AppContext {
    pub fn new(config: Arc<ServerConfig>, store: Arc<dyn Store>) -> Self {
        Self {
            config,
            reviews: ReviewService::new(store.clone()),
            queries: QueryService::new(store.clone()),
            store,
            started_at: std::time::Instant::now(),
        }
    }
}
