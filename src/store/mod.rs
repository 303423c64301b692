//! Data store contract and its two interchangeable backends.
//!
//! Both backends satisfy the same contract (see `tests/store_contract.rs`);
//! the running backend is picked by `storage` in config. All mutations are
//! persisted before the call returns — no write-behind, no internal retries.

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{App, DeveloperApp, NewApp, NewCatalogueApp, NewReview, Review, SimilarApp};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Typed CRUD/query operations over the four entity kinds.
///
/// Absent apps are an `Ok(None)` signal, not an error — the REST layer maps
/// them to 404. `update_app_rating` and `create_review` fail loudly
/// (`Error::NotFound`) when the referenced app does not exist.
#[async_trait]
pub trait Store: Send + Sync {
    async fn get_app(&self, id: &str) -> Result<Option<App>>;

    /// Exact name match.
    async fn get_app_by_name(&self, name: &str) -> Result<Option<App>>;

    /// Assigns a fresh id and creation timestamp.
    async fn create_app(&self, app: NewApp) -> Result<App>;

    async fn get_all_apps(&self) -> Result<Vec<App>>;

    /// Overwrite the aggregate pair. Errors with `NotFound` if `id` does not
    /// exist. Only the review submission path may call this.
    async fn update_app_rating(&self, id: &str, rating: &str, total_reviews: i64) -> Result<()>;

    /// Reviews for an app, newest-first by creation timestamp.
    async fn get_reviews_by_app_id(&self, app_id: &str) -> Result<Vec<Review>>;

    /// Errors with `NotFound` if `review.app_id` references no app.
    async fn create_review(&self, review: NewReview) -> Result<Review>;

    /// Catalogue rows filtered by exact developer name.
    async fn get_developer_apps(&self, developer: &str) -> Result<Vec<DeveloperApp>>;

    async fn get_similar_apps(&self) -> Result<Vec<SimilarApp>>;

    // Seed-only writes for the static catalogue tables.
    async fn create_developer_app(&self, app: NewCatalogueApp) -> Result<DeveloperApp>;
    async fn create_similar_app(&self, app: NewCatalogueApp) -> Result<SimilarApp>;
}
