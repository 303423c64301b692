//! Read-only lookups consumed by the presentation layer.
//!
//! No business logic beyond pass-through and the store's newest-first review
//! ordering. Absent apps surface as `Ok(None)`; the REST layer turns that
//! into a 404.

use std::sync::Arc;

use crate::error::Result;
use crate::model::{App, DeveloperApp, Review, SimilarApp};
use crate::store::Store;

pub struct QueryService {
    store: Arc<dyn Store>,
}

impl QueryService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn app(&self, id: &str) -> Result<Option<App>> {
        self.store.get_app(id).await
    }

    pub async fn app_by_name(&self, name: &str) -> Result<Option<App>> {
        self.store.get_app_by_name(name).await
    }

    pub async fn all_apps(&self) -> Result<Vec<App>> {
        self.store.get_all_apps().await
    }

    pub async fn reviews_for_app(&self, app_id: &str) -> Result<Vec<Review>> {
        self.store.get_reviews_by_app_id(app_id).await
    }

    pub async fn developer_apps(&self, developer: &str) -> Result<Vec<DeveloperApp>> {
        self.store.get_developer_apps(developer).await
    }

    pub async fn similar_apps(&self) -> Result<Vec<SimilarApp>> {
        self.store.get_similar_apps().await
    }
}
