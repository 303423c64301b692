//! In-memory store — same contract as the SQLite backend, no persistence.
//!
//! Used for tests and for running the server without a data directory.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::model::{App, DeveloperApp, NewApp, NewCatalogueApp, NewReview, Review, SimilarApp};
use crate::store::Store;

#[derive(Default)]
struct Inner {
    apps: HashMap<String, App>,
    /// Review paired with its insertion sequence number, which breaks
    /// newest-first ties between identical timestamps.
    reviews: Vec<(u64, Review)>,
    developer_apps: Vec<DeveloperApp>,
    similar_apps: Vec<SimilarApp>,
    next_seq: u64,
    app_order: Vec<String>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_app(&self, id: &str) -> Result<Option<App>> {
        Ok(self.inner.read().await.apps.get(id).cloned())
    }

    async fn get_app_by_name(&self, name: &str) -> Result<Option<App>> {
        let inner = self.inner.read().await;
        Ok(inner.apps.values().find(|a| a.name == name).cloned())
    }

    async fn create_app(&self, app: NewApp) -> Result<App> {
        let mut inner = self.inner.write().await;
        let app = App {
            id: Uuid::new_v4().to_string(),
            name: app.name,
            developer: app.developer,
            category: app.category,
            icon: app.icon,
            rating: app.rating,
            total_reviews: app.total_reviews,
            downloads: app.downloads,
            content_rating: app.content_rating,
            description: app.description,
            last_updated: app.last_updated,
            version: app.version,
            screenshots: app.screenshots,
            created_at: Utc::now().to_rfc3339(),
        };
        inner.app_order.push(app.id.clone());
        inner.apps.insert(app.id.clone(), app.clone());
        Ok(app)
    }

    async fn get_all_apps(&self) -> Result<Vec<App>> {
        let inner = self.inner.read().await;
        Ok(inner
            .app_order
            .iter()
            .filter_map(|id| inner.apps.get(id).cloned())
            .collect())
    }

    async fn update_app_rating(&self, id: &str, rating: &str, total_reviews: i64) -> Result<()> {
        let mut inner = self.inner.write().await;
        let app = inner.apps.get_mut(id).ok_or(Error::NotFound("App"))?;
        app.rating = rating.to_string();
        app.total_reviews = total_reviews;
        Ok(())
    }

    async fn get_reviews_by_app_id(&self, app_id: &str) -> Result<Vec<Review>> {
        let inner = self.inner.read().await;
        let mut matching: Vec<&(u64, Review)> = inner
            .reviews
            .iter()
            .filter(|(_, r)| r.app_id == app_id)
            .collect();
        matching.sort_by(|(sa, ra), (sb, rb)| {
            rb.created_at.cmp(&ra.created_at).then(sb.cmp(sa))
        });
        Ok(matching.into_iter().map(|(_, r)| r.clone()).collect())
    }

    async fn create_review(&self, review: NewReview) -> Result<Review> {
        let mut inner = self.inner.write().await;
        if !inner.apps.contains_key(&review.app_id) {
            return Err(Error::NotFound("App"));
        }
        let created = Review {
            id: Uuid::new_v4().to_string(),
            app_id: review.app_id,
            user_name: review.user_name,
            user_avatar: review.user_avatar,
            rating: review.rating,
            content: review.content,
            created_at: Utc::now().to_rfc3339(),
        };
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.reviews.push((seq, created.clone()));
        Ok(created)
    }

    async fn get_developer_apps(&self, developer: &str) -> Result<Vec<DeveloperApp>> {
        let inner = self.inner.read().await;
        Ok(inner
            .developer_apps
            .iter()
            .filter(|a| a.developer == developer)
            .cloned()
            .collect())
    }

    async fn get_similar_apps(&self) -> Result<Vec<SimilarApp>> {
        Ok(self.inner.read().await.similar_apps.clone())
    }

    async fn create_developer_app(&self, app: NewCatalogueApp) -> Result<DeveloperApp> {
        let mut inner = self.inner.write().await;
        let app = DeveloperApp {
            id: Uuid::new_v4().to_string(),
            name: app.name,
            developer: app.developer,
            category: app.category,
            icon: app.icon,
            rating: app.rating,
        };
        inner.developer_apps.push(app.clone());
        Ok(app)
    }

    async fn create_similar_app(&self, app: NewCatalogueApp) -> Result<SimilarApp> {
        let mut inner = self.inner.write().await;
        let app = SimilarApp {
            id: Uuid::new_v4().to_string(),
            name: app.name,
            developer: app.developer,
            category: app.category,
            icon: app.icon,
            rating: app.rating,
        };
        inner.similar_apps.push(app.clone());
        Ok(app)
    }
}
