//! Review submission — validation, persistence, and aggregate refresh.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::warn;

use crate::error::{Error, Result};
use crate::model::{NewReview, Review};
use crate::rating;
use crate::store::Store;

const MAX_USER_NAME_CHARS: usize = 50;
const MAX_CONTENT_CHARS: usize = 500;

/// A review as submitted by a client, before validation.
///
/// `rating` is optional on the wire: an absent (or zero) rating is an
/// incomplete submission, rejected before anything is stored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSubmission {
    pub user_name: String,
    pub rating: Option<i64>,
    pub content: String,
    #[serde(default)]
    pub user_avatar: Option<String>,
}

pub struct ReviewService {
    store: Arc<dyn Store>,
    /// Per-app submission locks. Serializes the persist → recompute →
    /// write-back sequence for one app so concurrent submissions cannot
    /// overwrite each other's aggregate.
    app_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ReviewService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            app_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Validate and admit a review, then bring the app's `(rating,
    /// totalReviews)` pair in line with its stored review set.
    ///
    /// If the aggregate write-back fails after the review was persisted, the
    /// failure is logged and the created review is still returned — the
    /// aggregate heals on the next successful submission.
    pub async fn submit_review(&self, app_id: &str, submission: ReviewSubmission) -> Result<Review> {
        let new_review = validate(app_id, submission)?;

        // Confirm the app exists before taking a lock entry: the lock map is
        // keyed by caller-supplied ids and must only ever hold keys for real
        // apps, or repeated submissions against random ids would grow it
        // without bound. Apps are never deleted, so the check cannot go
        // stale before `create_review` re-validates the reference.
        if self.store.get_app(app_id).await?.is_none() {
            return Err(Error::NotFound("App"));
        }

        let lock = self.lock_for(app_id).await;
        let _guard = lock.lock().await;

        let review = self.store.create_review(new_review).await?;

        if let Err(e) = self.refresh_aggregate(app_id).await {
            warn!(
                app_id,
                review_id = %review.id,
                err = %e,
                "review persisted but aggregate update failed; app rating is stale"
            );
        }

        Ok(review)
    }

    async fn refresh_aggregate(&self, app_id: &str) -> Result<()> {
        let reviews = self.store.get_reviews_by_app_id(app_id).await?;
        // Empty set cannot happen right after a successful insert, but the
        // aggregator's contract is explicit: no reviews, no write-back.
        if let Some(agg) = rating::aggregate(&reviews) {
            self.store
                .update_app_rating(app_id, &agg.rating, agg.total_reviews)
                .await?;
        }
        Ok(())
    }

    async fn lock_for(&self, app_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.app_locks.lock().await;
        locks
            .entry(app_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// Check submission constraints and build the insert form.
///
/// Limits are counted in characters after trimming; exactly 50/500 characters
/// is accepted.
fn validate(app_id: &str, submission: ReviewSubmission) -> Result<NewReview> {
    let rating = match submission.rating {
        None | Some(0) => {
            return Err(Error::validation("incomplete submission: rating is required"))
        }
        Some(r) if !(1..=5).contains(&r) => {
            return Err(Error::validation("rating must be between 1 and 5"))
        }
        Some(r) => r,
    };

    let user_name = submission.user_name.trim();
    if user_name.is_empty() {
        return Err(Error::validation("userName must not be empty"));
    }
    if user_name.chars().count() > MAX_USER_NAME_CHARS {
        return Err(Error::validation(format!(
            "userName must be at most {MAX_USER_NAME_CHARS} characters"
        )));
    }

    let content = submission.content.trim();
    if content.is_empty() {
        return Err(Error::validation("content must not be empty"));
    }
    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err(Error::validation(format!(
            "content must be at most {MAX_CONTENT_CHARS} characters"
        )));
    }

    Ok(NewReview {
        app_id: app_id.to_string(),
        user_name: user_name.to_string(),
        user_avatar: submission.user_avatar.unwrap_or_default(),
        rating,
        content: content.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewApp;
    use crate::store::MemoryStore;

    fn submission(rating: Option<i64>) -> ReviewSubmission {
        ReviewSubmission {
            user_name: "A".to_string(),
            rating,
            content: "Great".to_string(),
            user_avatar: None,
        }
    }

    fn test_app() -> NewApp {
        NewApp {
            name: "X".to_string(),
            developer: "Dev".to_string(),
            category: "Tools".to_string(),
            icon: "/icon.png".to_string(),
            rating: "4.6".to_string(),
            total_reviews: 0,
            downloads: "1M+".to_string(),
            content_rating: "4+".to_string(),
            description: "desc".to_string(),
            last_updated: "Jan 1, 2026".to_string(),
            version: "1.0.0".to_string(),
            screenshots: vec![],
        }
    }

    async fn service_with_app() -> (ReviewService, String, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let app = store.create_app(test_app()).await.unwrap();
        (ReviewService::new(store.clone()), app.id, store)
    }

    #[tokio::test]
    async fn missing_rating_is_incomplete() {
        let (svc, app_id, store) = service_with_app().await;
        let err = svc.submit_review(&app_id, submission(None)).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("incomplete submission"));
        // No partial write.
        assert!(store.get_reviews_by_app_id(&app_id).await.unwrap().is_empty());
        assert_eq!(store.get_app(&app_id).await.unwrap().unwrap().rating, "4.6");
    }

    #[tokio::test]
    async fn zero_rating_is_incomplete() {
        let (svc, app_id, _) = service_with_app().await;
        let err = svc.submit_review(&app_id, submission(Some(0))).await.unwrap_err();
        assert!(err.to_string().contains("incomplete submission"));
    }

    #[tokio::test]
    async fn out_of_range_rating_is_rejected() {
        let (svc, app_id, _) = service_with_app().await;
        let err = svc.submit_review(&app_id, submission(Some(6))).await.unwrap_err();
        assert!(err.to_string().contains("between 1 and 5"));
    }

    #[tokio::test]
    async fn whitespace_only_user_name_is_rejected() {
        let (svc, app_id, _) = service_with_app().await;
        let mut s = submission(Some(5));
        s.user_name = "   ".to_string();
        let err = svc.submit_review(&app_id, s).await.unwrap_err();
        assert!(err.to_string().contains("userName"));
    }

    #[tokio::test]
    async fn whitespace_only_content_is_rejected() {
        let (svc, app_id, _) = service_with_app().await;
        let mut s = submission(Some(5));
        s.content = " \t\n".to_string();
        let err = svc.submit_review(&app_id, s).await.unwrap_err();
        assert!(err.to_string().contains("content"));
    }

    #[tokio::test]
    async fn boundary_lengths_are_accepted() {
        let (svc, app_id, _) = service_with_app().await;
        let mut s = submission(Some(4));
        s.user_name = "n".repeat(50);
        s.content = "c".repeat(500);
        let review = svc.submit_review(&app_id, s).await.unwrap();
        assert_eq!(review.user_name.chars().count(), 50);
        assert_eq!(review.content.chars().count(), 500);
    }

    #[tokio::test]
    async fn over_limit_lengths_are_rejected() {
        let (svc, app_id, _) = service_with_app().await;

        let mut s = submission(Some(4));
        s.user_name = "n".repeat(51);
        assert!(svc.submit_review(&app_id, s).await.is_err());

        let mut s = submission(Some(4));
        s.content = "c".repeat(501);
        assert!(svc.submit_review(&app_id, s).await.is_err());
    }

    #[tokio::test]
    async fn unknown_app_is_not_found() {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let svc = ReviewService::new(store);
        let err = svc.submit_review("nope", submission(Some(5))).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn aggregate_recomputes_after_each_submission() {
        let (svc, app_id, store) = service_with_app().await;

        svc.submit_review(&app_id, submission(Some(5))).await.unwrap();
        let app = store.get_app(&app_id).await.unwrap().unwrap();
        assert_eq!(app.rating, "5.0");
        assert_eq!(app.total_reviews, 1);

        let mut second = submission(Some(3));
        second.user_name = "B".to_string();
        second.content = "Ok".to_string();
        svc.submit_review(&app_id, second).await.unwrap();
        let app = store.get_app(&app_id).await.unwrap().unwrap();
        assert_eq!(app.rating, "4.0");
        assert_eq!(app.total_reviews, 2);
    }

    #[tokio::test]
    async fn unknown_app_leaves_no_lock_entry_behind() {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let svc = ReviewService::new(store);
        for i in 0..20 {
            let err = svc
                .submit_review(&format!("bogus-{i}"), submission(Some(5)))
                .await
                .unwrap_err();
            assert!(matches!(err, Error::NotFound(_)));
        }
        assert!(svc.app_locks.lock().await.is_empty());
    }

    #[tokio::test]
    async fn concurrent_submissions_all_land_in_the_aggregate() {
        let (svc, app_id, store) = service_with_app().await;
        let svc = Arc::new(svc);

        let ratings = [1, 2, 3, 4, 5, 1, 2, 3, 4, 5];
        let mut handles = Vec::new();
        for (i, &r) in ratings.iter().enumerate() {
            let svc = svc.clone();
            let app_id = app_id.clone();
            handles.push(tokio::spawn(async move {
                let mut s = submission(Some(r));
                s.user_name = format!("user-{i}");
                svc.submit_review(&app_id, s).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        // No submission's aggregate write-back may overwrite another's: the
        // final pair must reflect all ten reviews. Mean of the set is 3.0.
        let app = store.get_app(&app_id).await.unwrap().unwrap();
        assert_eq!(app.total_reviews, 10);
        assert_eq!(app.rating, "3.0");
        assert_eq!(
            store.get_reviews_by_app_id(&app_id).await.unwrap().len(),
            10
        );
    }

    #[tokio::test]
    async fn input_is_trimmed_before_storage() {
        let (svc, app_id, _) = service_with_app().await;
        let mut s = submission(Some(5));
        s.user_name = "  Mai  ".to_string();
        s.content = "  Loved it  ".to_string();
        let review = svc.submit_review(&app_id, s).await.unwrap();
        assert_eq!(review.user_name, "Mai");
        assert_eq!(review.content, "Loved it");
    }
}
