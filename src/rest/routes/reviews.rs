// rest/routes/reviews.rs — Review listing and submission.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::model::Review;
use crate::review::ReviewSubmission;
use crate::AppContext;

/// Reviews for an app, newest-first. An app with no reviews (or an unknown
/// id) yields an empty array, matching the read contract.
pub async fn list_reviews(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Review>>> {
    Ok(Json(ctx.queries.reviews_for_app(&id).await?))
}

pub async fn create_review(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<ReviewSubmission>, JsonRejection>,
) -> Result<(StatusCode, Json<Review>)> {
    // A body that fails to deserialize (missing field, non-integer rating,
    // malformed JSON) is a validation failure like any other: 400 with the
    // same `{"message": ...}` body, not the extractor's plain-text reply.
    let Json(submission) = payload.map_err(|rej| Error::validation(rej.body_text()))?;
    let review = ctx.reviews.submit_review(&id, submission).await?;
    Ok((StatusCode::CREATED, Json(review)))
}
