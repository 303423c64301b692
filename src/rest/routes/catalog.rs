// rest/routes/catalog.rs — Static catalogue strips.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::error::Result;
use crate::model::{DeveloperApp, SimilarApp};
use crate::AppContext;

pub async fn developer_apps(
    State(ctx): State<Arc<AppContext>>,
    Path(developer): Path<String>,
) -> Result<Json<Vec<DeveloperApp>>> {
    Ok(Json(ctx.queries.developer_apps(&developer).await?))
}

pub async fn similar_apps(State(ctx): State<Arc<AppContext>>) -> Result<Json<Vec<SimilarApp>>> {
    Ok(Json(ctx.queries.similar_apps().await?))
}
