// rest/routes/apps.rs — App lookup routes.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::model::App;
use crate::AppContext;

pub async fn list_apps(State(ctx): State<Arc<AppContext>>) -> Result<Json<Vec<App>>> {
    Ok(Json(ctx.queries.all_apps().await?))
}

pub async fn get_app(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Json<App>> {
    match ctx.queries.app(&id).await? {
        Some(app) => Ok(Json(app)),
        None => Err(Error::NotFound("App")),
    }
}

/// Exact name match. Axum percent-decodes the path segment, so
/// `by-name/Unknown%20App` looks up `"Unknown App"`.
pub async fn get_app_by_name(
    State(ctx): State<Arc<AppContext>>,
    Path(name): Path<String>,
) -> Result<Json<App>> {
    match ctx.queries.app_by_name(&name).await? {
        Some(app) => Ok(Json(app)),
        None => Err(Error::NotFound("App")),
    }
}
