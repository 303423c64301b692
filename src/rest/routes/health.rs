use crate::AppContext;
use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;

pub async fn health(State(ctx): State<Arc<AppContext>>) -> Json<Value> {
    let uptime = ctx.started_at.elapsed().as_secs();
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
        "uptime": uptime,
        "version": env!("CARGO_PKG_VERSION"),
        "environment": ctx.config.environment,
    }))
}
