// rest/mod.rs — Public REST API server for the product page.
//
// Endpoints:
//   GET  /api/apps
//   GET  /api/apps/{id}
//   GET  /api/apps/by-name/{name}
//   GET  /api/apps/{id}/reviews
//   POST /api/apps/{id}/reviews
//   GET  /api/developer/{developer}/apps
//   GET  /api/similar-apps
//   GET  /api/health

pub mod routes;

use anyhow::Result;
use axum::{
    http::{header, HeaderValue},
    middleware::{self, Next},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::AppContext;

pub async fn start_rest_server(ctx: Arc<AppContext>) -> Result<()> {
    let bind = format!("{}:{}", ctx.config.bind_address, ctx.config.port);
    let addr: SocketAddr = bind.parse()?;

    let router = build_router(ctx);

    info!("REST API listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/api/health", get(routes::health::health))
        .route("/api/apps", get(routes::apps::list_apps))
        .route("/api/apps/by-name/{name}", get(routes::apps::get_app_by_name))
        .route("/api/apps/{id}", get(routes::apps::get_app))
        .route(
            "/api/apps/{id}/reviews",
            get(routes::reviews::list_reviews).post(routes::reviews::create_review),
        )
        .route(
            "/api/developer/{developer}/apps",
            get(routes::catalog::developer_apps),
        )
        .route("/api/similar-apps", get(routes::catalog::similar_apps))
        .layer(middleware::from_fn(no_store))
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}

/// Disable client and proxy caching on every API response. The displayed
/// rating must always reflect the latest write.
async fn no_store(request: axum::extract::Request, next: Next) -> axum::response::Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store, no-cache, must-revalidate, proxy-revalidate"),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    response
}
