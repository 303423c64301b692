//! Wire and storage models for the product page.
//!
//! Field names serialize in camelCase to match the JSON the storefront client
//! consumes. `rating` fields are strings with one fractional digit ("4.6") —
//! the display format — never floats.

use serde::{Deserialize, Serialize};

/// The showcased application with its aggregate rating.
///
/// `rating` and `total_reviews` are owned by the aggregation path: outside of
/// seeding, only `Store::update_app_rating` may change them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct App {
    pub id: String,
    pub name: String,
    pub developer: String,
    pub category: String,
    pub icon: String,
    pub rating: String,
    pub total_reviews: i64,
    pub downloads: String,
    pub content_rating: String,
    pub description: String,
    pub last_updated: String,
    pub version: String,
    pub screenshots: Vec<String>,
    /// RFC 3339 UTC, server-assigned.
    pub created_at: String,
}

/// Insert form for [`App`] — id and timestamp are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApp {
    pub name: String,
    pub developer: String,
    pub category: String,
    pub icon: String,
    pub rating: String,
    pub total_reviews: i64,
    pub downloads: String,
    pub content_rating: String,
    pub description: String,
    pub last_updated: String,
    pub version: String,
    pub screenshots: Vec<String>,
}

/// A user-submitted star review, immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub app_id: String,
    pub user_name: String,
    pub user_avatar: String,
    pub rating: i64,
    pub content: String,
    /// RFC 3339 UTC, server-assigned. Reviews list newest-first.
    pub created_at: String,
}

/// Insert form for [`Review`]. Validated by `ReviewService` before it
/// reaches a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub app_id: String,
    pub user_name: String,
    pub user_avatar: String,
    pub rating: i64,
    pub content: String,
}

/// Catalogue row for the "more by this developer" strip.
///
/// Static seed data; related to an [`App`] only by developer name match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperApp {
    pub id: String,
    pub name: String,
    pub developer: String,
    pub category: String,
    pub icon: String,
    pub rating: String,
}

/// Catalogue row for the "similar apps" strip. Global, not scoped to an app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarApp {
    pub id: String,
    pub name: String,
    pub developer: String,
    pub category: String,
    pub icon: String,
    pub rating: String,
}

/// Insert form shared by [`DeveloperApp`] and [`SimilarApp`] — both tables
/// carry the same columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCatalogueApp {
    pub name: String,
    pub developer: String,
    pub category: String,
    pub icon: String,
    pub rating: String,
}
