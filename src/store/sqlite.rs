//! SQLite-backed store (WAL mode, single file under the data directory).

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{sqlite::SqliteConnectOptions, SqlitePool};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::model::{App, DeveloperApp, NewApp, NewCatalogueApp, NewReview, Review, SimilarApp};
use crate::store::Store;

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

#[derive(Debug, sqlx::FromRow)]
struct AppRow {
    id: String,
    name: String,
    developer: String,
    category: String,
    icon: String,
    rating: String,
    total_reviews: i64,
    downloads: String,
    content_rating: String,
    description: String,
    last_updated: String,
    version: String,
    /// JSON array of screenshot URLs.
    screenshots: String,
    created_at: String,
}

impl AppRow {
    fn into_app(self) -> App {
        let screenshots = serde_json::from_str(&self.screenshots).unwrap_or_default();
        App {
            id: self.id,
            name: self.name,
            developer: self.developer,
            category: self.category,
            icon: self.icon,
            rating: self.rating,
            total_reviews: self.total_reviews,
            downloads: self.downloads,
            content_rating: self.content_rating,
            description: self.description,
            last_updated: self.last_updated,
            version: self.version,
            screenshots,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    id: String,
    app_id: String,
    user_name: String,
    user_avatar: String,
    rating: i64,
    content: String,
    created_at: String,
}

impl From<ReviewRow> for Review {
    fn from(r: ReviewRow) -> Self {
        Review {
            id: r.id,
            app_id: r.app_id,
            user_name: r.user_name,
            user_avatar: r.user_avatar,
            rating: r.rating,
            content: r.content,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CatalogueRow {
    id: String,
    name: String,
    developer: String,
    category: String,
    icon: String,
    rating: String,
}

impl SqliteStore {
    /// Open (creating if missing) `storefront.db` under `data_dir` and run
    /// the schema migration.
    pub async fn new(data_dir: &Path) -> Result<Self> {
        tokio::fs::create_dir_all(data_dir)
            .await
            .map_err(|e| Error::Storage(sqlx::Error::Io(e)))?;
        let db_path = data_dir.join("storefront.db");
        let opts =
            SqliteConnectOptions::from_str(&format!("sqlite://{}?mode=rwc", db_path.display()))?
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
                .create_if_missing(true);

        let pool = SqlitePool::connect_with(opts).await?;
        Self::migrate(&pool).await?;
        Ok(Self { pool })
    }

    async fn migrate(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS apps (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                developer TEXT NOT NULL,
                category TEXT NOT NULL,
                icon TEXT NOT NULL,
                rating TEXT NOT NULL,
                total_reviews INTEGER NOT NULL,
                downloads TEXT NOT NULL,
                content_rating TEXT NOT NULL,
                description TEXT NOT NULL,
                last_updated TEXT NOT NULL,
                version TEXT NOT NULL,
                screenshots TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS reviews (
                id TEXT PRIMARY KEY,
                app_id TEXT NOT NULL REFERENCES apps(id),
                user_name TEXT NOT NULL,
                user_avatar TEXT NOT NULL,
                rating INTEGER NOT NULL,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_reviews_app_id ON reviews (app_id, created_at)",
        )
        .execute(pool)
        .await?;

        for table in ["developer_apps", "similar_apps"] {
            sqlx::query(&format!(
                r"
                CREATE TABLE IF NOT EXISTS {table} (
                    id TEXT PRIMARY KEY,
                    name TEXT NOT NULL,
                    developer TEXT NOT NULL,
                    category TEXT NOT NULL,
                    icon TEXT NOT NULL,
                    rating TEXT NOT NULL
                )
                "
            ))
            .execute(pool)
            .await?;
        }

        Ok(())
    }

    async fn insert_catalogue_row(&self, table: &str, app: &NewCatalogueApp) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        sqlx::query(&format!(
            "INSERT INTO {table} (id, name, developer, category, icon, rating) \
             VALUES (?, ?, ?, ?, ?, ?)"
        ))
        .bind(&id)
        .bind(&app.name)
        .bind(&app.developer)
        .bind(&app.category)
        .bind(&app.icon)
        .bind(&app.rating)
        .execute(&self.pool)
        .await?;
        Ok(id)
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn get_app(&self, id: &str) -> Result<Option<App>> {
        let row: Option<AppRow> = sqlx::query_as("SELECT * FROM apps WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(AppRow::into_app))
    }

    async fn get_app_by_name(&self, name: &str) -> Result<Option<App>> {
        let row: Option<AppRow> = sqlx::query_as("SELECT * FROM apps WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(AppRow::into_app))
    }

    async fn create_app(&self, app: NewApp) -> Result<App> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let screenshots = serde_json::to_string(&app.screenshots)
            .map_err(|e| Error::Storage(sqlx::Error::Encode(Box::new(e))))?;
        sqlx::query(
            "INSERT INTO apps (id, name, developer, category, icon, rating, total_reviews, \
             downloads, content_rating, description, last_updated, version, screenshots, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&app.name)
        .bind(&app.developer)
        .bind(&app.category)
        .bind(&app.icon)
        .bind(&app.rating)
        .bind(app.total_reviews)
        .bind(&app.downloads)
        .bind(&app.content_rating)
        .bind(&app.description)
        .bind(&app.last_updated)
        .bind(&app.version)
        .bind(&screenshots)
        .bind(&now)
        .execute(&self.pool)
        .await?;
        self.get_app(&id)
            .await?
            .ok_or(Error::Storage(sqlx::Error::RowNotFound))
    }

    async fn get_all_apps(&self) -> Result<Vec<App>> {
        let rows: Vec<AppRow> = sqlx::query_as("SELECT * FROM apps ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(AppRow::into_app).collect())
    }

    async fn update_app_rating(&self, id: &str, rating: &str, total_reviews: i64) -> Result<()> {
        let result = sqlx::query("UPDATE apps SET rating = ?, total_reviews = ? WHERE id = ?")
            .bind(rating)
            .bind(total_reviews)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("App"));
        }
        Ok(())
    }

    async fn get_reviews_by_app_id(&self, app_id: &str) -> Result<Vec<Review>> {
        // rowid breaks ties for reviews created within the same instant.
        let rows: Vec<ReviewRow> = sqlx::query_as(
            "SELECT * FROM reviews WHERE app_id = ? ORDER BY created_at DESC, rowid DESC",
        )
        .bind(app_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Review::from).collect())
    }

    async fn create_review(&self, review: NewReview) -> Result<Review> {
        let exists: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM apps WHERE id = ?")
            .bind(&review.app_id)
            .fetch_one(&self.pool)
            .await?;
        if exists.0 == 0 {
            return Err(Error::NotFound("App"));
        }

        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO reviews (id, app_id, user_name, user_avatar, rating, content, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&review.app_id)
        .bind(&review.user_name)
        .bind(&review.user_avatar)
        .bind(review.rating)
        .bind(&review.content)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        let row: ReviewRow = sqlx::query_as("SELECT * FROM reviews WHERE id = ?")
            .bind(&id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn get_developer_apps(&self, developer: &str) -> Result<Vec<DeveloperApp>> {
        let rows: Vec<CatalogueRow> =
            sqlx::query_as("SELECT * FROM developer_apps WHERE developer = ?")
                .bind(developer)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows
            .into_iter()
            .map(|r| DeveloperApp {
                id: r.id,
                name: r.name,
                developer: r.developer,
                category: r.category,
                icon: r.icon,
                rating: r.rating,
            })
            .collect())
    }

    async fn get_similar_apps(&self) -> Result<Vec<SimilarApp>> {
        let rows: Vec<CatalogueRow> = sqlx::query_as("SELECT * FROM similar_apps ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| SimilarApp {
                id: r.id,
                name: r.name,
                developer: r.developer,
                category: r.category,
                icon: r.icon,
                rating: r.rating,
            })
            .collect())
    }

    async fn create_developer_app(&self, app: NewCatalogueApp) -> Result<DeveloperApp> {
        let id = self.insert_catalogue_row("developer_apps", &app).await?;
        Ok(DeveloperApp {
            id,
            name: app.name,
            developer: app.developer,
            category: app.category,
            icon: app.icon,
            rating: app.rating,
        })
    }

    async fn create_similar_app(&self, app: NewCatalogueApp) -> Result<SimilarApp> {
        let id = self.insert_catalogue_row("similar_apps", &app).await?;
        Ok(SimilarApp {
            id,
            name: app.name,
            developer: app.developer,
            category: app.category,
            icon: app.icon,
            rating: app.rating,
        })
    }
}
