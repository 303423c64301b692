//! Startup seed data for the product page.
//!
//! Invoked explicitly once from `main` after the store is constructed.
//! Idempotent: a store that already holds any app is left untouched.

use tracing::info;

use crate::error::Result;
use crate::model::{NewApp, NewCatalogueApp, NewReview};
use crate::store::Store;

/// Seed the flagship app, its initial reviews, and the static catalogue
/// strips, unless the store already has data.
pub async fn seed_if_empty(store: &dyn Store) -> Result<()> {
    if !store.get_all_apps().await?.is_empty() {
        info!("store already seeded, skipping");
        return Ok(());
    }

    let app = store
        .create_app(NewApp {
            name: "Lumina AI - Photo Editor".to_string(),
            developer: "Northlight Labs".to_string(),
            category: "Photography".to_string(),
            icon: "/appstore.png".to_string(),
            rating: "4.6".to_string(),
            total_reviews: 24800,
            downloads: "5M+".to_string(),
            content_rating: "4+".to_string(),
            description: "Lumina AI brings a full photo studio to your pocket. \
Remove backgrounds with one tap, erase unwanted objects and passers-by, \
upscale old photos to crisp 4K, expand images beyond their borders, and turn \
a text prompt into a finished picture. Trusted by millions of creators \
worldwide."
                .to_string(),
            last_updated: "Jul 31, 2025".to_string(),
            version: "2.1.4".to_string(),
            screenshots: vec![
                "https://images.unsplash.com/photo-1512941937669-90a1b58e7e9c?w=200&h=356&fit=crop".to_string(),
                "https://images.unsplash.com/photo-1551650975-87deedd944c3?w=200&h=356&fit=crop".to_string(),
                "https://images.unsplash.com/photo-1563013544-824ae1b704d3?w=200&h=356&fit=crop".to_string(),
                "https://images.unsplash.com/photo-1556656793-08538906a9f8?w=200&h=356&fit=crop".to_string(),
                "https://images.unsplash.com/photo-1574192324001-ee41e18ed679?w=200&h=356&fit=crop".to_string(),
            ],
        })
        .await?;

    let seed_reviews = [
        (
            "Mai Nguyen",
            5,
            "Outstanding! The background removal is pixel-perfect, one tap and the \
photo looks professional. The text-to-image mode is my favorite.",
        ),
        (
            "Duc Tran",
            5,
            "Product shots for my online shop got so much easier. The AI upscaler \
makes everything razor sharp - customers noticed immediately.",
        ),
        (
            "Huong Le",
            4,
            "Very powerful app. Object removal looks completely natural; I use it \
to erase strangers from travel photos and the results are like magic.",
        ),
    ];
    for (user_name, rating, content) in seed_reviews {
        store
            .create_review(NewReview {
                app_id: app.id.clone(),
                user_name: user_name.to_string(),
                user_avatar: String::new(),
                rating,
                content: content.to_string(),
            })
            .await?;
    }

    store
        .create_developer_app(NewCatalogueApp {
            name: "Lumina AI - Photo Editor".to_string(),
            developer: "Northlight Labs".to_string(),
            category: "Photography".to_string(),
            icon: "/appstore.png".to_string(),
            rating: "4.8".to_string(),
        })
        .await?;

    let similar = [
        ("Snapseed", "Google LLC", "Photography", "4.0"),
        ("Adobe Lightroom", "Adobe", "Photography", "4.6"),
        ("Photoshop Express", "Adobe", "Photography", "4.6"),
        ("PicsArt Photo Editor", "PicsArt, Inc.", "Photography", "4.1"),
        ("Remini - AI Photo Enhancer", "Bending Spoons", "Photography", "4.2"),
        ("VSCO Photo Editor", "VSCO", "Photography", "4.3"),
        ("Canva: Design & Photo", "Canva", "Art & Design", "4.7"),
        ("InShot Video Editor", "InShot Inc.", "Video", "4.6"),
    ];
    for (name, developer, category, rating) in similar {
        store
            .create_similar_app(NewCatalogueApp {
                name: name.to_string(),
                developer: developer.to_string(),
                category: category.to_string(),
                icon: "https://images.unsplash.com/photo-1611224923853-80b023f02d71?w=48&h=48&fit=crop"
                    .to_string(),
                rating: rating.to_string(),
            })
            .await?;
    }

    info!(app_id = %app.id, "seeded flagship app and catalogue");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn seeds_once_and_only_once() {
        let store = MemoryStore::new();
        seed_if_empty(&store).await.unwrap();
        seed_if_empty(&store).await.unwrap();

        let apps = store.get_all_apps().await.unwrap();
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].rating, "4.6");
        assert_eq!(apps[0].total_reviews, 24800);

        let reviews = store.get_reviews_by_app_id(&apps[0].id).await.unwrap();
        assert_eq!(reviews.len(), 3);

        assert_eq!(store.get_similar_apps().await.unwrap().len(), 8);
        assert_eq!(
            store.get_developer_apps("Northlight Labs").await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn seeded_reviews_do_not_touch_the_default_rating() {
        let store = MemoryStore::new();
        seed_if_empty(&store).await.unwrap();
        let app = &store.get_all_apps().await.unwrap()[0];
        // Seeding bypasses the aggregation path on purpose.
        assert_eq!(app.rating, "4.6");
    }
}
