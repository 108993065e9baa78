//! SQLite wardrobe store implementation

use std::path::Path;

use async_trait::async_trait;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use time::OffsetDateTime;
use wardrobe_stylist_domain::{ClothingItem, SavedOutfit, StoreError, WardrobeStore};

/// SQLite-backed wardrobe store
pub struct SqliteWardrobeStore {
    pool: SqlitePool,
}

impl SqliteWardrobeStore {
    /// Create a new SQLite wardrobe store, initializing the database if needed
    pub async fn new(db_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db_path = db_path.as_ref();

        // Create parent directories if needed
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Database(format!("Failed to create directory: {}", e)))?;
        }

        let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&db_url)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let store = Self { pool };
        store.run_migrations().await?;

        Ok(store)
    }

    /// Create an in-memory SQLite store (for testing)
    pub async fn in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let store = Self { pool };
        store.run_migrations().await?;

        Ok(store)
    }

    async fn run_migrations(&self) -> Result<(), StoreError> {
        // Create tables
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS clothing_items (
                id TEXT PRIMARY KEY,
                description TEXT NOT NULL,
                tags TEXT NOT NULL,
                image_uri TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS saved_outfits (
                id TEXT PRIMARY KEY,
                item_ids TEXT NOT NULL,
                date TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        // Create index for chronological listing
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_items_created
            ON clothing_items(created_at)
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }
}

type ItemRow = (String, String, String, Option<String>, String, String);

fn decode_item(row: ItemRow) -> Result<ClothingItem, StoreError> {
    let (id, description, tags_json, image_uri, created_at_str, updated_at_str) = row;

    let tags: Vec<String> = serde_json::from_str(&tags_json)
        .map_err(|e| StoreError::Serialization(e.to_string()))?;

    Ok(ClothingItem {
        id,
        description,
        tags,
        image_uri,
        created_at: parse_timestamp(&created_at_str)?,
        updated_at: parse_timestamp(&updated_at_str)?,
    })
}

fn parse_timestamp(value: &str) -> Result<OffsetDateTime, StoreError> {
    OffsetDateTime::parse(value, &time::format_description::well_known::Rfc3339)
        .map_err(|e| StoreError::Serialization(e.to_string()))
}

fn format_timestamp(value: OffsetDateTime) -> Result<String, StoreError> {
    // Fixed-width UTC text: RFC 3339 trims subsecond digits, which breaks
    // the lexicographic ORDER BY on these columns. Padding to nine digits
    // keeps string order chronological.
    let format = time::format_description::parse(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:9]Z",
    )
    .map_err(|e| StoreError::Serialization(e.to_string()))?;
    value
        .to_offset(time::UtcOffset::UTC)
        .format(&format)
        .map_err(|e| StoreError::Serialization(e.to_string()))
}

#[async_trait]
impl WardrobeStore for SqliteWardrobeStore {
    async fn list_items(&self) -> Result<Vec<ClothingItem>, StoreError> {
        let rows: Vec<ItemRow> = sqlx::query_as(
            r#"
            SELECT id, description, tags, image_uri, created_at, updated_at
            FROM clothing_items
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.into_iter().map(decode_item).collect()
    }

    async fn get_item(&self, id: &str) -> Result<Option<ClothingItem>, StoreError> {
        let row: Option<ItemRow> = sqlx::query_as(
            r#"
            SELECT id, description, tags, image_uri, created_at, updated_at
            FROM clothing_items
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(decode_item).transpose()
    }

    async fn save_item(&self, item: &ClothingItem) -> Result<(), StoreError> {
        let tags_json = serde_json::to_string(&item.tags)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO clothing_items (id, description, tags, image_uri, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                description = excluded.description,
                tags = excluded.tags,
                image_uri = excluded.image_uri,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&item.id)
        .bind(&item.description)
        .bind(&tags_json)
        .bind(&item.image_uri)
        .bind(format_timestamp(item.created_at)?)
        .bind(format_timestamp(item.updated_at)?)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    async fn delete_item(&self, id: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM clothing_items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("clothing item {}", id)));
        }

        Ok(())
    }

    async fn save_outfit(&self, outfit: &SavedOutfit) -> Result<(), StoreError> {
        let item_ids_json = serde_json::to_string(&outfit.item_ids)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO saved_outfits (id, item_ids, date, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&outfit.id)
        .bind(&item_ids_json)
        .bind(format_timestamp(outfit.date)?)
        .bind(format_timestamp(outfit.created_at)?)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    async fn list_outfits(&self) -> Result<Vec<SavedOutfit>, StoreError> {
        let rows: Vec<(String, String, String, String)> = sqlx::query_as(
            r#"
            SELECT id, item_ids, date, created_at
            FROM saved_outfits
            ORDER BY created_at DESC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.into_iter()
            .map(|(id, item_ids_json, date_str, created_at_str)| {
                let item_ids: Vec<String> = serde_json::from_str(&item_ids_json)
                    .map_err(|e| StoreError::Serialization(e.to_string()))?;
                Ok(SavedOutfit {
                    id,
                    item_ids,
                    date: parse_timestamp(&date_str)?,
                    created_at: parse_timestamp(&created_at_str)?,
                })
            })
            .collect()
    }

    async fn delete_outfit(&self, id: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM saved_outfits WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("saved outfit {}", id)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_at(id: &str, tags: &[&str], unix_seconds: i64) -> ClothingItem {
        let at = OffsetDateTime::from_unix_timestamp(unix_seconds).unwrap();
        ClothingItem {
            id: id.to_string(),
            description: format!("{} description", id),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            image_uri: Some(format!("file:///images/{}.jpg", id)),
            created_at: at,
            updated_at: at,
        }
    }

    #[tokio::test]
    async fn test_item_roundtrip() {
        let store = SqliteWardrobeStore::in_memory().await.unwrap();
        let item = item_at("item-1", &["jeans", "blue", "bottomwear"], 1_700_000_000);

        store.save_item(&item).await.unwrap();
        let retrieved = store.get_item("item-1").await.unwrap().unwrap();

        assert_eq!(retrieved.description, "item-1 description");
        assert_eq!(retrieved.tags, vec!["jeans", "blue", "bottomwear"]);
        assert_eq!(retrieved.created_at, item.created_at);
    }

    #[tokio::test]
    async fn test_get_nonexistent_item() {
        let store = SqliteWardrobeStore::in_memory().await.unwrap();

        let retrieved = store.get_item("missing").await.unwrap();

        assert!(retrieved.is_none());
    }

    #[tokio::test]
    async fn test_save_item_upserts() {
        let store = SqliteWardrobeStore::in_memory().await.unwrap();
        let mut item = item_at("item-1", &["shirt"], 1_700_000_000);
        store.save_item(&item).await.unwrap();

        item.description = "updated description".to_string();
        item.tags.push("casual".to_string());
        store.save_item(&item).await.unwrap();

        let items = store.list_items().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "updated description");
        assert_eq!(items[0].tags, vec!["shirt", "casual"]);
    }

    #[tokio::test]
    async fn test_list_items_oldest_first() {
        let store = SqliteWardrobeStore::in_memory().await.unwrap();
        store
            .save_item(&item_at("newer", &["shirt"], 1_700_000_200))
            .await
            .unwrap();
        store
            .save_item(&item_at("older", &["jeans"], 1_700_000_100))
            .await
            .unwrap();

        let items = store.list_items().await.unwrap();

        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["older", "newer"]);
    }

    #[test]
    fn test_format_timestamp_pads_subseconds() {
        let whole = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        let fractional =
            OffsetDateTime::from_unix_timestamp_nanos(1_700_000_000_510_000_000).unwrap();

        assert_eq!(
            format_timestamp(whole).unwrap(),
            "2023-11-14T22:13:20.000000000Z"
        );
        assert_eq!(
            format_timestamp(fractional).unwrap(),
            "2023-11-14T22:13:20.510000000Z"
        );
    }

    #[tokio::test]
    async fn test_list_items_orders_subsecond_timestamps() {
        // Trimmed RFC 3339 text would sort "…20Z" after "…20.5Z" and
        // "…20.5Z" after "…20.51Z"; the padded format keeps these in
        // chronological order.
        let store = SqliteWardrobeStore::in_memory().await.unwrap();
        let base_nanos = 1_700_000_000_i128 * 1_000_000_000;
        for (id, nanos) in [
            ("middle", base_nanos + 500_000_000),
            ("newest", base_nanos + 510_000_000),
            ("oldest", base_nanos),
        ] {
            let at = OffsetDateTime::from_unix_timestamp_nanos(nanos).unwrap();
            let mut item = item_at(id, &["shirt"], 0);
            item.created_at = at;
            item.updated_at = at;
            store.save_item(&item).await.unwrap();
        }

        let items = store.list_items().await.unwrap();

        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["oldest", "middle", "newest"]);
    }

    #[tokio::test]
    async fn test_delete_item() {
        let store = SqliteWardrobeStore::in_memory().await.unwrap();
        store
            .save_item(&item_at("item-1", &["shirt"], 1_700_000_000))
            .await
            .unwrap();

        store.delete_item("item-1").await.unwrap();

        assert!(store.list_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_item_is_not_found() {
        let store = SqliteWardrobeStore::in_memory().await.unwrap();

        let err = store.delete_item("missing").await.unwrap_err();

        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_outfits_roundtrip_newest_first() {
        let store = SqliteWardrobeStore::in_memory().await.unwrap();
        let older = SavedOutfit {
            id: "outfit-1".to_string(),
            item_ids: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            date: OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap(),
            created_at: OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap(),
        };
        let newer = SavedOutfit {
            id: "outfit-2".to_string(),
            item_ids: vec!["d".to_string(), "e".to_string(), "f".to_string()],
            date: OffsetDateTime::from_unix_timestamp(1_700_000_500).unwrap(),
            created_at: OffsetDateTime::from_unix_timestamp(1_700_000_500).unwrap(),
        };

        store.save_outfit(&older).await.unwrap();
        store.save_outfit(&newer).await.unwrap();

        let outfits = store.list_outfits().await.unwrap();
        let ids: Vec<&str> = outfits.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["outfit-2", "outfit-1"]);
        assert_eq!(outfits[1].item_ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_delete_missing_outfit_is_not_found() {
        let store = SqliteWardrobeStore::in_memory().await.unwrap();

        let err = store.delete_outfit("missing").await.unwrap_err();

        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
