//! In-memory wardrobe store for testing and offline use

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use wardrobe_stylist_domain::{ClothingItem, SavedOutfit, StoreError, WardrobeStore};

/// In-memory wardrobe store implementation
pub struct InMemoryWardrobeStore {
    items: RwLock<HashMap<String, ClothingItem>>,
    outfits: RwLock<HashMap<String, SavedOutfit>>,
}

impl InMemoryWardrobeStore {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
            outfits: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryWardrobeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WardrobeStore for InMemoryWardrobeStore {
    async fn list_items(&self) -> Result<Vec<ClothingItem>, StoreError> {
        let items = self
            .items
            .read()
            .map_err(|e| StoreError::Database(e.to_string()))?;
        let mut items: Vec<ClothingItem> = items.values().cloned().collect();
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(items)
    }

    async fn get_item(&self, id: &str) -> Result<Option<ClothingItem>, StoreError> {
        let items = self
            .items
            .read()
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(items.get(id).cloned())
    }

    async fn save_item(&self, item: &ClothingItem) -> Result<(), StoreError> {
        let mut items = self
            .items
            .write()
            .map_err(|e| StoreError::Database(e.to_string()))?;
        items.insert(item.id.clone(), item.clone());
        Ok(())
    }

    async fn delete_item(&self, id: &str) -> Result<(), StoreError> {
        let mut items = self
            .items
            .write()
            .map_err(|e| StoreError::Database(e.to_string()))?;
        if items.remove(id).is_none() {
            return Err(StoreError::NotFound(format!("clothing item {}", id)));
        }
        Ok(())
    }

    async fn save_outfit(&self, outfit: &SavedOutfit) -> Result<(), StoreError> {
        let mut outfits = self
            .outfits
            .write()
            .map_err(|e| StoreError::Database(e.to_string()))?;
        outfits.insert(outfit.id.clone(), outfit.clone());
        Ok(())
    }

    async fn list_outfits(&self) -> Result<Vec<SavedOutfit>, StoreError> {
        let outfits = self
            .outfits
            .read()
            .map_err(|e| StoreError::Database(e.to_string()))?;
        let mut outfits: Vec<SavedOutfit> = outfits.values().cloned().collect();
        outfits.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(outfits)
    }

    async fn delete_outfit(&self, id: &str) -> Result<(), StoreError> {
        let mut outfits = self
            .outfits
            .write()
            .map_err(|e| StoreError::Database(e.to_string()))?;
        if outfits.remove(id).is_none() {
            return Err(StoreError::NotFound(format!("saved outfit {}", id)));
        }
        Ok(())
    }
}
