//! Port definitions (traits) for external dependencies
//!
//! These traits define the boundaries between the domain and external systems.
//! Adapters implement these traits to connect to real infrastructure.

use std::sync::Mutex;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::model::{AnalyzeInput, ClothingItem, ItemAnalysis, SavedOutfit};

/// Error type for wardrobe store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Port for persisting clothing items and saved outfits
#[async_trait]
pub trait WardrobeStore: Send + Sync {
    /// List all catalogued items, oldest first
    async fn list_items(&self) -> Result<Vec<ClothingItem>, StoreError>;

    /// Get a single item by ID
    async fn get_item(&self, id: &str) -> Result<Option<ClothingItem>, StoreError>;

    /// Insert or update an item
    async fn save_item(&self, item: &ClothingItem) -> Result<(), StoreError>;

    /// Delete an item, failing with `NotFound` if it does not exist
    async fn delete_item(&self, id: &str) -> Result<(), StoreError>;

    /// Persist an outfit
    async fn save_outfit(&self, outfit: &SavedOutfit) -> Result<(), StoreError>;

    /// List saved outfits, newest first
    async fn list_outfits(&self) -> Result<Vec<SavedOutfit>, StoreError>;

    /// Delete a saved outfit, failing with `NotFound` if it does not exist
    async fn delete_outfit(&self, id: &str) -> Result<(), StoreError>;
}

/// Error type for item analysis operations
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("Vision API error: {0}")]
    Api(String),
    #[error("Invalid response format: {0}")]
    InvalidFormat(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Timeout")]
    Timeout,
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Port for deriving a description and tags from a clothing image
#[async_trait]
pub trait ItemAnalyzer: Send + Sync {
    /// Analyze an image, producing a description and tags
    async fn analyze(&self, input: AnalyzeInput) -> Result<ItemAnalysis, AnalyzeError>;
}

#[async_trait]
impl<A: ItemAnalyzer + ?Sized> ItemAnalyzer for &A {
    async fn analyze(&self, input: AnalyzeInput) -> Result<ItemAnalysis, AnalyzeError> {
        (**self).analyze(input).await
    }
}

/// Port for random choice (enables deterministic testing)
pub trait Randomness: Send + Sync {
    /// Pick an index in `0..len`. Callers guarantee `len > 0`.
    fn pick_index(&self, len: usize) -> usize;
}

impl<R: Randomness + ?Sized> Randomness for Box<R> {
    fn pick_index(&self, len: usize) -> usize {
        (**self).pick_index(len)
    }
}

/// Randomness backed by the thread-local RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandomness;

impl Randomness for ThreadRandomness {
    fn pick_index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Seeded randomness for reproducible suggestions
#[derive(Debug)]
pub struct SeededRandomness {
    rng: Mutex<StdRng>,
}

impl SeededRandomness {
    /// Create a generator that replays the same choices for the same seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Randomness for SeededRandomness {
    fn pick_index(&self, len: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_randomness_is_reproducible() {
        let a = SeededRandomness::new(42);
        let b = SeededRandomness::new(42);
        let picks_a: Vec<usize> = (0..10).map(|_| a.pick_index(7)).collect();
        let picks_b: Vec<usize> = (0..10).map(|_| b.pick_index(7)).collect();
        assert_eq!(picks_a, picks_b);
    }

    #[test]
    fn test_thread_randomness_stays_in_range() {
        let rng = ThreadRandomness;
        for _ in 0..100 {
            assert!(rng.pick_index(3) < 3);
        }
    }
}
