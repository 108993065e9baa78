//! wardrobe-stylist adapters crate
//!
//! This crate contains infrastructure adapters implementing the domain ports:
//! - `store`: SQLite and in-memory wardrobe stores
//! - `vision`: Image analysis provider adapters (Gemini, stub)

mod store_memory;
mod store_sqlite;

pub mod vision;

/// Re-exports for store adapters
pub mod store {
    pub use crate::store_memory::InMemoryWardrobeStore;
    pub use crate::store_sqlite::SqliteWardrobeStore;
}
