//! wardrobe-stylist domain crate
//!
//! This crate contains the core domain logic following hexagonal architecture:
//! - `model`: Domain entities and value objects
//! - `vocabulary`: Tag vocabularies driving bucket and style classification
//! - `ports`: Trait definitions for external dependencies (adapters)
//! - `usecases`: Application use cases / business logic

pub mod model;
pub mod ports;
pub mod usecases;
pub mod vocabulary;

pub use model::*;
pub use ports::*;
pub use vocabulary::TagVocabulary;
