//! Application use cases / business logic

pub mod analyze;
pub mod compose;

pub use analyze::{AnalyzeUseCase, normalize_tags};
pub use compose::{ComposeError, ComposeUseCase, MIN_OUTFIT_ITEMS};
