//! Item analysis use case

use crate::{
    model::{AnalyzeInput, ItemAnalysis},
    ports::{AnalyzeError, ItemAnalyzer},
};

/// Use case for analyzing clothing images
pub struct AnalyzeUseCase<A> {
    analyzer: A,
}

impl<A: ItemAnalyzer> AnalyzeUseCase<A> {
    pub fn new(analyzer: A) -> Self {
        Self { analyzer }
    }

    /// Analyze an image and normalize the resulting tags
    pub async fn analyze(&self, input: AnalyzeInput) -> Result<ItemAnalysis, AnalyzeError> {
        tracing::info!(
            bytes = input.image.len(),
            mime_type = %input.mime_type,
            "Analyzing clothing image"
        );

        let raw = self.analyzer.analyze(input).await?;
        let analysis = ItemAnalysis {
            description: raw.description.trim().to_string(),
            tags: normalize_tags(&raw.tags),
        };

        tracing::info!(tags = ?analysis.tags, "Analysis complete");
        Ok(analysis)
    }
}

/// Trim, lowercase, and dedupe tags, keeping first-occurrence order
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut seen = std::collections::BTreeSet::new();
    let mut normalized = Vec::new();
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if tag.is_empty() || !seen.insert(tag.clone()) {
            continue;
        }
        normalized.push(tag);
    }
    normalized
}
