//! Stub analyzer for testing and offline mode

use async_trait::async_trait;
use wardrobe_stylist_domain::{AnalyzeError, AnalyzeInput, ItemAnalysis, ItemAnalyzer};

/// Stub analyzer that returns configurable responses
pub struct StubAnalyzer {
    response: Option<ItemAnalysis>,
    error: Option<AnalyzeError>,
}

impl StubAnalyzer {
    /// Create a stub that derives tags from the input filename
    pub fn echo() -> Self {
        Self {
            response: None,
            error: None,
        }
    }

    /// Create a stub that returns a specific analysis
    pub fn with_response(response: ItemAnalysis) -> Self {
        Self {
            response: Some(response),
            error: None,
        }
    }

    /// Create a stub that always returns an error
    pub fn with_error(error: AnalyzeError) -> Self {
        Self {
            response: None,
            error: Some(error),
        }
    }
}

impl Default for StubAnalyzer {
    fn default() -> Self {
        Self::echo()
    }
}

#[async_trait]
impl ItemAnalyzer for StubAnalyzer {
    async fn analyze(&self, input: AnalyzeInput) -> Result<ItemAnalysis, AnalyzeError> {
        // Return configured error if set
        if let Some(ref error) = self.error {
            return Err(match error {
                AnalyzeError::Api(msg) => AnalyzeError::Api(msg.clone()),
                AnalyzeError::InvalidFormat(msg) => AnalyzeError::InvalidFormat(msg.clone()),
                AnalyzeError::RateLimited => AnalyzeError::RateLimited,
                AnalyzeError::Timeout => AnalyzeError::Timeout,
                AnalyzeError::Config(msg) => AnalyzeError::Config(msg.clone()),
            });
        }

        // Return configured response if set
        if let Some(ref response) = self.response {
            return Ok(response.clone());
        }

        // Echo mode: split the filename stem into tags
        let stem = input
            .filename
            .as_deref()
            .and_then(|name| std::path::Path::new(name).file_stem())
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();

        let tags: Vec<String> = stem
            .split(|c: char| !c.is_alphanumeric())
            .filter(|part| !part.is_empty())
            .map(|part| part.to_lowercase())
            .collect();

        let description = if tags.is_empty() {
            "Stub analysis".to_string()
        } else {
            format!("Stub analysis: {}", tags.join(", "))
        };

        Ok(ItemAnalysis { description, tags })
    }
}
