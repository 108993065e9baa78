//! Vision provider adapters

pub mod gemini;
pub mod stub;

pub use gemini::GeminiAnalyzer;
pub use stub::StubAnalyzer;

use serde::{Deserialize, Serialize};
use wardrobe_stylist_domain::ItemAnalysis;

/// Common vision provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    /// Model name/ID
    pub model: String,
    /// Temperature (0.0-1.0)
    pub temperature: f64,
    /// Maximum output tokens
    pub max_output_tokens: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Number of retries on failure
    pub retries: u32,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-flash".to_string(),
            temperature: 0.2,
            max_output_tokens: 600,
            timeout_secs: 45,
            retries: 2,
        }
    }
}

/// Build the image analysis prompt
pub fn build_analysis_prompt() -> String {
    r#"Analyze the clothing in this image and provide:
1. A description with color, clothing type, wear, fit, type, and key features, separated by commas.
2. Generate appropriate tags from these categories:
   - Clothing type (e.g., jeans, shirt, dress)
   - Color (e.g., blue, black, white)
   - Wear (e.g., Topwear, Bottomwear, Footwear)
   - Fit (e.g., slim fit, regular fit, loose)
   - Type (e.g., Casual, Formal, Party, Sport)

Format the response exactly like this:
DESCRIPTION: [comma-separated description]
TAGS: [tag1], [tag2], [tag3], [tag4]"#
        .to_string()
}

/// Parse a DESCRIPTION/TAGS analysis response
///
/// Lines outside the two markers are ignored, so surrounding prose or code
/// fences do not break parsing. A later marker overrides an earlier one.
pub fn parse_analysis_response(response: &str) -> Result<ItemAnalysis, String> {
    let mut description = String::new();
    let mut tags: Vec<String> = Vec::new();
    let mut found_marker = false;

    for line in response.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("DESCRIPTION:") {
            description = rest.trim().to_string();
            found_marker = true;
        } else if let Some(rest) = line.strip_prefix("TAGS:") {
            tags = rest
                .split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();
            found_marker = true;
        }
    }

    if !found_marker {
        return Err("Missing DESCRIPTION and TAGS lines".to_string());
    }

    Ok(ItemAnalysis { description, tags })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_response() {
        let response = "DESCRIPTION: Blue, jeans, bottomwear, slim fit, casual\nTAGS: jeans, blue, Bottomwear, Casual";

        let analysis = parse_analysis_response(response).unwrap();

        assert_eq!(analysis.description, "Blue, jeans, bottomwear, slim fit, casual");
        assert_eq!(analysis.tags, vec!["jeans", "blue", "Bottomwear", "Casual"]);
    }

    #[test]
    fn test_parse_tolerates_surrounding_text() {
        let response = "```\nHere is the analysis you asked for.\nDESCRIPTION: Red sweater\nTAGS: sweater, red, Topwear\nHope that helps!\n```";

        let analysis = parse_analysis_response(response).unwrap();

        assert_eq!(analysis.description, "Red sweater");
        assert_eq!(analysis.tags, vec!["sweater", "red", "Topwear"]);
    }

    #[test]
    fn test_parse_filters_empty_tag_entries() {
        let response = "DESCRIPTION: Black boots\nTAGS: boots, , black,";

        let analysis = parse_analysis_response(response).unwrap();

        assert_eq!(analysis.tags, vec!["boots", "black"]);
    }

    #[test]
    fn test_parse_fails_without_markers() {
        let result = parse_analysis_response("A nice pair of jeans.");

        assert!(result.is_err());
    }
}
