//! Tag vocabularies driving bucket and style classification
//!
//! The vocabularies are plain configuration data. Deployments can extend or
//! replace them (e.g., add "heels" to the footwear list) without touching the
//! composition logic. All comparisons ignore case.

use serde::{Deserialize, Serialize};

use crate::model::{ClothingItem, Slot};

/// Tag lists that decide slot membership and style preference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagVocabulary {
    /// Tags that place an item in the top bucket
    #[serde(default = "default_top_tags")]
    pub top: Vec<String>,
    /// Tags that place an item in the bottom bucket
    #[serde(default = "default_bottom_tags")]
    pub bottom: Vec<String>,
    /// Tags that place an item in the footwear bucket
    #[serde(default = "default_footwear_tags")]
    pub footwear: Vec<String>,
    /// Tags treated as style signals
    #[serde(default = "default_style_tags")]
    pub styles: Vec<String>,
}

impl Default for TagVocabulary {
    fn default() -> Self {
        Self {
            top: default_top_tags(),
            bottom: default_bottom_tags(),
            footwear: default_footwear_tags(),
            styles: default_style_tags(),
        }
    }
}

impl TagVocabulary {
    /// The vocabulary for a slot's bucket
    pub fn slot_tags(&self, slot: Slot) -> &[String] {
        match slot {
            Slot::Top => &self.top,
            Slot::Bottom => &self.bottom,
            Slot::Footwear => &self.footwear,
        }
    }

    /// Whether any of the item's tags appears in the slot's vocabulary
    pub fn matches_slot(&self, item: &ClothingItem, slot: Slot) -> bool {
        let vocab = self.slot_tags(slot);
        item.tags.iter().any(|tag| {
            let tag = tag.to_lowercase();
            vocab.iter().any(|v| v.to_lowercase() == tag)
        })
    }

    /// Whether a tag is a style signal
    pub fn is_style_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.styles.iter().any(|s| s.to_lowercase() == tag)
    }
}

fn default_top_tags() -> Vec<String> {
    to_strings(&["topwear", "shirt", "t-shirt", "blouse", "sweater"])
}

fn default_bottom_tags() -> Vec<String> {
    to_strings(&["bottomwear", "pants", "jeans", "skirt", "shorts"])
}

fn default_footwear_tags() -> Vec<String> {
    to_strings(&["footwear", "shoes", "boots", "sandals", "sneakers"])
}

fn default_style_tags() -> Vec<String> {
    to_strings(&["casual", "formal", "party", "sport"])
}

fn to_strings(tags: &[&str]) -> Vec<String> {
    tags.iter().map(|t| t.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::*;

    fn item(tags: &[&str]) -> ClothingItem {
        ClothingItem {
            id: "item-1".to_string(),
            description: "test item".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            image_uri: None,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn test_matches_slot_ignores_case() {
        let vocab = TagVocabulary::default();
        assert!(vocab.matches_slot(&item(&["Topwear", "blue"]), Slot::Top));
        assert!(vocab.matches_slot(&item(&["JEANS"]), Slot::Bottom));
        assert!(!vocab.matches_slot(&item(&["jeans"]), Slot::Top));
    }

    #[test]
    fn test_matches_slot_rejects_unknown_tags() {
        let vocab = TagVocabulary::default();
        assert!(!vocab.matches_slot(&item(&["hat", "scarf"]), Slot::Top));
        assert!(!vocab.matches_slot(&item(&["hat", "scarf"]), Slot::Bottom));
        assert!(!vocab.matches_slot(&item(&["hat", "scarf"]), Slot::Footwear));
    }

    #[test]
    fn test_is_style_tag() {
        let vocab = TagVocabulary::default();
        assert!(vocab.is_style_tag("casual"));
        assert!(vocab.is_style_tag("Formal"));
        assert!(!vocab.is_style_tag("blue"));
    }

    #[test]
    fn test_custom_vocabulary_extends_buckets() {
        let mut vocab = TagVocabulary::default();
        vocab.footwear.push("heels".to_string());
        assert!(vocab.matches_slot(&item(&["heels"]), Slot::Footwear));
    }
}
