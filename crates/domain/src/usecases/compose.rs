//! Outfit composition use case
//!
//! Builds a complete outfit from a wardrobe snapshot: user-chosen items are
//! kept as-is, remaining slots are filled with the best-scoring candidates
//! from the wardrobe's per-slot buckets.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::{
    model::{ClothingItem, Outfit, Selection, Slot, WardrobeBuckets},
    ports::Randomness,
    vocabulary::TagVocabulary,
};

/// Minimum number of items an accepted outfit must have
pub const MIN_OUTFIT_ITEMS: usize = 3;

/// Error type for outfit composition
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("Wardrobe is empty")]
    EmptyWardrobe,
    #[error("Assembled only {assembled} items, need at least {min}", min = MIN_OUTFIT_ITEMS)]
    IncompleteOutfit { assembled: usize },
    #[error("Item {item_id} is selected in more than one slot")]
    DuplicateSelection { item_id: String },
}

/// Use case for composing outfits
pub struct ComposeUseCase<R> {
    randomness: R,
    vocabulary: TagVocabulary,
}

impl<R: Randomness> ComposeUseCase<R> {
    pub fn new(randomness: R, vocabulary: TagVocabulary) -> Self {
        Self {
            randomness,
            vocabulary,
        }
    }

    /// Compose an outfit from the wardrobe, honoring the user's selection
    pub fn compose(
        &self,
        wardrobe: &[ClothingItem],
        selection: &Selection,
    ) -> Result<Outfit, ComposeError> {
        if wardrobe.is_empty() {
            return Err(ComposeError::EmptyWardrobe);
        }

        let buckets = classify_wardrobe(&self.vocabulary, wardrobe);
        tracing::debug!(
            top = buckets.top.len(),
            bottom = buckets.bottom.len(),
            footwear = buckets.footwear.len(),
            "Classified wardrobe"
        );

        let mut outfit = Outfit::default();
        for (slot, chosen) in selection.iter() {
            let Some(item) = chosen else { continue };
            if outfit.has_item(&item.id) {
                return Err(ComposeError::DuplicateSelection {
                    item_id: item.id.clone(),
                });
            }
            tracing::debug!(slot = %slot, item_id = %item.id, "Keeping user-chosen item");
            outfit.push(item.clone());
        }

        // Style preference comes from the user's choices alone. Items filled
        // below never widen it within the same composition.
        let style_tags = extract_style_tags(&self.vocabulary, selection);
        tracing::debug!(style = ?style_tags, "Extracted style preference");

        for slot in Slot::ALL {
            if covers_slot(&outfit, slot) {
                continue;
            }
            match select_best(buckets.bucket(slot), &outfit, &style_tags, &self.randomness) {
                Some(choice) => {
                    tracing::debug!(slot = %slot, item_id = %choice.id, "Filled slot");
                    outfit.push(choice.clone());
                }
                None => {
                    tracing::debug!(slot = %slot, "No candidate available");
                }
            }
        }

        if outfit.len() < MIN_OUTFIT_ITEMS {
            return Err(ComposeError::IncompleteOutfit {
                assembled: outfit.len(),
            });
        }

        tracing::info!(items = outfit.len(), "Composed outfit");
        Ok(outfit)
    }
}

/// Partition a wardrobe into per-slot buckets by vocabulary intersection
///
/// An item lands in every bucket whose vocabulary it matches, and in none
/// if its tags match no vocabulary at all.
pub fn classify_wardrobe(vocabulary: &TagVocabulary, items: &[ClothingItem]) -> WardrobeBuckets {
    let mut buckets = WardrobeBuckets::default();
    for item in items {
        for slot in Slot::ALL {
            if vocabulary.matches_slot(item, slot) {
                buckets.bucket_mut(slot).push(item.clone());
            }
        }
    }
    buckets
}

/// Union of style tags carried by the user-chosen items, lowercased
pub fn extract_style_tags(vocabulary: &TagVocabulary, selection: &Selection) -> BTreeSet<String> {
    let mut style = BTreeSet::new();
    for item in selection.chosen() {
        for tag in &item.tags {
            if vocabulary.is_style_tag(tag) {
                style.insert(tag.to_lowercase());
            }
        }
    }
    style
}

/// Number of distinct item tags that appear in the style set
pub fn score_item(item: &ClothingItem, style_tags: &BTreeSet<String>) -> usize {
    if style_tags.is_empty() {
        return 0;
    }
    let distinct: BTreeSet<String> = item.tags.iter().map(|t| t.to_lowercase()).collect();
    distinct.intersection(style_tags).count()
}

/// Pick the best candidate for a slot, excluding items already in the outfit
///
/// With style tags present the choice is deterministic: highest score wins,
/// and the earliest candidate wins ties. Without style tags the choice is
/// uniform over the remaining candidates.
pub fn select_best<'a, R: Randomness + ?Sized>(
    candidates: &'a [ClothingItem],
    outfit: &Outfit,
    style_tags: &BTreeSet<String>,
    randomness: &R,
) -> Option<&'a ClothingItem> {
    let available: Vec<&ClothingItem> = candidates
        .iter()
        .filter(|c| !outfit.has_item(&c.id))
        .collect();
    if available.is_empty() {
        return None;
    }

    if style_tags.is_empty() {
        return Some(available[randomness.pick_index(available.len())]);
    }

    // Replace the running best only on a strictly higher score so the
    // earliest candidate keeps winning ties.
    let mut best = available[0];
    let mut best_score = score_item(best, style_tags);
    for candidate in &available[1..] {
        let score = score_item(candidate, style_tags);
        if score > best_score {
            best = candidate;
            best_score = score;
        }
    }
    Some(best)
}

fn covers_slot(outfit: &Outfit, slot: Slot) -> bool {
    outfit
        .items()
        .iter()
        .any(|item| item.has_tag(slot.representative_tag()))
}
