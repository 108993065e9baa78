//! Domain models and value objects

use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A catalogued clothing item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClothingItem {
    /// Unique item ID (opaque string)
    pub id: String,
    /// Human-readable description (color, type, fit, ...)
    pub description: String,
    /// Free-form lowercase tags produced at ingestion
    pub tags: Vec<String>,
    /// Where the source image lives, if known
    #[serde(default)]
    pub image_uri: Option<String>,
    /// When the item was catalogued
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the item was last modified
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl ClothingItem {
    /// Whether the item carries `tag`, ignoring case
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }
}

/// The three outfit slots, in wear order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Top,
    Bottom,
    Footwear,
}

impl Slot {
    /// All slots in canonical order (top, bottom, footwear)
    pub const ALL: [Slot; 3] = [Slot::Top, Slot::Bottom, Slot::Footwear];

    /// The tag that marks an item as covering this slot outright
    pub fn representative_tag(self) -> &'static str {
        match self {
            Slot::Top => "topwear",
            Slot::Bottom => "bottomwear",
            Slot::Footwear => "footwear",
        }
    }

    /// Short display name
    pub fn name(self) -> &'static str {
        match self {
            Slot::Top => "top",
            Slot::Bottom => "bottom",
            Slot::Footwear => "footwear",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Items the user locked into specific slots before composition
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Item chosen for the top slot, if any
    pub top: Option<ClothingItem>,
    /// Item chosen for the bottom slot, if any
    pub bottom: Option<ClothingItem>,
    /// Item chosen for the footwear slot, if any
    pub footwear: Option<ClothingItem>,
}

impl Selection {
    /// Get the chosen item for a slot
    pub fn get(&self, slot: Slot) -> Option<&ClothingItem> {
        match slot {
            Slot::Top => self.top.as_ref(),
            Slot::Bottom => self.bottom.as_ref(),
            Slot::Footwear => self.footwear.as_ref(),
        }
    }

    /// Lock an item into a slot
    pub fn set(&mut self, slot: Slot, item: ClothingItem) {
        match slot {
            Slot::Top => self.top = Some(item),
            Slot::Bottom => self.bottom = Some(item),
            Slot::Footwear => self.footwear = Some(item),
        }
    }

    /// Iterate slots in wear order with their chosen items
    pub fn iter(&self) -> impl Iterator<Item = (Slot, Option<&ClothingItem>)> {
        Slot::ALL.into_iter().map(|slot| (slot, self.get(slot)))
    }

    /// Iterate only the chosen items, in wear order
    pub fn chosen(&self) -> impl Iterator<Item = &ClothingItem> {
        self.iter().filter_map(|(_, item)| item)
    }
}

/// A wardrobe partitioned into per-slot candidate pools
#[derive(Debug, Clone, Default)]
pub struct WardrobeBuckets {
    /// Candidates for the top slot
    pub top: Vec<ClothingItem>,
    /// Candidates for the bottom slot
    pub bottom: Vec<ClothingItem>,
    /// Candidates for the footwear slot
    pub footwear: Vec<ClothingItem>,
}

impl WardrobeBuckets {
    /// Candidate pool for a slot
    pub fn bucket(&self, slot: Slot) -> &[ClothingItem] {
        match slot {
            Slot::Top => &self.top,
            Slot::Bottom => &self.bottom,
            Slot::Footwear => &self.footwear,
        }
    }

    pub(crate) fn bucket_mut(&mut self, slot: Slot) -> &mut Vec<ClothingItem> {
        match slot {
            Slot::Top => &mut self.top,
            Slot::Bottom => &mut self.bottom,
            Slot::Footwear => &mut self.footwear,
        }
    }
}

/// A composed outfit: user-chosen items first, then filled slots in wear order
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Outfit {
    items: Vec<ClothingItem>,
}

impl Outfit {
    /// The outfit's items in composition order
    pub fn items(&self) -> &[ClothingItem] {
        &self.items
    }

    /// Consume the outfit, yielding its items
    pub fn into_items(self) -> Vec<ClothingItem> {
        self.items
    }

    /// IDs of the outfit's items, in composition order
    pub fn item_ids(&self) -> Vec<String> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }

    /// Number of items in the outfit
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the outfit has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether an item with this ID is already part of the outfit
    pub fn has_item(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Append an item. Callers keep the no-duplicate-ID invariant.
    pub(crate) fn push(&mut self, item: ClothingItem) {
        self.items.push(item);
    }
}

/// A persisted outfit the user chose to keep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedOutfit {
    /// Unique outfit ID
    pub id: String,
    /// IDs of the member items, in composition order
    pub item_ids: Vec<String>,
    /// The day the outfit is for
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// When the outfit was saved
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Input for the item analysis use case
#[derive(Debug, Clone)]
pub struct AnalyzeInput {
    /// Raw image bytes
    pub image: Vec<u8>,
    /// MIME type of the image (e.g., `image/jpeg`)
    pub mime_type: String,
    /// Original filename, if known
    pub filename: Option<String>,
}

/// Description and tags derived from a clothing image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemAnalysis {
    /// Comma-separated description of the garment
    pub description: String,
    /// Flat tag list covering type, color, wear, fit, and style
    pub tags: Vec<String>,
}
