//! Suggest command - compose an outfit from the wardrobe

use anyhow::{Context, Result};
use std::path::PathBuf;
use time::OffsetDateTime;
use uuid::Uuid;
use wardrobe_stylist_adapters::store::SqliteWardrobeStore;
use wardrobe_stylist_domain::usecases::ComposeUseCase;
use wardrobe_stylist_domain::{
    Randomness, SavedOutfit, SeededRandomness, Selection, Slot, ThreadRandomness, WardrobeStore,
};

use crate::args::SuggestArgs;
use crate::config::AppConfig;

pub async fn execute(args: SuggestArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;

    let store = SqliteWardrobeStore::new(&config.general.wardrobe_db_path)
        .await
        .context("Failed to open wardrobe database")?;

    let wardrobe = store
        .list_items()
        .await
        .context("Failed to load wardrobe")?;

    let mut selection = Selection::default();
    for (slot, chosen) in [
        (Slot::Top, &args.top),
        (Slot::Bottom, &args.bottom),
        (Slot::Footwear, &args.footwear),
    ] {
        let Some(id) = chosen else { continue };
        let item = store
            .get_item(id)
            .await
            .context("Failed to read wardrobe database")?
            .with_context(|| format!("No wardrobe item with id {}", id))?;
        selection.set(slot, item);
    }

    tracing::info!(
        items = wardrobe.len(),
        seed = ?args.seed,
        "Composing outfit suggestion"
    );

    let randomness: Box<dyn Randomness> = match args.seed {
        Some(seed) => Box::new(SeededRandomness::new(seed)),
        None => Box::new(ThreadRandomness),
    };
    let usecase = ComposeUseCase::new(randomness, config.vocabulary.clone());
    let outfit = usecase
        .compose(&wardrobe, &selection)
        .context("Failed to compose outfit")?;

    let saved = if args.save {
        let now = OffsetDateTime::now_utc();
        let saved = SavedOutfit {
            id: Uuid::new_v4().to_string(),
            item_ids: outfit.item_ids(),
            date: now,
            created_at: now,
        };
        store
            .save_outfit(&saved)
            .await
            .context("Failed to save outfit")?;
        tracing::info!(outfit_id = %saved.id, "Saved outfit");
        Some(saved)
    } else {
        None
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outfit)?);
    } else {
        println!("Outfit Suggestion ({} items)", outfit.len());
        println!("============================");
        println!();

        for item in outfit.items() {
            println!("ID: {}", item.id);
            println!("  Description: {}", item.description);
            println!("  Tags: {}", item.tags.join(", "));
            println!();
        }

        if let Some(saved) = saved {
            println!("Saved as outfit {}", saved.id);
        }
    }

    Ok(())
}
