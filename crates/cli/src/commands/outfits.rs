//! Outfits command - list and remove saved outfits

use anyhow::{Context, Result};
use std::path::PathBuf;
use time::format_description::well_known::Rfc3339;
use wardrobe_stylist_adapters::store::SqliteWardrobeStore;
use wardrobe_stylist_domain::WardrobeStore;

use crate::args::{OutfitsArgs, OutfitsCommands};
use crate::config::AppConfig;

pub async fn execute(args: OutfitsArgs, config_path: Option<PathBuf>) -> Result<()> {
    match args.command {
        OutfitsCommands::List { json } => list_outfits(json, config_path).await,
        OutfitsCommands::Remove { id } => remove_outfit(id, config_path).await,
    }
}

async fn list_outfits(json: bool, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;

    let store = SqliteWardrobeStore::new(&config.general.wardrobe_db_path)
        .await
        .context("Failed to open wardrobe database")?;

    let outfits = store
        .list_outfits()
        .await
        .context("Failed to list saved outfits")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outfits)?);
    } else {
        println!("Saved Outfits ({} found)", outfits.len());
        println!("========================");
        println!();

        for outfit in &outfits {
            println!("ID: {}", outfit.id);
            println!("  Date: {}", outfit.date.format(&Rfc3339)?);
            println!("  Items: {}", outfit.item_ids.join(", "));
            println!();
        }
    }

    Ok(())
}

async fn remove_outfit(id: String, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;

    let store = SqliteWardrobeStore::new(&config.general.wardrobe_db_path)
        .await
        .context("Failed to open wardrobe database")?;

    store
        .delete_outfit(&id)
        .await
        .with_context(|| format!("Failed to remove outfit {}", id))?;

    println!("Removed outfit {}", id);

    Ok(())
}
