//! List command - show catalogued wardrobe items

use anyhow::{Context, Result};
use std::path::PathBuf;
use wardrobe_stylist_adapters::store::SqliteWardrobeStore;
use wardrobe_stylist_domain::WardrobeStore;

use crate::args::ListArgs;
use crate::config::AppConfig;

pub async fn execute(args: ListArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;

    let store = SqliteWardrobeStore::new(&config.general.wardrobe_db_path)
        .await
        .context("Failed to open wardrobe database")?;

    let items = store
        .list_items()
        .await
        .context("Failed to list wardrobe items")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        println!("Wardrobe ({} items)", items.len());
        println!("===================");
        println!();

        for item in &items {
            println!("ID: {}", item.id);
            println!("  Description: {}", item.description);
            println!("  Tags: {}", item.tags.join(", "));
            if let Some(ref uri) = item.image_uri {
                println!("  Image: {}", uri);
            }
            println!();
        }
    }

    Ok(())
}
