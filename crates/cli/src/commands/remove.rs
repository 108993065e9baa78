//! Remove command - delete an item from the wardrobe

use anyhow::{Context, Result};
use std::path::PathBuf;
use wardrobe_stylist_adapters::store::SqliteWardrobeStore;
use wardrobe_stylist_domain::WardrobeStore;

use crate::args::RemoveArgs;
use crate::config::AppConfig;

pub async fn execute(args: RemoveArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;

    let store = SqliteWardrobeStore::new(&config.general.wardrobe_db_path)
        .await
        .context("Failed to open wardrobe database")?;

    store
        .delete_item(&args.id)
        .await
        .with_context(|| format!("Failed to remove item {}", args.id))?;

    println!("Removed item {}", args.id);

    Ok(())
}
