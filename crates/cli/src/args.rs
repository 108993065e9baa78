//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// wardrobe-stylist: CLI tool for cataloguing clothing and composing outfit suggestions
#[derive(Parser, Debug)]
#[command(name = "wardrobe-stylist")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a clothing photo and add the item to the wardrobe
    Add(AddArgs),

    /// List wardrobe items
    List(ListArgs),

    /// Remove an item from the wardrobe
    Remove(RemoveArgs),

    /// Compose an outfit suggestion from the wardrobe
    Suggest(SuggestArgs),

    /// Manage saved outfits
    Outfits(OutfitsArgs),

    /// Configuration management
    Config(ConfigArgs),

    /// Validate configuration and show status
    Doctor(DoctorArgs),
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Path to the clothing image
    #[arg(long)]
    pub image: PathBuf,

    /// Use this description instead of the analyzer's
    #[arg(long)]
    pub description: Option<String>,

    /// Extra tag to attach (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Item id to remove
    pub id: String,
}

#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// Item id to wear on top
    #[arg(long)]
    pub top: Option<String>,

    /// Item id to wear on bottom
    #[arg(long)]
    pub bottom: Option<String>,

    /// Item id to wear as footwear
    #[arg(long)]
    pub footwear: Option<String>,

    /// Seed for reproducible suggestions
    #[arg(long)]
    pub seed: Option<u64>,

    /// Save the suggestion for today
    #[arg(long)]
    pub save: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct OutfitsArgs {
    #[command(subcommand)]
    pub command: OutfitsCommands,
}

#[derive(Subcommand, Debug)]
pub enum OutfitsCommands {
    /// List saved outfits
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove a saved outfit
    Remove {
        /// Outfit id to remove
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Init {
        /// Path to write config file
        #[arg(long, default_value = "./config.toml")]
        path: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
