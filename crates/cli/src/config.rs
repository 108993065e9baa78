//! Configuration loading and management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wardrobe_stylist_domain::TagVocabulary;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub vision: VisionConfig,

    #[serde(default)]
    pub vocabulary: TagVocabulary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_wardrobe_db_path")]
    pub wardrobe_db_path: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    #[serde(default = "default_provider")]
    pub provider: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_retries")]
    pub retries: u32,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

// Default value functions
fn default_wardrobe_db_path() -> PathBuf {
    PathBuf::from("./wardrobe.sqlite")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_provider() -> String {
    "gemini".to_string()
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_temperature() -> f64 {
    0.2
}

fn default_timeout() -> u64 {
    45
}

fn default_retries() -> u32 {
    2
}

fn default_max_output_tokens() -> u32 {
    600
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            wardrobe_db_path: default_wardrobe_db_path(),
            log_level: default_log_level(),
        }
    }
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            temperature: default_temperature(),
            timeout_secs: default_timeout(),
            retries: default_retries(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Try default config path if none specified
        let default_path = PathBuf::from("./config.toml");
        let path = config_path.unwrap_or(&default_path);

        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        } else if config_path.is_some() {
            // User specified a path that doesn't exist
            anyhow::bail!("Config file not found: {}", path.display());
        }

        // Add environment variable overrides
        builder = builder.add_source(
            config::Environment::with_prefix("WARDROBE_STYLIST")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Generate example configuration as TOML string
    pub fn example_toml() -> String {
        r#"# wardrobe-stylist configuration

[general]
wardrobe_db_path = "./wardrobe.sqlite"
log_level = "info"

[vision]
provider = "gemini"  # gemini, stub
model = "gemini-1.5-flash"
api_key_env = "GEMINI_API_KEY"
temperature = 0.2
timeout_secs = 45
retries = 2
max_output_tokens = 600

# Tags that sort items into outfit slots and mark style preferences.
# Matching is case-insensitive; extend the lists to fit your wardrobe.
[vocabulary]
top = ["topwear", "shirt", "t-shirt", "blouse", "sweater"]
bottom = ["bottomwear", "pants", "jeans", "skirt", "shorts"]
footwear = ["footwear", "shoes", "boots", "sandals", "sneakers"]
styles = ["casual", "formal", "party", "sport"]
"#
        .to_string()
    }
}
