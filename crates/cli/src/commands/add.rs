//! Add command - analyze a clothing photo and catalogue the item

use anyhow::{Context, Result, bail};
use secrecy::SecretString;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use uuid::Uuid;
use wardrobe_stylist_adapters::{
    store::SqliteWardrobeStore,
    vision::{GeminiAnalyzer, StubAnalyzer, VisionConfig as AdapterVisionConfig},
};
use wardrobe_stylist_domain::usecases::{AnalyzeUseCase, normalize_tags};
use wardrobe_stylist_domain::{AnalyzeInput, ClothingItem, ItemAnalyzer, WardrobeStore};

use crate::args::AddArgs;
use crate::config::AppConfig;

pub async fn execute(args: AddArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;

    let image = std::fs::read(&args.image)
        .with_context(|| format!("Failed to read image: {}", args.image.display()))?;

    let input = AnalyzeInput {
        image,
        mime_type: mime_type_for(&args.image).to_string(),
        filename: args
            .image
            .file_name()
            .map(|name| name.to_string_lossy().into_owned()),
    };

    let analyzer = build_analyzer(&config)?;
    let usecase = AnalyzeUseCase::new(&*analyzer);
    let analysis = usecase
        .analyze(input)
        .await
        .context("Image analysis failed")?;

    let description = match args.description {
        Some(ref text) => text.trim().to_string(),
        None => analysis.description.clone(),
    };
    if description.is_empty() {
        bail!("Analysis produced no description; pass one with --description");
    }

    let mut tags = analysis.tags.clone();
    tags.extend(args.tags.iter().cloned());
    let tags = normalize_tags(&tags);
    if tags.is_empty() {
        bail!("Analysis produced no tags; add some with --tag");
    }

    let now = OffsetDateTime::now_utc();
    let item = ClothingItem {
        id: Uuid::new_v4().to_string(),
        description,
        tags,
        image_uri: Some(args.image.display().to_string()),
        created_at: now,
        updated_at: now,
    };

    let store = SqliteWardrobeStore::new(&config.general.wardrobe_db_path)
        .await
        .context("Failed to open wardrobe database")?;
    store
        .save_item(&item)
        .await
        .context("Failed to save item")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&item)?);
    } else {
        println!("Added item {}", item.id);
        println!("  Description: {}", item.description);
        println!("  Tags: {}", item.tags.join(", "));
    }

    Ok(())
}

pub(crate) fn build_analyzer(config: &AppConfig) -> Result<Box<dyn ItemAnalyzer>> {
    match config.vision.provider.as_str() {
        "gemini" => {
            let api_key = load_api_key(&config.vision.api_key_env, "gemini")?;
            Ok(Box::new(GeminiAnalyzer::new(
                api_key,
                adapter_vision_config(config),
            )))
        }
        "stub" => Ok(Box::new(StubAnalyzer::echo())),
        other => bail!("Unknown vision provider: {}", other),
    }
}

fn adapter_vision_config(config: &AppConfig) -> AdapterVisionConfig {
    AdapterVisionConfig {
        model: config.vision.model.clone(),
        temperature: config.vision.temperature,
        max_output_tokens: config.vision.max_output_tokens,
        timeout_secs: config.vision.timeout_secs,
        retries: config.vision.retries,
    }
}

pub(crate) fn load_api_key(env_var: &str, provider: &str) -> Result<SecretString> {
    if env_var.trim().is_empty() {
        bail!("No API key env var configured for provider {}", provider);
    }

    let key = std::env::var(env_var).with_context(|| {
        format!(
            "Missing API key env var {} for provider {}",
            env_var, provider
        )
    })?;

    if key.trim().is_empty() {
        bail!(
            "API key env var {} is empty for provider {}",
            env_var,
            provider
        );
    }

    Ok(SecretString::new(key.into()))
}

fn mime_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        // The vision API accepts JPEG for unrecognized extensions
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_analyzer_selects_stub_provider() {
        let mut config = AppConfig::default();
        config.vision.provider = "stub".to_string();

        assert!(build_analyzer(&config).is_ok());
    }

    #[test]
    fn test_build_analyzer_rejects_unknown_provider() {
        let mut config = AppConfig::default();
        config.vision.provider = "clip".to_string();

        let err = build_analyzer(&config).err().unwrap();
        assert!(err.to_string().contains("Unknown vision provider"));
    }

    #[test]
    fn test_mime_type_follows_extension() {
        assert_eq!(mime_type_for(Path::new("a.PNG")), "image/png");
        assert_eq!(mime_type_for(Path::new("a.webp")), "image/webp");
        assert_eq!(mime_type_for(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(mime_type_for(Path::new("a")), "image/jpeg");
    }
}
