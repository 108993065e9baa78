//! Doctor command - validate configuration and show status

use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;
use wardrobe_stylist_adapters::store::SqliteWardrobeStore;
use wardrobe_stylist_domain::{Slot, WardrobeStore};

use crate::args::DoctorArgs;
use crate::config::AppConfig;

#[derive(Debug, Serialize)]
struct DoctorReport {
    config: CheckResult,
    store: CheckResult,
    vision: CheckResult,
    vocabulary: CheckResult,
    overall: String,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    status: String,
    message: String,
    details: Option<serde_json::Value>,
}

impl CheckResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn warn(message: impl Into<String>) -> Self {
        Self {
            status: "warn".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    fn is_error(&self) -> bool {
        self.status == "error"
    }
}

pub async fn execute(args: DoctorArgs, config_path: Option<PathBuf>) -> Result<()> {
    let mut report = DoctorReport {
        config: CheckResult::error("Not checked"),
        store: CheckResult::error("Not checked"),
        vision: CheckResult::error("Not checked"),
        vocabulary: CheckResult::error("Not checked"),
        overall: "error".to_string(),
    };

    // Check config
    let config = match AppConfig::load(config_path.as_deref()) {
        Ok(c) => {
            report.config = CheckResult::ok("Configuration loaded successfully");
            Some(c)
        }
        Err(e) => {
            report.config = CheckResult::error(format!("Failed to load config: {}", e));
            None
        }
    };

    if let Some(ref config) = config {
        report.store = check_store(config).await;
        report.vision = check_vision(config);
        report.vocabulary = check_vocabulary(config);
    }

    // Determine overall status
    let checks = [
        &report.config,
        &report.store,
        &report.vision,
        &report.vocabulary,
    ];

    let has_error = checks.iter().any(|c| c.is_error());
    let all_ok = checks.iter().all(|c| c.is_ok());

    report.overall = if has_error {
        "error".to_string()
    } else if all_ok {
        "ok".to_string()
    } else {
        "warn".to_string()
    };

    // Output report
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.overall == "error" {
        std::process::exit(1);
    }

    Ok(())
}

async fn check_store(config: &AppConfig) -> CheckResult {
    let path = &config.general.wardrobe_db_path;

    let store = match SqliteWardrobeStore::new(path).await {
        Ok(s) => s,
        Err(e) => {
            return CheckResult::error(format!(
                "Failed to open wardrobe database {}: {}",
                path.display(),
                e
            ));
        }
    };

    match store.list_items().await {
        Ok(items) => CheckResult::ok(format!(
            "{} items in {}",
            items.len(),
            path.display()
        ))
        .with_details(serde_json::json!({ "count": items.len() })),
        Err(e) => CheckResult::error(format!("Failed to read wardrobe items: {}", e)),
    }
}

fn check_vision(config: &AppConfig) -> CheckResult {
    let provider = &config.vision.provider;
    let model = &config.vision.model;

    // Check if the API key env var is set (without revealing the value)
    let api_key_env = match provider.as_str() {
        "gemini" => &config.vision.api_key_env,
        "stub" => return CheckResult::ok("Provider: stub (offline)".to_string()),
        other => return CheckResult::warn(format!("Unknown provider: {}", other)),
    };

    if api_key_env.is_empty() {
        return CheckResult::error(format!("No API key env var configured for {}", provider));
    }

    match std::env::var(api_key_env) {
        Ok(val) if !val.is_empty() => CheckResult::ok(format!(
            "Provider: {}, Model: {}, API key: {} (set)",
            provider, model, api_key_env
        )),
        _ => CheckResult::warn(format!(
            "Provider: {}, Model: {}, API key: {} (not set)",
            provider, model, api_key_env
        )),
    }
}

fn check_vocabulary(config: &AppConfig) -> CheckResult {
    let vocabulary = &config.vocabulary;

    let empty_slots: Vec<&str> = Slot::ALL
        .into_iter()
        .filter(|slot| vocabulary.slot_tags(*slot).is_empty())
        .map(|slot| slot.name())
        .collect();

    if !empty_slots.is_empty() {
        return CheckResult::error(format!(
            "No tags configured for slots: {}",
            empty_slots.join(", ")
        ));
    }

    let slot_tags: usize = Slot::ALL
        .into_iter()
        .map(|slot| vocabulary.slot_tags(slot).len())
        .sum();

    if vocabulary.styles.is_empty() {
        return CheckResult::warn(format!(
            "{} slot tags, no style tags (suggestions will ignore style)",
            slot_tags
        ));
    }

    CheckResult::ok(format!(
        "{} slot tags, {} style tags",
        slot_tags,
        vocabulary.styles.len()
    ))
}

fn print_report(report: &DoctorReport) {
    println!("wardrobe-stylist Doctor Report");
    println!("==============================");
    println!();

    print_check("Config", &report.config);
    print_check("Store", &report.store);
    print_check("Vision Provider", &report.vision);
    print_check("Vocabulary", &report.vocabulary);

    println!();
    let symbol = match report.overall.as_str() {
        "ok" => "✓",
        "warn" => "⚠",
        _ => "✗",
    };
    println!("{} Overall: {}", symbol, report.overall.to_uppercase());

    if report.overall == "ok" {
        println!();
        println!("Ready to go! Try: wardrobe-stylist suggest");
    }
}

fn print_check(name: &str, result: &CheckResult) {
    let symbol = match result.status.as_str() {
        "ok" => "✓",
        "warn" => "⚠",
        _ => "✗",
    };
    println!("{} {}: {}", symbol, name, result.message);
}
