use anyhow::Context;
use clipsight::models::DetectionResult;
use clipsight::services::config_store::{AppConfig, ConfigStore};
use clipsight::services::detection::{AnalysisMode, ClipDetector};
use clipsight::services::input_loader::{load_image_input, load_text_input};
use clipsight::services::providers::EmbeddingClient;
use std::sync::Arc;

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

fn print_usage() {
    eprintln!(
        "Usage:\n  clipsight --type <image|text> --input <path|text|base64> [--base64] [--input-file] [--device <auto|cpu|cuda>] [--endpoint <url>] [--model <name>] [--out <json_path>]\n\nNotes:\n  - image input is a file path, or a base64 / data-URL payload with --base64.\n  - text input is a literal string, or a file path with --input-file.\n  - CLIPSIGHT_EMBEDDING_URL overrides both the config file and --endpoint.\n  - the result record is printed as JSON on stdout; logs go to stderr."
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    clipsight::init_logging();

    let args: Vec<String> = std::env::args().collect();

    let mode = parse_arg_value(&args, "--type").and_then(|v| AnalysisMode::from_str(&v));
    let input = parse_arg_value(&args, "--input");

    let (mode, input) = match (mode, input) {
        (Some(mode), Some(input)) => (mode, input),
        _ => {
            print_usage();
            std::process::exit(2);
        }
    };

    let is_base64 = has_flag(&args, "--base64");
    let input_is_file = has_flag(&args, "--input-file");
    let out_path = parse_arg_value(&args, "--out");

    // Config file plus per-invocation overrides; an invalid device or
    // unreadable config is fatal here, before any analysis runs.
    let mut config = match ConfigStore::default_config_dir() {
        Some(dir) => ConfigStore::new(dir)
            .load()
            .context("failed to load configuration")?,
        None => AppConfig::default(),
    };
    if let Some(endpoint) = parse_arg_value(&args, "--endpoint") {
        config.encoder.endpoint = endpoint;
    }
    if let Some(model) = parse_arg_value(&args, "--model") {
        config.encoder.model = model;
    }
    if let Some(device) = parse_arg_value(&args, "--device") {
        config.encoder.device = device;
    }

    let client = EmbeddingClient::new(&config.encoder).context("invalid encoder configuration")?;
    let detector = ClipDetector::new(Arc::new(client));

    let result = match mode {
        AnalysisMode::Image => match load_image_input(&input, is_base64) {
            Ok(bytes) => detector.analyze_image(&bytes).await,
            Err(e) => DetectionResult::failure(e.to_string()),
        },
        AnalysisMode::Text => match load_text_input(&input, input_is_file) {
            Ok(text) => detector.analyze_text(&text).await,
            Err(e) => DetectionResult::failure(e.to_string()),
        },
    };

    let json = serde_json::to_string_pretty(&result).context("failed to serialize result")?;
    println!("{}", json);

    if let Some(out_path) = out_path {
        std::fs::write(&out_path, &json)
            .with_context(|| format!("failed to write {}", out_path))?;
    }

    if result.is_error() {
        std::process::exit(1);
    }

    Ok(())
}
