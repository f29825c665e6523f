use std::path::PathBuf;

use anyhow::Context;
use tilekit::{default_config_path, init_logging, Config, BUILD_DATE, VERSION};

/// Loads and validates a configuration file, then prints the effective
/// settings as TOML-like key/value lines.
fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::info!("tilekit {} (built {})", VERSION, BUILD_DATE);

    let path = match std::env::args_os().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => default_config_path().context("Failed to resolve the config directory")?,
    };

    let config = Config::load_or_default(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config in {}", path.display()))?;

    println!("config = {}", path.display());
    println!("history.undo_limit = {}", config.history.undo_limit);
    println!(
        "history.merge_tile_offset_edits = {}",
        config.history.merge_tile_offset_edits
    );
    println!(
        "properties.image_file_filter = {:?}",
        config.properties.image_file_filter
    );
    println!(
        "properties.name_suggestions = {:?}",
        config.properties.name_suggestions
    );
    Ok(())
}
