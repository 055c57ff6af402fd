use anyhow::Context;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/produtos";
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
pub const BASE_URL_ENV: &str = "CATALOG_API_URL";

#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Terminal client for the product catalog API", long_about = None)]
pub struct Cli {
    /// Collection URL of the product API, e.g. http://localhost:8080/produtos.
    /// Falls back to $CATALOG_API_URL, then the config file.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Delay between the last keystroke and the search request.
    #[arg(long, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// JSON config file. Defaults to <config dir>/catalogo/config.json when present.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// On-disk shape of the config file. Every key is optional.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub debounce_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: String,
    pub debounce: Duration,
}

/// Default location of the config file, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("catalogo").join("config.json"))
}

pub fn read_file_config(path: &Path) -> anyhow::Result<FileConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Could not read config file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Could not parse config file {}", path.display()))
}

/// Resolve the configuration: command-line flags first, then the
/// environment, then the config file, then built-in defaults.
///
/// An explicit `--config` that cannot be read is an error; a missing
/// default config file is not.
pub fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let file = match &cli.config {
        Some(path) => read_file_config(path)?,
        None => match default_config_path() {
            Some(path) if path.is_file() => read_file_config(&path)?,
            _ => FileConfig::default(),
        },
    };
    let env_url = std::env::var(BASE_URL_ENV).ok();
    Ok(resolve(cli, env_url, file))
}

fn resolve(cli: &Cli, env_url: Option<String>, file: FileConfig) -> Config {
    let base_url = cli
        .base_url
        .clone()
        .or(env_url.filter(|url| !url.trim().is_empty()))
        .or(file.base_url)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let debounce_ms = cli
        .debounce_ms
        .or(file.debounce_ms)
        .unwrap_or(DEFAULT_DEBOUNCE_MS);

    Config {
        base_url: base_url.trim().trim_end_matches('/').to_string(),
        debounce: Duration::from_millis(debounce_ms),
    }
}
