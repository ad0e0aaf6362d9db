//! Config paths and persisted header settings.

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::Args;
use crate::widgets::stage_header::StageSizeMode;

pub const SETTINGS_FILE: &str = "stagebar.json";
pub const LOG_FILE: &str = "stagebar.log";
const APP_DIR: &str = "stagebar";
const CONFIG_DIR_ENV: &str = "STAGEBAR_CONFIG_DIR";

/// Configuration for overriding default application paths
#[derive(Debug, Clone, Default)]
pub struct PathConfig {
    /// Custom config directory (from CLI or ENV)
    pub config_dir: Option<PathBuf>,
}

impl PathConfig {
    /// Priority: CLI args → ENV var (STAGEBAR_CONFIG_DIR) → None (use defaults)
    pub fn from_env_and_cli(cli_dir: Option<PathBuf>) -> Self {
        let config_dir = cli_dir.or_else(|| std::env::var(CONFIG_DIR_ENV).ok().map(PathBuf::from));
        Self { config_dir }
    }
}

/// Get path to a configuration file
///
/// Priority:
/// 1. CLI --config-dir argument
/// 2. STAGEBAR_CONFIG_DIR environment variable
/// 3. Local folder IF stagebar.json or stagebar.log exist there
/// 4. Platform-specific config directory from dirs-next
pub fn config_file(name: &str, config: &PathConfig) -> PathBuf {
    config_dir(config).join(name)
}

/// Get path to a data file (logs)
pub fn data_file(name: &str, config: &PathConfig) -> PathBuf {
    data_dir(config).join(name)
}

/// Create config and data directories if missing.
pub fn ensure_dirs(config: &PathConfig) -> Result<()> {
    let config_dir = config_dir(config);
    let data_dir = data_dir(config);

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create config directory: {}", config_dir.display()))?;
    }
    if data_dir != config_dir && !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    }
    Ok(())
}

fn has_local_config_files(dir: &Path) -> bool {
    [SETTINGS_FILE, LOG_FILE].iter().any(|f| dir.join(f).exists())
}

fn local_dir() -> Option<PathBuf> {
    std::env::current_dir().ok().filter(|dir| has_local_config_files(dir))
}

fn config_dir(config: &PathConfig) -> PathBuf {
    if let Some(dir) = &config.config_dir {
        return dir.clone();
    }
    local_dir()
        .or_else(|| dirs_next::config_dir().map(|d| d.join(APP_DIR)))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn data_dir(config: &PathConfig) -> PathBuf {
    if let Some(dir) = &config.config_dir {
        return dir.clone();
    }
    local_dir()
        .or_else(|| dirs_next::data_dir().map(|d| d.join(APP_DIR)))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Header preferences persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderSettings {
    pub stage_size_mode: StageSizeMode,
    pub show_branding: bool,
    pub dev_mode: bool,
    pub dark_mode: bool,
    /// Message catalog used when --messages is not given
    pub messages_path: Option<PathBuf>,
}

impl Default for HeaderSettings {
    fn default() -> Self {
        Self {
            stage_size_mode: StageSizeMode::Large,
            show_branding: false,
            dev_mode: false,
            dark_mode: true,
            messages_path: None,
        }
    }
}

impl HeaderSettings {
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse settings: {}", path.display()))
    }

    /// Load settings, falling back to defaults when missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            info!("No settings at {}, using defaults", path.display());
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            warn!("{:#}", e);
            Self::default()
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write settings: {}", path.display()))
    }
}

/// Header options for one run: persisted settings with CLI flags on top.
///
/// Flags only live here, so saving `HeaderSettings` never records them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub stage_size_mode: StageSizeMode,
    pub show_branding: bool,
    pub dev_mode: bool,
}

impl SessionOptions {
    pub fn resolve(settings: &HeaderSettings, args: &Args) -> Self {
        Self {
            stage_size_mode: args.stage_size.unwrap_or(settings.stage_size_mode),
            show_branding: settings.show_branding || args.branding,
            dev_mode: settings.dev_mode || args.dev_mode,
        }
    }
}
