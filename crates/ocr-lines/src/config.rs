//! Configuration loading for ocr-lines.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use ocr_lines_core::{EngineConfig, GroupingOptions, LineOrder, Padding};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable pointing at an alternative config file
pub const CONFIG_ENV: &str = "OCR_LINES_CONFIG";

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    pub grouping: Option<GroupingConfig>,
    pub engine: Option<EngineSection>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct GroupingConfig {
    pub padding: Option<f32>,
    pub order: Option<LineOrder>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EngineSection {
    pub language: Option<String>,
    pub page_segmentation_mode: Option<u32>,
    pub min_confidence: Option<i32>,
}

impl Config {
    /// Grouping options with `padding`/`order` overrides applied on top of
    /// the file's values and the built-in defaults.
    pub fn grouping_options(
        &self,
        padding: Option<f32>,
        order: Option<LineOrder>,
    ) -> Result<GroupingOptions> {
        let section = self.grouping.as_ref();
        let padding = padding
            .or_else(|| section.and_then(|g| g.padding))
            .map(Padding::new)
            .transpose()
            .context("Invalid grouping padding")?
            .unwrap_or_default();
        let order = order
            .or_else(|| section.and_then(|g| g.order))
            .unwrap_or_default();
        Ok(GroupingOptions { padding, order })
    }

    /// Engine configuration with an optional language/PSM override
    pub fn engine_config(&self, language: Option<String>, psm: Option<u32>) -> EngineConfig {
        let defaults = EngineConfig::default();
        let section = self.engine.as_ref();
        EngineConfig {
            language: language
                .or_else(|| section.and_then(|e| e.language.clone()))
                .unwrap_or(defaults.language),
            page_segmentation_mode: psm
                .or_else(|| section.and_then(|e| e.page_segmentation_mode))
                .unwrap_or(defaults.page_segmentation_mode),
            min_confidence: section
                .and_then(|e| e.min_confidence)
                .unwrap_or(defaults.min_confidence),
        }
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }
    let dirs =
        ProjectDirs::from("", "", "ocr-lines").context("Could not determine config directory")?;
    Ok(dirs.config_dir().join("config.toml"))
}

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config =
        toml::from_str(&contents).context("Failed to parse config file as TOML")?;
    Ok(config)
}
