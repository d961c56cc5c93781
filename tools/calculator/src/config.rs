//! Front-end configuration
//!
//! Priority (highest to lowest):
//! 1. Environment variables (`CALCULATOR_`, nested keys joined with `__`)
//! 2. File given with `--config`
//! 3. `calculator.yaml` in the working directory
//! 4. `calculator.toml` in the working directory
//! 5. Default values

use anyhow::{bail, Context, Result};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prompt shown when asking for a menu choice
pub const DEFAULT_CHOICE_PROMPT: &str = "Enter your choice (1-19): ";

/// Upper bound for `display.significant_digits` (f64 carries ~17)
const MAX_SIGNIFICANT_DIGITS: usize = 17;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub display: DisplayConfig,
    pub log: LogConfig,
    pub repl: ReplConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Significant digits for non-integer results
    pub significant_digits: usize,
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            significant_digits: calc_engine::format::DEFAULT_SIGNIFICANT_DIGITS,
            color: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Prompt for the menu choice
    pub prompt: String,
    /// Print the numbered menu before every choice
    pub show_menu: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_CHOICE_PROMPT.to_string(),
            show_menu: true,
        }
    }
}

impl CalculatorConfig {
    /// Load configuration from all sources
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file("calculator.toml"))
            .merge(Yaml::file("calculator.yaml"));
        let figment = match explicit {
            Some(path) => merge_file(figment, path)?,
            None => figment,
        };
        Self::extract(figment.merge(Env::prefixed("CALCULATOR_").split("__")))
    }

    /// Load configuration from a single file on top of the defaults
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let figment = merge_file(Figment::from(Serialized::defaults(Self::default())), path)?;
        Self::extract(figment)
    }

    fn extract(figment: Figment) -> Result<Self> {
        let config: Self = figment
            .extract()
            .context("Failed to load calculator configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let digits = self.display.significant_digits;
        if digits == 0 || digits > MAX_SIGNIFICANT_DIGITS {
            bail!(
                "display.significant_digits must be between 1 and {}, got {}",
                MAX_SIGNIFICANT_DIGITS,
                digits
            );
        }
        Ok(())
    }
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    if !path.exists() {
        bail!("Config file not found: {}", path.display());
    }
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .context("Config file must have an extension")?;

    let figment = match extension {
        "toml" => figment.merge(Toml::file(path)),
        "yaml" | "yml" => figment.merge(Yaml::file(path)),
        "json" => figment.merge(Json::file(path)),
        _ => bail!("Unsupported config file format: {}", extension),
    };
    Ok(figment)
}
