//! Configuration file handling.
//!
//! Settings come from `citescope.toml` (or `--config`), then command-line
//! overrides. The resulting [`Config`] is handed to the application once at
//! startup and is read-only from then on.

use anyhow::{Context, Result};
use chrono::Datelike;
use eframe::egui::Color32;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::color::parse_hex;
use crate::error::DashboardError;

pub const DEFAULT_CONFIG_FILE: &str = "citescope.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Dataset discovery.
    #[serde(default)]
    pub data: DataConfig,

    /// Slider bounds.
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Chart styling shared by the on-screen plots and exported images.
    #[serde(default)]
    pub style: StyleConfig,

    /// Image export.
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory scanned for datasets.
    #[serde(default = "default_datasets_dir")]
    pub datasets_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            datasets_dir: default_datasets_dir(),
        }
    }
}

fn default_datasets_dir() -> PathBuf {
    PathBuf::from("./datasets")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Lowest selectable year.
    #[serde(default = "default_min_year")]
    pub min_year: i32,

    /// Highest selectable year.
    #[serde(default = "default_max_year")]
    pub max_year: i32,

    /// Upper bound of the most-cited papers slider.
    #[serde(default = "default_top_n")]
    pub max_papers: usize,

    /// Upper bound of the top keywords slider.
    #[serde(default = "default_top_n")]
    pub max_keywords: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            min_year: default_min_year(),
            max_year: default_max_year(),
            max_papers: default_top_n(),
            max_keywords: default_top_n(),
        }
    }
}

fn default_min_year() -> i32 {
    1990
}

fn default_max_year() -> i32 {
    chrono::Local::now().year()
}

fn default_top_n() -> usize {
    100
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    #[serde(default = "default_font_family")]
    pub font_family: String,

    #[serde(default = "default_font_size")]
    pub font_size: f32,

    /// Hex colour of titles and axis text.
    #[serde(default = "default_font_color")]
    pub font_color: String,

    /// Hex colour of the publications-per-year line.
    #[serde(default = "default_line_color")]
    pub line_color: String,

    #[serde(default = "default_line_width")]
    pub line_width: f32,

    /// Hex colour of the most-cited bars.
    #[serde(default = "default_bar_color")]
    pub bar_color: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            font_size: default_font_size(),
            font_color: default_font_color(),
            line_color: default_line_color(),
            line_width: default_line_width(),
            bar_color: default_bar_color(),
        }
    }
}

fn default_font_family() -> String {
    "Courier New, monospace".to_string()
}

fn default_font_size() -> f32 {
    12.0
}

fn default_font_color() -> String {
    "#7f7f7f".to_string()
}

fn default_line_color() -> String {
    "#0000ff".to_string()
}

fn default_line_width() -> f32 {
    1.0
}

fn default_bar_color() -> String {
    "#1f77b4".to_string()
}

impl StyleConfig {
    pub fn font_color32(&self) -> Color32 {
        parse_hex(&self.font_color).unwrap_or(Color32::GRAY)
    }

    pub fn line_color32(&self) -> Color32 {
        parse_hex(&self.line_color).unwrap_or(Color32::BLUE)
    }

    pub fn bar_color32(&self) -> Color32 {
        parse_hex(&self.bar_color).unwrap_or(Color32::LIGHT_BLUE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Existing directory exported charts are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./figures")
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// Only values given explicitly on the command line override the file.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref dir) = args.datasets {
            self.data.datasets_dir = dir.clone();
        }
        if let Some(ref dir) = args.export_dir {
            self.export.output_dir = dir.clone();
        }
    }

    /// Reject settings the dashboard cannot work with.
    pub fn validate(&self) -> Result<(), DashboardError> {
        let limits = &self.limits;
        if limits.min_year > limits.max_year {
            return Err(DashboardError::Configuration(format!(
                "min_year {} is after max_year {}",
                limits.min_year, limits.max_year
            )));
        }
        if limits.max_papers == 0 || limits.max_keywords == 0 {
            return Err(DashboardError::Configuration(
                "max_papers and max_keywords must be at least 1".to_string(),
            ));
        }
        let style = &self.style;
        for (name, value) in [
            ("font_color", &style.font_color),
            ("line_color", &style.line_color),
            ("bar_color", &style.bar_color),
        ] {
            if parse_hex(value).is_none() {
                return Err(DashboardError::Configuration(format!(
                    "{name} '{value}' is not a hex colour"
                )));
            }
        }
        if style.font_size <= 0.0 || style.line_width <= 0.0 {
            return Err(DashboardError::Configuration(
                "font_size and line_width must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data.datasets_dir, PathBuf::from("./datasets"));
        assert_eq!(config.limits.min_year, 1990);
        assert!(config.limits.max_year >= 2024);
        assert_eq!(config.limits.max_papers, 100);
        assert_eq!(config.limits.max_keywords, 100);
        assert_eq!(config.style.font_family, "Courier New, monospace");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r##"
[data]
datasets_dir = "/srv/scopus"

[limits]
min_year = 2000
max_year = 2015
max_papers = 25

[style]
line_color = "#ff0000"
"##;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.data.datasets_dir, PathBuf::from("/srv/scopus"));
        assert_eq!(config.limits.min_year, 2000);
        assert_eq!(config.limits.max_year, 2015);
        assert_eq!(config.limits.max_papers, 25);
        assert_eq!(config.limits.max_keywords, 100);
        assert_eq!(config.style.line_color32(), Color32::from_rgb(255, 0, 0));
        assert_eq!(config.style.font_color, "#7f7f7f");
        assert_eq!(config.export.output_dir, PathBuf::from("./figures"));
    }

    #[test]
    fn test_merge_with_args_only_overrides_given_values() {
        let mut config = Config::default();
        let args = Args {
            export_dir: Some(PathBuf::from("/tmp/out")),
            ..Args::default()
        };
        config.merge_with_args(&args);
        assert_eq!(config.export.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.data.datasets_dir, PathBuf::from("./datasets"));
    }

    #[test]
    fn test_validate_rejects_inverted_years() {
        let mut config = Config::default();
        config.limits.min_year = 2020;
        config.limits.max_year = 2010;
        assert!(matches!(
            config.validate(),
            Err(DashboardError::Configuration(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_colour_and_zero_limit() {
        let mut config = Config::default();
        config.style.bar_color = "teal".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.limits.max_keywords = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[data]"));
        assert!(toml_str.contains("[limits]"));
        assert!(toml_str.contains("[style]"));
        assert!(toml_str.contains("[export]"));
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, Config::default());
    }
}
