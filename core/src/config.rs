//! TOML Configuration File Support
//!
//! Scene layout, reorder tuning and the animation type table are fixed
//! when a scene is built. They come from `~/.config/reflow/reflow.toml`
//! when that file exists.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. Environment variables
//! 2. TOML configuration file
//! 3. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! default_animation_type = 0
//!
//! [list]
//! left = 4
//! top = 4
//! width = 40
//! rows = 60
//! row_width = 45
//!
//! [reorder]
//! probability = 0.2
//! total_duration_ms = 300
//! max_stagger_ms = 700
//! max_weight = 200
//!
//! [[animation_types]]
//! life = { kind = "constant", ms = 400 }
//! effect = { kind = "alpha_add", color = "#f4ecd8", rate = "decelerating" }
//!
//! [[labels]]
//! text = "press s to shuffle"
//! color = "#808080"
//! top = -2
//! left = 0
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animation::{AnimationType, RateFunction};
use crate::choreographer::ReorderPolicy;
use crate::color::Rgb;
use crate::console::{AnchorSpec, Layout};

/// Highlight a moved row flashes before settling back to its own color
pub const DEFAULT_HIGHLIGHT: Rgb = Rgb::from_u32(0xf4ecd8);

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML (including unknown effect or rate kinds)
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Geometry of the list console and its rows
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListConfig {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    /// Number of rows the surface fills the list with
    pub rows: usize,
    pub row_width: i32,
    pub row_height: i32,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            left: 4,
            top: 4,
            width: 40,
            height: 1,
            rows: 60,
            row_width: 45,
            row_height: 1,
        }
    }
}

impl ListConfig {
    /// Layout of the list console itself
    pub fn layout(&self) -> Layout {
        Layout::new(self.left, self.top, self.width, self.height)
    }

    /// Layout of the first row, relative to the list console
    pub fn row_layout(&self) -> Layout {
        Layout::new(0, 0, self.row_width, self.row_height)
    }
}

/// Reorder tuning in config units
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReorderConfig {
    pub probability: f64,
    pub total_duration_ms: u64,
    pub max_stagger_ms: u64,
    pub max_weight: u32,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            probability: 0.2,
            total_duration_ms: 300,
            max_stagger_ms: 700,
            max_weight: 200,
        }
    }
}

impl ReorderConfig {
    pub fn policy(&self) -> ReorderPolicy {
        ReorderPolicy {
            probability: self.probability,
            max_weight: self.max_weight,
            total_duration: Duration::from_millis(self.total_duration_ms),
            max_stagger: Duration::from_millis(self.max_stagger_ms),
        }
    }
}

/// A fixed caption bound to the list console
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelConfig {
    pub text: String,
    pub color: Rgb,
    #[serde(default)]
    pub background: Rgb,
    #[serde(default)]
    pub top: i32,
    #[serde(flatten)]
    pub anchor: AnchorSpec,
}

/// Complete scene configuration
#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub list: ListConfig,
    pub reorder: ReorderConfig,
    /// Fade descriptors; finished moves use `default_animation_type`
    pub animation_types: Vec<AnimationType>,
    pub default_animation_type: usize,
    pub labels: Vec<LabelConfig>,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    pub(crate) source: ConfigSource,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            list: ListConfig::default(),
            reorder: ReorderConfig::default(),
            animation_types: vec![AnimationType::fade(
                400,
                DEFAULT_HIGHLIGHT,
                RateFunction::Decelerating,
            )],
            default_animation_type: 0,
            labels: Vec::new(),
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl SceneConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Check values a scene cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::ValidationError(msg));

        if !(0.0..=1.0).contains(&self.reorder.probability) {
            return invalid(format!(
                "reorder.probability must be within [0, 1], got {}",
                self.reorder.probability
            ));
        }
        if self.reorder.total_duration_ms == 0 {
            return invalid("reorder.total_duration_ms must be > 0".into());
        }
        if self.list.rows == 0 {
            return invalid("list.rows must be > 0".into());
        }
        if self.animation_types.is_empty() {
            return invalid("at least one animation type is required".into());
        }
        if self.default_animation_type >= self.animation_types.len() {
            return invalid(format!(
                "default_animation_type {} is out of range ({} types)",
                self.default_animation_type,
                self.animation_types.len()
            ));
        }
        if let Some(index) = self
            .animation_types
            .iter()
            .position(|t| t.life.duration().is_zero())
        {
            return invalid(format!("animation_types[{index}] has a zero lifetime"));
        }
        Ok(())
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// List section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListToml {
    pub left: Option<i32>,
    pub top: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub rows: Option<usize>,
    pub row_width: Option<i32>,
    pub row_height: Option<i32>,
}

/// Reorder section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReorderToml {
    pub probability: Option<f64>,
    pub total_duration_ms: Option<u64>,
    pub max_stagger_ms: Option<u64>,
    pub max_weight: Option<u32>,
}

/// Root of the TOML configuration file
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneToml {
    pub list: ListToml,
    pub reorder: ReorderToml,
    pub animation_types: Option<Vec<AnimationType>>,
    pub default_animation_type: Option<usize>,
    pub labels: Vec<LabelConfig>,
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/reflow/reflow.toml` or
/// `~/.config/reflow/reflow.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("reflow").join("reflow.toml"))
}

/// Load configuration from the default path, then the environment
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or
/// if the resulting values do not validate. A missing config file is not
/// an error (defaults are used).
pub fn load_config() -> Result<SceneConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path, then the environment
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or
/// parsed, or if the resulting values do not validate.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<SceneConfig, ConfigError> {
    let mut config = SceneConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: SceneToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config);
    config.validate()?;

    Ok(config)
}

/// Parse a TOML document on top of the defaults
///
/// # Errors
///
/// Returns an error if the document does not parse or validate.
pub fn parse_config(toml_content: &str) -> Result<SceneConfig, ConfigError> {
    let mut config = SceneConfig::default();
    apply_toml_config(&mut config, toml::from_str(toml_content)?);
    config.source = ConfigSource::File;
    config.validate()?;
    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut SceneConfig, toml: SceneToml) {
    let list = &mut config.list;
    if let Some(left) = toml.list.left {
        list.left = left;
    }
    if let Some(top) = toml.list.top {
        list.top = top;
    }
    if let Some(width) = toml.list.width {
        list.width = width;
    }
    if let Some(height) = toml.list.height {
        list.height = height;
    }
    if let Some(rows) = toml.list.rows {
        list.rows = rows;
    }
    if let Some(row_width) = toml.list.row_width {
        list.row_width = row_width;
    }
    if let Some(row_height) = toml.list.row_height {
        list.row_height = row_height;
    }

    let reorder = &mut config.reorder;
    if let Some(probability) = toml.reorder.probability {
        reorder.probability = probability;
    }
    if let Some(total) = toml.reorder.total_duration_ms {
        reorder.total_duration_ms = total;
    }
    if let Some(stagger) = toml.reorder.max_stagger_ms {
        reorder.max_stagger_ms = stagger;
    }
    if let Some(max_weight) = toml.reorder.max_weight {
        reorder.max_weight = max_weight;
    }

    if let Some(types) = toml.animation_types {
        config.animation_types = types;
    }
    if let Some(index) = toml.default_animation_type {
        config.default_animation_type = index;
    }
    config.labels = toml.labels;
}

/// Apply environment variable overrides to the config
fn apply_env_config(config: &mut SceneConfig) {
    apply_overrides(config, |key| std::env::var(key).ok());
}

/// Apply overrides from any key lookup (the environment in production)
fn apply_overrides(config: &mut SceneConfig, lookup: impl Fn(&str) -> Option<String>) {
    fn parsed<T: std::str::FromStr>(
        lookup: &impl Fn(&str) -> Option<String>,
        key: &str,
    ) -> Option<T> {
        let raw = lookup(key)?;
        match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(key, value = %raw, "Ignoring unparseable environment override");
                None
            }
        }
    }

    if let Some(probability) = parsed(&lookup, "REFLOW_REORDER_PROBABILITY") {
        config.reorder.probability = probability;
        config.source = ConfigSource::Env;
    }
    if let Some(total) = parsed(&lookup, "REFLOW_TOTAL_DURATION_MS") {
        config.reorder.total_duration_ms = total;
        config.source = ConfigSource::Env;
    }
    if let Some(stagger) = parsed(&lookup, "REFLOW_MAX_STAGGER_MS") {
        config.reorder.max_stagger_ms = stagger;
        config.source = ConfigSource::Env;
    }
    if let Some(rows) = parsed(&lookup, "REFLOW_ROWS") {
        config.list.rows = rows;
        config.source = ConfigSource::Env;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{ColorEffect, Lifetime};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    // =========================================================================
    // Default Configuration Tests
    // =========================================================================

    #[test]
    fn test_default_config() {
        let config = SceneConfig::default();

        assert_eq!(config.list.layout(), Layout::new(4, 4, 40, 1));
        assert_eq!(config.list.row_layout(), Layout::new(0, 0, 45, 1));
        assert_eq!(config.list.rows, 60);
        assert_eq!(config.reorder.policy(), ReorderPolicy::default());
        assert_eq!(config.animation_types.len(), 1);
        assert_eq!(
            config.animation_types[0].life,
            Lifetime::Constant { millis: 400 }
        );
        assert!(matches!(
            config.animation_types[0].effect,
            ColorEffect::AlphaAdd {
                rate: RateFunction::Decelerating,
                ..
            }
        ));
        assert_eq!(config.source(), ConfigSource::Default);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config_path() {
        if let Some(p) = default_config_path() {
            assert!(p.ends_with("reflow/reflow.toml"));
        }
    }

    // =========================================================================
    // TOML Parsing Tests
    // =========================================================================

    #[test]
    fn test_parse_valid_toml() {
        let toml_content = r##"
default_animation_type = 1

[list]
left = 2
top = 1
rows = 12
row_width = 30

[reorder]
probability = 0.5
total_duration_ms = 450
max_stagger_ms = 100
max_weight = 50

[[animation_types]]
life = { kind = "constant", ms = 250 }
effect = { kind = "alpha_add", color = "#ffffff", rate = "linear" }

[[animation_types]]
life = { kind = "constant", ms = 600 }
effect = { kind = "alpha_add", color = "#ff0000", rate = "decelerating" }

[[labels]]
text = "shuffle"
color = "#808080"
top = -2
right = 0
"##;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config_from_path(Some(file.path().to_path_buf())).unwrap();

        assert_eq!(config.list.layout(), Layout::new(2, 1, 40, 1));
        assert_eq!(config.list.rows, 12);
        assert_eq!(config.list.row_width, 30);
        assert_eq!(config.reorder.max_weight, 50);
        assert_eq!(
            config.reorder.policy().total_duration,
            Duration::from_millis(450)
        );
        assert_eq!(config.animation_types.len(), 2);
        assert_eq!(
            config.animation_types[1],
            AnimationType::fade(600, Rgb::new(255, 0, 0), RateFunction::Decelerating)
        );
        assert_eq!(config.default_animation_type, 1);
        assert_eq!(
            config.labels,
            vec![LabelConfig {
                text: "shuffle".into(),
                color: Rgb::new(128, 128, 128),
                background: Rgb::BLACK,
                top: -2,
                anchor: AnchorSpec {
                    left: None,
                    right: Some(0),
                },
            }]
        );
        assert_eq!(config.config_file_path, Some(file.path().to_path_buf()));
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = parse_config("[reorder]\nmax_stagger_ms = 0\n").unwrap();

        assert_eq!(config.reorder.max_stagger_ms, 0);
        assert_eq!(config.reorder.probability, 0.2);
        assert_eq!(config.list, ListConfig::default());
        assert_eq!(config.animation_types, SceneConfig::default().animation_types);
        assert_eq!(config.source(), ConfigSource::File);
    }

    #[test]
    fn test_parse_empty_toml() {
        let config = parse_config("").unwrap();
        assert_eq!(config.list, ListConfig::default());
        assert_eq!(config.reorder, ReorderConfig::default());
    }

    // =========================================================================
    // Missing File Handling Tests
    // =========================================================================

    #[test]
    fn test_missing_file_graceful() {
        let path = PathBuf::from("/nonexistent/path/reflow.toml");
        let config = load_config_from_path(Some(path)).unwrap();

        assert!(config.config_file_path.is_none());
        assert!(
            config.source() == ConfigSource::Default || config.source() == ConfigSource::Env,
            "Expected Default or Env source, got: {:?}",
            config.source()
        );
    }

    // =========================================================================
    // Malformed and Invalid TOML Tests
    // =========================================================================

    #[test]
    fn test_malformed_toml_error() {
        let result = parse_config("[reorder\nprobability = \"high\"\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_unknown_rate_function_error() {
        let result = parse_config(
            r##"
[[animation_types]]
life = { kind = "constant", ms = 400 }
effect = { kind = "alpha_add", color = "#ffffff", rate = "SIN-" }
"##,
        );
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_bad_color_error() {
        let result = parse_config(
            r##"
[[labels]]
text = "x"
color = "white"
left = 0
"##,
        );
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_validation_errors() {
        let cases = [
            "[reorder]\nprobability = 1.5\n",
            "[reorder]\ntotal_duration_ms = 0\n",
            "[list]\nrows = 0\n",
            "animation_types = []\n",
            "default_animation_type = 3\n",
            "[[animation_types]]\nlife = { kind = \"constant\", ms = 0 }\n\
             effect = { kind = \"alpha_add\", color = \"#ffffff\", rate = \"linear\" }\n",
        ];

        for case in cases {
            assert!(
                matches!(parse_config(case), Err(ConfigError::ValidationError(_))),
                "expected validation error for {case:?}"
            );
        }
    }

    // =========================================================================
    // Priority Ordering Tests
    // =========================================================================

    #[test]
    fn test_overrides_beat_file_values() {
        let mut config = parse_config("[reorder]\nprobability = 0.9\n").unwrap();

        apply_overrides(
            &mut config,
            env(&[
                ("REFLOW_REORDER_PROBABILITY", "0.1"),
                ("REFLOW_MAX_STAGGER_MS", " 50 "),
                ("REFLOW_ROWS", "8"),
            ]),
        );

        assert_eq!(config.reorder.probability, 0.1);
        assert_eq!(config.reorder.max_stagger_ms, 50);
        assert_eq!(config.reorder.total_duration_ms, 300);
        assert_eq!(config.list.rows, 8);
        assert_eq!(config.source(), ConfigSource::Env);
    }

    #[test]
    fn test_unparseable_override_is_ignored() {
        let mut config = SceneConfig::default();
        apply_overrides(&mut config, env(&[("REFLOW_TOTAL_DURATION_MS", "soon")]));

        assert_eq!(config.reorder.total_duration_ms, 300);
        assert_eq!(config.source(), ConfigSource::Default);
    }

    #[test]
    fn test_config_source_display() {
        assert_eq!(ConfigSource::Env.to_string(), "environment");
        assert_eq!(ConfigSource::File.to_string(), "config file");
        assert_eq!(ConfigSource::Default.to_string(), "default");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::ValidationError("rows must be > 0".into());
        assert_eq!(err.to_string(), "Invalid configuration: rows must be > 0");
    }
}
