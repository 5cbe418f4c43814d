//! Configuration file support for the overlay engine.
//!
//! Hosts keep palette, timing, and display defaults in a versioned JSON
//! document. Every field has a default, so partial files load; unknown keys
//! are ignored.

use std::path::Path;

use segview_draw::Color;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::constants::{MIN_STROKE_WIDTH, PRESS_DURATION_MS};
use crate::palette::{ColorAssigner, ColorPolicy, DEFAULT_PALETTE, HIGHLIGHT_COLOR, OTHER_COLOR};
use crate::press::PressTracker;
use crate::render::{DisplayOptions, OverlayRenderer};

/// Log level setting for the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Serializable form of [`ColorPolicy`]. The role policy's focus is a
/// runtime value and always starts empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    #[default]
    Position,
    Identity,
    Role,
}

impl From<PolicyKind> for ColorPolicy {
    fn from(kind: PolicyKind) -> Self {
        match kind {
            PolicyKind::Position => ColorPolicy::Position,
            PolicyKind::Identity => ColorPolicy::Identity,
            PolicyKind::Role => ColorPolicy::Role { focus: None },
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Smallest number of valid palette entries a configuration may carry.
pub const MIN_PALETTE_SIZE: usize = 8;

/// Overlay configuration that can be exported and imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// How long a clicked annotation stays emphasized
    pub press_duration_ms: u64,

    /// Smallest on-screen stroke width in surface pixels
    pub min_stroke_width: f32,

    /// Annotation palette as `#RRGGBB` strings
    pub palette: Vec<String>,

    /// Focus color for the role policy
    pub highlight_color: String,

    /// Color of every non-focus annotation under the role policy
    pub other_color: String,

    pub color_policy: PolicyKind,

    /// Display defaults
    pub display: DisplayOptions,

    /// Log verbosity level
    pub log_level: LogLevel,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            press_duration_ms: PRESS_DURATION_MS,
            min_stroke_width: MIN_STROKE_WIDTH,
            palette: DEFAULT_PALETTE
                .iter()
                .map(|&packed| Color::from_rgb_u32(packed).to_hex())
                .collect(),
            highlight_color: Color::from_rgb_u32(HIGHLIGHT_COLOR).to_hex(),
            other_color: Color::from_rgb_u32(OTHER_COLOR).to_hex(),
            color_policy: PolicyKind::default(),
            display: DisplayOptions::default(),
            log_level: LogLevel::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize and validate configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        config.validate()?;
        log::info!(
            "Loaded overlay configuration (version {}, {} palette colors)",
            config.version,
            config.palette.len()
        );
        Ok(config)
    }

    /// Read a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::debug!("Configuration read from {:?}", path);
        Ok(config)
    }

    /// Write the configuration to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::info!("Saved overlay configuration to {:?}", path);
        Ok(())
    }

    /// Check value ranges and colors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_stroke_width.is_finite() && self.min_stroke_width > 0.0) {
            return Err(ConfigError::invalid_value(
                "min_stroke_width",
                format!("must be a positive number, got {}", self.min_stroke_width),
            ));
        }
        if !(self.display.mask_opacity >= 0.0 && self.display.mask_opacity <= 1.0) {
            return Err(ConfigError::invalid_value(
                "display.maskOpacity",
                format!("must be within 0..=1, got {}", self.display.mask_opacity),
            ));
        }
        if !(self.display.stroke_width.is_finite() && self.display.stroke_width > 0.0) {
            return Err(ConfigError::invalid_value(
                "display.strokeWidth",
                format!("must be a positive number, got {}", self.display.stroke_width),
            ));
        }
        self.assigner().map(|_| ())
    }

    /// Parsed palette. Malformed entries are skipped with a warning.
    pub fn palette_colors(&self) -> Result<Vec<Color>, ConfigError> {
        let colors: Vec<Color> = self
            .palette
            .iter()
            .filter_map(|value| match Color::from_hex(value) {
                Ok(color) => Some(color),
                Err(e) => {
                    log::warn!("Ignoring palette entry: {}", e);
                    None
                }
            })
            .collect();

        if colors.len() < MIN_PALETTE_SIZE {
            return Err(ConfigError::invalid_value(
                "palette",
                format!(
                    "needs at least {} valid colors, found {}",
                    MIN_PALETTE_SIZE,
                    colors.len()
                ),
            ));
        }
        Ok(colors)
    }

    /// Color assigner for the configured palette and role colors.
    pub fn assigner(&self) -> Result<ColorAssigner, ConfigError> {
        let palette = self.palette_colors()?;
        let highlight = parse_color(&self.highlight_color)?;
        let other = parse_color(&self.other_color)?;
        ColorAssigner::new(palette, highlight, other)
            .ok_or_else(|| ConfigError::invalid_value("palette", "must not be empty"))
    }

    /// Renderer built from this configuration.
    pub fn renderer(&self) -> Result<OverlayRenderer, ConfigError> {
        Ok(OverlayRenderer::new(
            self.assigner()?,
            self.color_policy.into(),
            self.min_stroke_width,
        ))
    }

    pub fn press_duration(&self) -> Duration {
        Duration::from_millis(self.press_duration_ms)
    }

    pub fn press_tracker(&self) -> PressTracker {
        PressTracker::new(self.press_duration())
    }
}

fn parse_color(value: &str) -> Result<Color, ConfigError> {
    Color::from_hex(value).map_err(|_| ConfigError::InvalidColor {
        value: value.to_string(),
    })
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// A color string that is not `#RRGGBB` or `#RRGGBBAA`
    #[error("Invalid color: {value}")]
    InvalidColor { value: String },

    /// A field outside its allowed range
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_roundtrip() {
        let config = OverlayConfig::new();
        let json = config.to_json().unwrap();
        let loaded = OverlayConfig::from_json(&json).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = OverlayConfig::from_json(
            r#"{"version": 1, "press_duration_ms": 350, "display": {"showLabels": true}}"#,
        )
        .unwrap();
        assert_eq!(config.press_duration(), Duration::from_millis(350));
        assert!(config.display.show_labels);
        assert!(config.display.show_masks);
        assert_eq!(config.palette.len(), 8);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config = OverlayConfig::from_json(r#"{"theme": "dark", "log_level": "debug"}"#).unwrap();
        assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_newer_version_rejected() {
        let err = OverlayConfig::from_json(r#"{"version": 99}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::VersionTooNew {
                file_version: 99,
                supported_version: CONFIG_VERSION
            }
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            OverlayConfig::from_json("{ not json"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_short_palette_rejected() {
        let err = OverlayConfig::from_json(r##"{"palette": ["#FF0000", "#00FF00"]}"##).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "palette"));
    }

    #[test]
    fn test_malformed_palette_entries_skipped() {
        let mut config = OverlayConfig::new();
        config.palette.push("not-a-color".to_string());
        assert_eq!(config.palette_colors().unwrap().len(), 8);

        config.palette.truncate(7);
        config.palette.push("#12345".to_string());
        assert!(config.palette_colors().is_err());
    }

    #[test]
    fn test_invalid_role_color() {
        let err =
            OverlayConfig::from_json(r#"{"highlight_color": "blue"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidColor { ref value } if value == "blue"));
    }

    #[test]
    fn test_invalid_ranges() {
        assert!(OverlayConfig::from_json(r#"{"min_stroke_width": 0}"#).is_err());
        assert!(OverlayConfig::from_json(r#"{"display": {"maskOpacity": 1.5}}"#).is_err());
        assert!(OverlayConfig::from_json(r#"{"display": {"strokeWidth": -1}}"#).is_err());
    }

    #[test]
    fn test_renderer_uses_configured_policy() {
        let config = OverlayConfig {
            color_policy: PolicyKind::Identity,
            ..OverlayConfig::new()
        };
        let renderer = config.renderer().unwrap();
        assert_eq!(renderer.policy(), ColorPolicy::Identity);
        assert_eq!(renderer.assigner().palette().len(), 8);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("segview-config-{}.json", std::process::id()));
        let config = OverlayConfig {
            press_duration_ms: 120,
            ..OverlayConfig::new()
        };
        config.save(&path).unwrap();
        let loaded = OverlayConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.press_tracker().duration(), Duration::from_millis(120));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = OverlayConfig::load("/nonexistent/segview/config.json").unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
