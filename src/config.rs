use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level woa configuration.
///
/// Every key has a default, so an absent file is the same as an empty one.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WoaConfig {
    /// ASCII decoder settings.
    #[serde(default)]
    pub decode: DecodeToml,

    /// NetCDF export settings.
    #[serde(default)]
    pub export: ExportToml,

    /// Series merge settings.
    #[serde(default)]
    pub merge: MergeToml,
}

impl WoaConfig {
    /// Read `path`, or return the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecodeToml {
    #[serde(default = "default_n_lon")]
    pub n_lon: usize,
    #[serde(default = "default_n_lat")]
    pub n_lat: usize,
    #[serde(default = "default_max_levels")]
    pub max_levels: usize,
    #[serde(default = "default_field_width")]
    pub field_width: usize,
    #[serde(default = "default_fields_per_line")]
    pub fields_per_line: usize,
    #[serde(default = "default_true")]
    pub progress: bool,
}

impl Default for DecodeToml {
    fn default() -> Self {
        Self {
            n_lon: default_n_lon(),
            n_lat: default_n_lat(),
            max_levels: default_max_levels(),
            field_width: default_field_width(),
            fields_per_line: default_fields_per_line(),
            progress: true,
        }
    }
}

fn default_n_lon() -> usize {
    360
}
fn default_n_lat() -> usize {
    180
}
fn default_max_levels() -> usize {
    33
}
fn default_field_width() -> usize {
    8
}
fn default_fields_per_line() -> usize {
    10
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportToml {
    pub title: Option<String>,
    pub source: Option<String>,
    pub references: Option<String>,
    pub conventions: Option<String>,
    pub missing_value: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MergeToml {
    #[serde(default = "default_record_name")]
    pub record_name: String,
    #[serde(default = "default_record_units")]
    pub record_units: String,
    /// Fill for levels no input provides, for variables without a missing
    /// value attribute. NaN when unset.
    #[serde(default)]
    pub fill_value: Option<f64>,
}

impl Default for MergeToml {
    fn default() -> Self {
        Self {
            record_name: default_record_name(),
            record_units: default_record_units(),
            fill_value: None,
        }
    }
}

fn default_record_name() -> String {
    "time".to_string()
}
fn default_record_units() -> String {
    "month number".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_defaults() {
        let config: WoaConfig = toml::from_str("").unwrap();
        assert_eq!(config.decode.n_lon, 360);
        assert_eq!(config.decode.max_levels, 33);
        assert!(config.decode.progress);
        assert!(config.export.title.is_none());
        assert_eq!(config.merge.record_name, "time");
        assert_eq!(config.merge.record_units, "month number");
    }

    #[test]
    fn sections_override_defaults() {
        let config: WoaConfig = toml::from_str(
            r#"
            [decode]
            n_lon = 720
            n_lat = 360
            progress = false

            [export]
            title = "World Ocean Atlas 2009"
            missing_value = -999.0

            [merge]
            record_units = "season number"
            "#,
        )
        .unwrap();
        assert_eq!(config.decode.n_lon, 720);
        assert_eq!(config.decode.fields_per_line, 10);
        assert!(!config.decode.progress);
        assert_eq!(config.export.title.as_deref(), Some("World Ocean Atlas 2009"));
        assert_eq!(config.export.missing_value, Some(-999.0));
        assert_eq!(config.merge.record_units, "season number");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<WoaConfig>("[decode]\nwidth = 8\n").is_err());
        assert!(toml::from_str::<WoaConfig>("[plot]\n").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = WoaConfig::load(Some(Path::new("/nonexistent/woa.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read config file"));
    }
}
