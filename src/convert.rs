//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result};

use woa_grid::GridLayout;
use woa_io::ExportConfig;
use woa_merge::{MergeConfig, RecordAxis};

use crate::config::{DecodeToml, ExportToml, MergeToml};

/// Builds a validated [`GridLayout`] from the `[decode]` section.
pub fn build_grid_layout(decode: &DecodeToml) -> Result<GridLayout> {
    let layout = GridLayout::default()
        .with_n_lon(decode.n_lon)
        .with_n_lat(decode.n_lat)
        .with_max_levels(decode.max_levels)
        .with_field_width(decode.field_width)
        .with_fields_per_line(decode.fields_per_line);
    layout.validate().context("invalid [decode] layout")?;
    Ok(layout)
}

/// Builds an [`ExportConfig`] from the `[export]` section.
pub fn build_export_config(export: &ExportToml) -> ExportConfig {
    let mut cfg = ExportConfig::default();
    if let Some(ref v) = export.title {
        cfg = cfg.with_title(v);
    }
    if let Some(ref v) = export.source {
        cfg = cfg.with_source(v);
    }
    if let Some(ref v) = export.references {
        cfg = cfg.with_references(v);
    }
    if let Some(ref v) = export.conventions {
        cfg = cfg.with_conventions(v);
    }
    if let Some(v) = export.missing_value {
        cfg = cfg.with_missing_value(v);
    }
    cfg
}

/// Builds a [`MergeConfig`] from the `[merge]` section.
pub fn build_merge_config(merge: &MergeToml) -> MergeConfig {
    let record = RecordAxis::default()
        .with_name(&merge.record_name)
        .with_units(&merge.record_units);
    let cfg = MergeConfig::default().with_record(record);
    match merge.fill_value {
        Some(v) => cfg.with_fill_value(v),
        None => cfg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sections_match_library_defaults() {
        let layout = build_grid_layout(&DecodeToml::default()).unwrap();
        assert_eq!(layout, GridLayout::default());
        assert_eq!(
            build_export_config(&ExportToml::default()),
            ExportConfig::default()
        );
        assert_eq!(
            build_merge_config(&MergeToml::default()),
            MergeConfig::default()
        );
    }

    #[test]
    fn invalid_layout_is_rejected() {
        let decode = DecodeToml {
            fields_per_line: 7,
            ..DecodeToml::default()
        };
        assert!(build_grid_layout(&decode).is_err());
    }

    #[test]
    fn merge_fill_value_is_forwarded() {
        let merge = MergeToml {
            fill_value: Some(-1.0e10),
            ..MergeToml::default()
        };
        assert_eq!(build_merge_config(&merge).fill_value(), -1.0e10);
    }
}
