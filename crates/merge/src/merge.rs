//! Whole-series merge: derive the schema, append every period, move the
//! result into place.

use std::path::{Path, PathBuf};

use tracing::{info, info_span, warn};
use woa_io::Dataset;

use crate::builder::{Series, SeriesBuilder};
use crate::config::MergeConfig;
use crate::error::MergeError;
use crate::schema::SeriesSchema;

/// Merge the period files `inputs`, in order, into one series at `output`.
///
/// The first input is the template for dimensions and attributes. When
/// `annual` is given, its deeper levels complete any period that stops
/// short of the output depth.
///
/// The output is assembled next to `output` and renamed on success; on any
/// error the partial file is removed and `output` is left untouched.
///
/// # Errors
///
/// - [`MergeError::NoInputs`] if `inputs` is empty.
/// - [`MergeError::RecordDimensionExists`] or [`MergeError::SchemaMismatch`]
///   if the inputs cannot form one series.
/// - [`MergeError::Io`] for read and write failures.
/// - [`MergeError::Filesystem`] if the finished file cannot be renamed.
pub fn merge_series(
    inputs: &[PathBuf],
    annual: Option<&Path>,
    output: &Path,
    config: &MergeConfig,
) -> Result<Series, MergeError> {
    let _span = info_span!("merge_series", output = %output.display()).entered();
    let Some(first) = inputs.first() else {
        return Err(MergeError::NoInputs);
    };

    let partial = partial_path(output);
    match write_series(inputs, first, annual, &partial, config) {
        Ok(mut series) => {
            std::fs::rename(&partial, output).map_err(|source| MergeError::Filesystem {
                path: output.to_path_buf(),
                source,
            })?;
            series.path = output.to_path_buf();
            info!(records = series.n_records, "series written");
            Ok(series)
        }
        Err(e) => {
            if partial.exists()
                && let Err(cleanup) = std::fs::remove_file(&partial)
            {
                warn!(path = %partial.display(), error = %cleanup, "cannot remove partial output");
            }
            Err(e)
        }
    }
}

fn write_series(
    inputs: &[PathBuf],
    template: &Path,
    annual: Option<&Path>,
    partial: &Path,
    config: &MergeConfig,
) -> Result<Series, MergeError> {
    let template = Dataset::open(template)?;
    let annual = annual.map(Dataset::open).transpose()?;
    let schema = SeriesSchema::derive(
        &template,
        annual.as_ref(),
        config.record(),
        config.fill_value(),
    )?;
    drop(template);

    let mut builder = SeriesBuilder::create(partial, schema)?;
    for path in inputs {
        let period = Dataset::open(path)?;
        builder.write_period(&period, annual.as_ref())?;
    }
    builder.finish()
}

/// Sibling of `output` used while the series is being written.
fn partial_path(output: &Path) -> PathBuf {
    let mut name = output.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    output.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_path_is_a_sibling() {
        assert_eq!(
            partial_path(Path::new("/data/t_merged.nc")),
            PathBuf::from("/data/t_merged.nc.partial")
        );
    }

    #[test]
    fn empty_inputs_are_rejected() {
        let err = merge_series(&[], None, Path::new("out.nc"), &MergeConfig::default()).unwrap_err();
        assert!(matches!(err, MergeError::NoInputs));
    }
}
