//! Write a decoded [`Grid`] to NetCDF and read one back.

use std::path::Path;

use ndarray::Ix3;
use tracing::{debug, info};
use woa_grid::{Grid, latitudes, longitudes, standard_depths};

use crate::dataset::{Attribute, Dataset, FILL_VALUE, MISSING_VALUE};
use crate::error::IoError;
use crate::variable::VariableKind;
use crate::writer::DatasetWriter;

/// Global attributes and the missing-value sentinel for exported grids.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    /// `title` global attribute.
    title: String,
    /// `source` global attribute.
    source: String,
    /// `references` global attribute.
    references: String,
    /// `Conventions` global attribute.
    conventions: String,
    /// Value written in place of NaN samples.
    missing_value: f64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            title: "World Ocean Atlas 2005".to_string(),
            source: "ftp://ftp.nodc.noaa.gov/pub/WOA05/DATA/".to_string(),
            references: "http://www.nodc.noaa.gov/OC5/WOA05/pr_woa05.html".to_string(),
            conventions: "CF-1.4".to_string(),
            missing_value: -99.9999,
        }
    }
}

impl ExportConfig {
    /// Sets the `title` attribute.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the `source` attribute.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Sets the `references` attribute.
    pub fn with_references(mut self, references: impl Into<String>) -> Self {
        self.references = references.into();
        self
    }

    /// Sets the `Conventions` attribute.
    pub fn with_conventions(mut self, conventions: impl Into<String>) -> Self {
        self.conventions = conventions.into();
        self
    }

    /// Sets the missing-value sentinel.
    pub fn with_missing_value(mut self, missing_value: f64) -> Self {
        self.missing_value = missing_value;
        self
    }

    /// The missing-value sentinel.
    pub fn missing_value(&self) -> f64 {
        self.missing_value
    }

    /// The `title` attribute.
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Write `grid` to a new file at `path` as the field identified by `kind`.
///
/// The file has dimensions `depth`, `lat` and `lon`, one coordinate variable
/// per dimension and a `(depth, lat, lon)` data variable named after `kind`.
/// NaN samples are stored as the configured missing value.
///
/// # Errors
///
/// Returns [`IoError::Netcdf`] if the file cannot be written.
pub fn write_grid(
    path: &Path,
    grid: &Grid,
    kind: VariableKind,
    config: &ExportConfig,
) -> Result<(), IoError> {
    let meta = kind.metadata();
    let mut out = DatasetWriter::create(path)?;

    out.add_attribute("title", config.title.as_str())?;
    out.add_attribute("source", config.source.as_str())?;
    out.add_attribute("references", config.references.as_str())?;
    out.add_attribute("Conventions", config.conventions.as_str())?;
    out.add_attribute(
        "history",
        format!(
            "{}: created by woa {}",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
            env!("CARGO_PKG_VERSION")
        )
        .as_str(),
    )?;

    out.add_dimension("lon", grid.n_lon())?;
    out.add_dimension("lat", grid.n_lat())?;
    out.add_dimension("depth", grid.n_levels())?;

    out.add_variable(
        "lon",
        &["lon"],
        &[
            Attribute::new("long_name", "Longitude"),
            Attribute::new("standard_name", "longitude"),
            Attribute::new("units", "degrees_east"),
            Attribute::new("axis", "X"),
            Attribute::new("description", "Cell-centre longitude"),
        ],
    )?;
    out.add_variable(
        "lat",
        &["lat"],
        &[
            Attribute::new("long_name", "Latitude"),
            Attribute::new("standard_name", "latitude"),
            Attribute::new("units", "degrees_north"),
            Attribute::new("axis", "Y"),
            Attribute::new("description", "Cell-centre latitude"),
        ],
    )?;
    out.add_variable(
        "depth",
        &["depth"],
        &[
            Attribute::new("long_name", "Depth"),
            Attribute::new("standard_name", "depth"),
            Attribute::new("units", "m"),
            Attribute::new("axis", "Z"),
            Attribute::new("positive", "down"),
            Attribute::new("description", "Standard depth levels"),
        ],
    )?;

    let missing = config.missing_value;
    out.add_variable(
        meta.name,
        &["depth", "lat", "lon"],
        &[
            Attribute::new("long_name", meta.long_name),
            Attribute::new("standard_name", meta.standard_name),
            Attribute::new("units", meta.units),
            Attribute::new("references", meta.references),
            Attribute::new("documentation", meta.documentation),
            Attribute::new(MISSING_VALUE, missing),
            Attribute::new(FILL_VALUE, missing),
        ],
    )?;

    out.put_values("lon", grid.lon())?;
    out.put_values("lat", grid.lat())?;
    out.put_values("depth", grid.depth())?;

    let values: Vec<f64> = grid
        .data()
        .iter()
        .map(|&v| if v.is_nan() { missing } else { v })
        .collect();
    out.put_values(meta.name, &values)?;
    out.close()?;

    info!(
        path = %path.display(),
        variable = meta.name,
        levels = grid.n_levels(),
        "wrote grid"
    );
    Ok(())
}

/// Read the `(depth, lat, lon)` variable `name` from `path` as a [`Grid`].
///
/// Missing values become NaN. Axes are read from coordinate variables named
/// after the dimensions; absent ones are regenerated from the shape.
///
/// # Errors
///
/// Returns [`IoError::DimensionMismatch`] if the variable is not 3-D,
/// [`IoError::Grid`] if the depth axis is not a standard prefix, or the errors
/// of [`Dataset`].
pub fn read_grid(path: &Path, name: &str) -> Result<Grid, IoError> {
    let dataset = Dataset::open(path)?;
    let info = dataset.variable(name)?;
    if info.rank() != 3 {
        return Err(IoError::DimensionMismatch {
            name: format!("{name} dimensions"),
            expected: 3,
            got: info.rank(),
        });
    }

    let data = dataset
        .read_field(name)?
        .into_dimensionality::<Ix3>()
        .map_err(|_| IoError::DimensionMismatch {
            name: format!("{name} dimensions"),
            expected: 3,
            got: info.rank(),
        })?;
    let (nk, n_lat, n_lon) = data.dim();

    let axis = |dim: &str, fallback: Vec<f64>| -> Result<Vec<f64>, IoError> {
        if dataset.has_variable(dim) {
            dataset.read_all(dim)
        } else {
            debug!(dimension = dim, "no coordinate variable, using regular axis");
            Ok(fallback)
        }
    };
    let depth = axis(&info.dims[0], standard_depths(nk)?.to_vec())?;
    let lat = axis(&info.dims[1], latitudes(n_lat, n_lon))?;
    let lon = axis(&info.dims[2], longitudes(n_lon))?;

    Ok(Grid::new(data, lon, lat, depth)?)
}
