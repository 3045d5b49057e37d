//! Write access to a new NetCDF container.

use std::path::{Path, PathBuf};

use netcdf::AttributeValue;
use tracing::debug;

use crate::dataset::{Attribute, FILL_VALUE, MISSING_VALUE, slab_extents};
use crate::error::IoError;
use crate::value_type::ValueType;

/// A NetCDF file being created.
///
/// Values are passed in as `f64` and converted by NetCDF to each variable's
/// storage type.
pub struct DatasetWriter {
    file: netcdf::FileMut,
    path: PathBuf,
}

impl std::fmt::Debug for DatasetWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetWriter")
            .field("path", &self.path)
            .finish()
    }
}

impl DatasetWriter {
    /// Create (or truncate) the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Netcdf`] if the file cannot be created.
    pub fn create(path: &Path) -> Result<Self, IoError> {
        let file = netcdf::create(path)?;
        debug!(path = %path.display(), "created dataset");
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Path being written.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add a fixed-length dimension.
    pub fn add_dimension(&mut self, name: &str, len: usize) -> Result<(), IoError> {
        self.file.add_dimension(name, len)?;
        Ok(())
    }

    /// Add the unlimited record dimension.
    pub fn add_unlimited_dimension(&mut self, name: &str) -> Result<(), IoError> {
        self.file.add_unlimited_dimension(name)?;
        Ok(())
    }

    /// Add a global attribute.
    pub fn add_attribute(
        &mut self,
        name: &str,
        value: impl Into<AttributeValue>,
    ) -> Result<(), IoError> {
        self.file.add_attribute(name, value.into())?;
        Ok(())
    }

    /// Add a 32-bit float variable over `dims` and attach `attributes`.
    ///
    /// # Errors
    ///
    /// Same as [`DatasetWriter::add_variable_of`].
    pub fn add_variable(
        &mut self,
        name: &str,
        dims: &[&str],
        attributes: &[Attribute],
    ) -> Result<(), IoError> {
        self.add_variable_of(name, ValueType::F32, dims, attributes)
    }

    /// Add a variable stored as `value_type` over `dims` and attach
    /// `attributes`.
    ///
    /// Numeric `_FillValue` and `missing_value` attributes of another type
    /// are converted to `value_type`, as NetCDF requires; all other
    /// attributes are written as given.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Netcdf`] if a dimension is undefined or the
    /// variable already exists.
    pub fn add_variable_of(
        &mut self,
        name: &str,
        value_type: ValueType,
        dims: &[&str],
        attributes: &[Attribute],
    ) -> Result<(), IoError> {
        let mut var = self
            .file
            .add_variable_with_type(name, dims, &value_type.to_nc())?;
        for attr in attributes {
            let value: AttributeValue = match attr.name.as_str() {
                FILL_VALUE | MISSING_VALUE => value_type.coerce(&attr.value),
                _ => attr.value.clone(),
            };
            var.put_attribute(&attr.name, value)?;
        }
        debug!(variable = name, ?value_type, "added variable");
        Ok(())
    }

    /// Write every value of a fixed-size variable.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::DimensionMismatch`] if `values` does not match the
    /// variable size, or [`IoError::MissingVariable`].
    pub fn put_values(&mut self, name: &str, values: &[f64]) -> Result<(), IoError> {
        let path = self.path.clone();
        let mut var = self
            .file
            .variable_mut(name)
            .ok_or_else(|| IoError::MissingVariable {
                name: name.to_string(),
                path,
            })?;
        let expected: usize = var.dimensions().iter().map(|d| d.len()).product();
        if values.len() != expected {
            return Err(IoError::DimensionMismatch {
                name: name.to_string(),
                expected,
                got: values.len(),
            });
        }
        var.put_values(values, ..)?;
        Ok(())
    }

    /// Write a hyperslab starting at `start` with extent `count`.
    ///
    /// Slabs may extend the unlimited dimension.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::DimensionMismatch`] if `start` or `count` has the
    /// wrong rank or `values` does not fill the slab, or
    /// [`IoError::MissingVariable`].
    pub fn put_slab(
        &mut self,
        name: &str,
        start: &[usize],
        count: &[usize],
        values: &[f64],
    ) -> Result<(), IoError> {
        let path = self.path.clone();
        let mut var = self
            .file
            .variable_mut(name)
            .ok_or_else(|| IoError::MissingVariable {
                name: name.to_string(),
                path,
            })?;
        let rank = var.dimensions().len();
        for (what, got) in [("start", start.len()), ("count", count.len())] {
            if got != rank {
                return Err(IoError::DimensionMismatch {
                    name: format!("{name} {what} rank"),
                    expected: rank,
                    got,
                });
            }
        }
        let expected: usize = count.iter().product();
        if values.len() != expected {
            return Err(IoError::DimensionMismatch {
                name: name.to_string(),
                expected,
                got: values.len(),
            });
        }
        if expected == 0 {
            return Ok(());
        }
        var.put_values(values, slab_extents(start, count))?;
        Ok(())
    }

    /// Flush and close the file.
    pub fn close(self) -> Result<(), IoError> {
        debug!(path = %self.path.display(), "closing dataset");
        drop(self.file);
        Ok(())
    }
}
