//! Error types for woa-io.

use std::path::PathBuf;

use woa_grid::GridError;

/// Error type for all fallible operations in the woa-io crate.
///
/// This enum covers missing files, failures reported by the NetCDF library,
/// absent variables or dimensions, unexpected extents and unknown variable
/// identities.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },

    /// Returned when a required variable is not present in a file.
    #[error("variable '{name}' not found in {}", path.display())]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a required dimension is not present in a file.
    #[error("dimension '{name}' not found in {}", path.display())]
    MissingDimension {
        /// Name of the missing dimension.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a dimension or buffer has an unexpected size.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the dimension.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },

    /// Returned when a variable code or name matches no known climatology field.
    #[error("unknown variable identity: {code:?}")]
    UnknownVariable {
        /// The code, name or file name that failed to resolve.
        code: String,
    },

    /// Wraps an error from the woa-grid crate.
    #[error("grid error: {0}")]
    Grid(#[from] GridError),
}

impl From<netcdf::Error> for IoError {
    fn from(e: netcdf::Error) -> Self {
        IoError::Netcdf {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/tmp/missing.nc"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.nc");
    }

    #[test]
    fn display_netcdf() {
        let err = IoError::Netcdf {
            reason: "bad header".to_string(),
        };
        assert_eq!(err.to_string(), "netcdf error: bad header");
    }

    #[test]
    fn display_missing_variable() {
        let err = IoError::MissingVariable {
            name: "salinity".to_string(),
            path: PathBuf::from("/data/s00an1.nc"),
        };
        assert_eq!(
            err.to_string(),
            "variable 'salinity' not found in /data/s00an1.nc"
        );
    }

    #[test]
    fn display_missing_dimension() {
        let err = IoError::MissingDimension {
            name: "depth".to_string(),
            path: PathBuf::from("/data/t00an1.nc"),
        };
        assert_eq!(
            err.to_string(),
            "dimension 'depth' not found in /data/t00an1.nc"
        );
    }

    #[test]
    fn display_dimension_mismatch() {
        let err = IoError::DimensionMismatch {
            name: "lat".to_string(),
            expected: 180,
            got: 90,
        };
        assert_eq!(
            err.to_string(),
            "dimension 'lat' mismatch: expected 180, got 90"
        );
    }

    #[test]
    fn display_unknown_variable() {
        let err = IoError::UnknownVariable {
            code: "x".to_string(),
        };
        assert_eq!(err.to_string(), "unknown variable identity: \"x\"");
    }

    #[test]
    fn from_netcdf_error() {
        let nc_err = netcdf::Error::Str("test nc error".to_string());
        let err: IoError = nc_err.into();
        assert!(matches!(err, IoError::Netcdf { .. }));
        assert!(err.to_string().contains("test nc error"));
    }

    #[test]
    fn from_grid_error() {
        let err: IoError = GridError::EmptyInput.into();
        assert!(matches!(err, IoError::Grid(GridError::EmptyInput)));
        assert_eq!(err.to_string(), "grid error: input contains no data");
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<IoError>();
    }
}
