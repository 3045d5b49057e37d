//! # woa-io
//!
//! NetCDF access for climatology grids: a small read interface
//! ([`Dataset`]), a write interface that keeps each variable's storage
//! type ([`DatasetWriter`], [`ValueType`]), the closed set of field identities
//! ([`VariableKind`]), grid export and per-variable checksums.

mod checksum;
mod dataset;
mod error;
mod export;
mod value_type;
mod variable;
mod writer;

pub use checksum::{VariableChecksum, checksum_values, variable_checksums};
pub use dataset::{
    Attribute, Dataset, DimensionInfo, FILL_VALUE, MISSING_VALUE, VariableInfo, mask_missing,
    numeric_values,
};
pub use error::IoError;
pub use export::{ExportConfig, read_grid, write_grid};
pub use netcdf::AttributeValue;
pub use value_type::ValueType;
pub use variable::{VariableKind, VariableMetadata};
pub use writer::DatasetWriter;
