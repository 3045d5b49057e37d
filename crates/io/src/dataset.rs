//! Read access to a NetCDF container.

use std::path::{Path, PathBuf};

use ndarray::{ArrayD, IxDyn};
use netcdf::AttributeValue;
use tracing::debug;

use crate::error::IoError;
use crate::value_type::ValueType;

/// Name of the CF fill-value attribute.
pub const FILL_VALUE: &str = "_FillValue";

/// Name of the legacy missing-value attribute.
pub const MISSING_VALUE: &str = "missing_value";

/// A named dimension and its current extent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionInfo {
    /// Dimension name.
    pub name: String,
    /// Current length. For an unlimited dimension this is the number of
    /// records written so far.
    pub len: usize,
    /// Whether the dimension is the unlimited (record) dimension.
    pub unlimited: bool,
}

/// A named attribute value, global or attached to a variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Attribute name.
    pub name: String,
    /// Attribute value as stored in the file.
    pub value: AttributeValue,
}

impl Attribute {
    /// Create an attribute from anything convertible to an [`AttributeValue`].
    pub fn new(name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The value as a string, if it is textual.
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            AttributeValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Shape and attributes of one variable.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableInfo {
    /// Variable name.
    pub name: String,
    /// Dimension names, slowest varying first.
    pub dims: Vec<String>,
    /// Extent of each dimension.
    pub shape: Vec<usize>,
    /// Attributes in file order.
    pub attributes: Vec<Attribute>,
    /// Storage type; `None` for text and user-defined types.
    pub value_type: Option<ValueType>,
}

impl VariableInfo {
    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Whether this is a one-dimensional coordinate-style variable.
    pub fn is_axis(&self) -> bool {
        self.rank() == 1
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.shape.iter().product()
    }

    /// Whether the variable holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| &a.value)
    }

    /// Numeric values of the `_FillValue` and `missing_value` attributes.
    pub fn missing_values(&self) -> Vec<f64> {
        [FILL_VALUE, MISSING_VALUE]
            .iter()
            .filter_map(|name| self.attribute(name))
            .flat_map(numeric_values)
            .collect()
    }
}

/// Numeric contents of an attribute value; empty for text.
pub fn numeric_values(value: &AttributeValue) -> Vec<f64> {
    match value {
        AttributeValue::Uchar(v) => vec![f64::from(*v)],
        AttributeValue::Schar(v) => vec![f64::from(*v)],
        AttributeValue::Ushort(v) => vec![f64::from(*v)],
        AttributeValue::Short(v) => vec![f64::from(*v)],
        AttributeValue::Uint(v) => vec![f64::from(*v)],
        AttributeValue::Int(v) => vec![f64::from(*v)],
        AttributeValue::Ulonglong(v) => vec![*v as f64],
        AttributeValue::Longlong(v) => vec![*v as f64],
        AttributeValue::Float(v) => vec![f64::from(*v)],
        AttributeValue::Double(v) => vec![*v],
        AttributeValue::Uchars(v) => v.iter().map(|&x| f64::from(x)).collect(),
        AttributeValue::Schars(v) => v.iter().map(|&x| f64::from(x)).collect(),
        AttributeValue::Ushorts(v) => v.iter().map(|&x| f64::from(x)).collect(),
        AttributeValue::Shorts(v) => v.iter().map(|&x| f64::from(x)).collect(),
        AttributeValue::Uints(v) => v.iter().map(|&x| f64::from(x)).collect(),
        AttributeValue::Ints(v) => v.iter().map(|&x| f64::from(x)).collect(),
        AttributeValue::Ulonglongs(v) => v.iter().map(|&x| x as f64).collect(),
        AttributeValue::Longlongs(v) => v.iter().map(|&x| x as f64).collect(),
        AttributeValue::Floats(v) => v.iter().map(|&x| f64::from(x)).collect(),
        AttributeValue::Doubles(v) => v.clone(),
        _ => Vec::new(),
    }
}

/// Replace every value equal to one of `missing` with NaN.
///
/// Values stored as `f32` are compared at `f32` precision so a sentinel
/// declared in double precision still matches.
pub fn mask_missing(values: &mut [f64], missing: &[f64]) {
    if missing.is_empty() {
        return;
    }
    for v in values.iter_mut() {
        if missing
            .iter()
            .any(|&m| *v == m || (*v as f32) == (m as f32))
        {
            *v = f64::NAN;
        }
    }
}

/// Build per-dimension extents from a start corner and counts.
pub(crate) fn slab_extents(start: &[usize], count: &[usize]) -> Vec<netcdf::Extent> {
    start
        .iter()
        .zip(count)
        .map(|(&s, &c)| (s..s + c).into())
        .collect()
}

/// An open NetCDF file, read-only.
///
/// All numeric reads are widened to `f64`.
pub struct Dataset {
    file: netcdf::File,
    path: PathBuf,
}

impl std::fmt::Debug for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dataset").field("path", &self.path).finish()
    }
}

impl Dataset {
    /// Open the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::FileNotFound`] if the path does not exist, or
    /// [`IoError::Netcdf`] if the file cannot be opened as NetCDF.
    pub fn open(path: &Path) -> Result<Self, IoError> {
        if !path.exists() {
            return Err(IoError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = netcdf::open(path)?;
        debug!(path = %path.display(), "opened dataset");
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Path the dataset was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All dimensions in file order.
    pub fn dimensions(&self) -> Vec<DimensionInfo> {
        self.file
            .dimensions()
            .map(|d| DimensionInfo {
                name: d.name(),
                len: d.len(),
                unlimited: d.is_unlimited(),
            })
            .collect()
    }

    /// Whether a dimension called `name` exists.
    pub fn has_dimension(&self, name: &str) -> bool {
        self.file.dimension(name).is_some()
    }

    /// Length of the dimension called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::MissingDimension`] if there is no such dimension.
    pub fn dimension_len(&self, name: &str) -> Result<usize, IoError> {
        self.file
            .dimension(name)
            .map(|d| d.len())
            .ok_or_else(|| IoError::MissingDimension {
                name: name.to_string(),
                path: self.path.clone(),
            })
    }

    /// Global attributes in file order.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Netcdf`] if an attribute value cannot be read.
    pub fn global_attributes(&self) -> Result<Vec<Attribute>, IoError> {
        self.file
            .attributes()
            .map(|a| {
                Ok(Attribute {
                    name: a.name().to_string(),
                    value: a.value()?,
                })
            })
            .collect()
    }

    /// Description of every variable in file order.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Netcdf`] if an attribute value cannot be read.
    pub fn variables(&self) -> Result<Vec<VariableInfo>, IoError> {
        self.file.variables().map(|v| describe(&v)).collect()
    }

    /// Whether a variable called `name` exists.
    pub fn has_variable(&self, name: &str) -> bool {
        self.file.variable(name).is_some()
    }

    /// Description of the variable called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::MissingVariable`] if there is no such variable.
    pub fn variable(&self, name: &str) -> Result<VariableInfo, IoError> {
        describe(&self.nc_variable(name)?)
    }

    /// Every value of `name`, flattened in row-major order, without masking.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::MissingVariable`] or [`IoError::Netcdf`].
    pub fn read_all(&self, name: &str) -> Result<Vec<f64>, IoError> {
        Ok(self.nc_variable(name)?.get_values::<f64, _>(..)?)
    }

    /// A hyperslab of `name` starting at `start` with extent `count`, without
    /// masking.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::DimensionMismatch`] if `start` or `count` has the
    /// wrong rank or the slab exceeds the variable, [`IoError::MissingVariable`]
    /// or [`IoError::Netcdf`].
    pub fn read_slab(
        &self,
        name: &str,
        start: &[usize],
        count: &[usize],
    ) -> Result<Vec<f64>, IoError> {
        let info = self.variable(name)?;
        check_slab(&info, start, count)?;
        let var = self.nc_variable(name)?;
        Ok(var.get_values::<f64, _>(slab_extents(start, count))?)
    }

    /// The whole of `name` as an array, with missing values replaced by NaN.
    ///
    /// # Errors
    ///
    /// Same as [`Dataset::read_all`].
    pub fn read_field(&self, name: &str) -> Result<ArrayD<f64>, IoError> {
        let info = self.variable(name)?;
        let mut values = self.read_all(name)?;
        mask_missing(&mut values, &info.missing_values());
        to_array(&info.shape, values)
    }

    /// A hyperslab of `name` as an array of shape `count`, with missing
    /// values replaced by NaN.
    ///
    /// # Errors
    ///
    /// Same as [`Dataset::read_slab`].
    pub fn read_masked_slab(
        &self,
        name: &str,
        start: &[usize],
        count: &[usize],
    ) -> Result<ArrayD<f64>, IoError> {
        let info = self.variable(name)?;
        let mut values = self.read_slab(name, start, count)?;
        mask_missing(&mut values, &info.missing_values());
        to_array(count, values)
    }

    fn nc_variable(&self, name: &str) -> Result<netcdf::Variable<'_>, IoError> {
        self.file
            .variable(name)
            .ok_or_else(|| IoError::MissingVariable {
                name: name.to_string(),
                path: self.path.clone(),
            })
    }
}

fn describe(var: &netcdf::Variable<'_>) -> Result<VariableInfo, IoError> {
    let dims = var.dimensions();
    let attributes = var
        .attributes()
        .map(|a| {
            Ok(Attribute {
                name: a.name().to_string(),
                value: a.value()?,
            })
        })
        .collect::<Result<Vec<_>, IoError>>()?;
    Ok(VariableInfo {
        name: var.name(),
        dims: dims.iter().map(|d| d.name()).collect(),
        shape: dims.iter().map(|d| d.len()).collect(),
        attributes,
        value_type: ValueType::from_nc(&var.vartype()),
    })
}

fn check_slab(info: &VariableInfo, start: &[usize], count: &[usize]) -> Result<(), IoError> {
    for (what, got) in [("start", start.len()), ("count", count.len())] {
        if got != info.rank() {
            return Err(IoError::DimensionMismatch {
                name: format!("{} {what} rank", info.name),
                expected: info.rank(),
                got,
            });
        }
    }
    for ((dim, &len), (&s, &c)) in info
        .dims
        .iter()
        .zip(&info.shape)
        .zip(start.iter().zip(count))
    {
        if s + c > len {
            return Err(IoError::DimensionMismatch {
                name: dim.clone(),
                expected: len,
                got: s + c,
            });
        }
    }
    Ok(())
}

fn to_array(shape: &[usize], values: Vec<f64>) -> Result<ArrayD<f64>, IoError> {
    let got = values.len();
    ArrayD::from_shape_vec(IxDyn(shape), values).map_err(|_| IoError::DimensionMismatch {
        name: "values".to_string(),
        expected: shape.iter().product(),
        got,
    })
}
