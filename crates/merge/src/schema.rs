//! Output schema of a merged series, fixed before any data is written.

use std::path::Path;

use tracing::debug;
use woa_io::{Attribute, Dataset, DimensionInfo, ValueType, VariableInfo};

use crate::config::RecordAxis;
use crate::error::MergeError;

/// Where an axis variable's values are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSource {
    /// The first period file.
    Template,
    /// The annual file, whose version of the axis is longer.
    Annual,
}

/// A non-record output dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDimension {
    /// Dimension name.
    pub name: String,
    /// Output extent.
    pub len: usize,
}

/// A variable of rank 0 or 1, written once.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisVariable {
    /// Variable name.
    pub name: String,
    /// Dimension names.
    pub dims: Vec<String>,
    /// Attributes copied from the template.
    pub attributes: Vec<Attribute>,
    /// Storage type of the template variable.
    pub value_type: ValueType,
    /// Where the values come from.
    pub source: AxisSource,
    /// Values, read while deriving the schema.
    pub values: Vec<f64>,
}

/// A variable of rank 2 or more, written once per period with the record
/// dimension prepended.
#[derive(Debug, Clone, PartialEq)]
pub struct DataVariable {
    /// Variable name.
    pub name: String,
    /// Dimension names, excluding the record dimension.
    pub dims: Vec<String>,
    /// Output extents, excluding the record dimension.
    pub shape: Vec<usize>,
    /// Attributes copied from the template.
    pub attributes: Vec<Attribute>,
    /// Storage type of the template variable.
    pub value_type: ValueType,
    /// Value written into levels no input provides.
    pub fill_value: f64,
}

impl DataVariable {
    /// Output leading (depth) extent.
    pub fn depth(&self) -> usize {
        self.shape[0]
    }

    /// Samples per level.
    pub fn level_size(&self) -> usize {
        self.shape[1..].iter().product()
    }

    /// Check that `info`, read from `path`, can be written into this
    /// variable: same rank, same trailing extents and no more levels.
    pub(crate) fn check_input(&self, info: &VariableInfo, path: &Path) -> Result<(), MergeError> {
        let mismatch = |reason: String| MergeError::SchemaMismatch {
            path: path.to_path_buf(),
            reason,
        };
        if info.rank() != self.shape.len() {
            return Err(mismatch(format!(
                "variable '{}' has rank {}, expected {}",
                self.name,
                info.rank(),
                self.shape.len()
            )));
        }
        if info.shape[1..] != self.shape[1..] {
            return Err(mismatch(format!(
                "variable '{}' has shape {:?}, expected trailing extents {:?}",
                self.name,
                info.shape,
                &self.shape[1..]
            )));
        }
        if info.shape[0] > self.depth() {
            return Err(mismatch(format!(
                "variable '{}' has {} levels, output holds {}",
                self.name,
                info.shape[0],
                self.depth()
            )));
        }
        Ok(())
    }
}

/// The complete layout of a merged series.
///
/// Derived once from the first period file (the template) and, optionally,
/// an annual file. Attributes of later periods are never consulted.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSchema {
    record: RecordAxis,
    dimensions: Vec<OutputDimension>,
    global_attributes: Vec<Attribute>,
    axes: Vec<AxisVariable>,
    data: Vec<DataVariable>,
}

impl SeriesSchema {
    /// Derive the output schema.
    ///
    /// Each template dimension keeps its extent unless the annual file has a
    /// dimension of the same name that is strictly longer. Axis values are
    /// taken from the annual file under the same rule. Every variable keeps
    /// the template's storage type and attributes, and the annual file must
    /// provide each data variable with matching trailing extents.
    ///
    /// # Errors
    ///
    /// - [`MergeError::RecordDimensionExists`] if the template already uses
    ///   the record name.
    /// - [`MergeError::SchemaMismatch`] if a template variable is not
    ///   numeric, or the annual file lacks a data variable or disagrees on
    ///   its shape.
    /// - [`MergeError::Io`] for read failures.
    pub fn derive(
        template: &Dataset,
        annual: Option<&Dataset>,
        record: &RecordAxis,
        fallback_fill: f64,
    ) -> Result<Self, MergeError> {
        if template.has_dimension(record.name()) || template.has_variable(record.name()) {
            return Err(MergeError::RecordDimensionExists {
                name: record.name().to_string(),
                path: template.path().to_path_buf(),
            });
        }

        let annual_dims: Vec<DimensionInfo> = annual.map(Dataset::dimensions).unwrap_or_default();
        let dimensions: Vec<OutputDimension> = template
            .dimensions()
            .into_iter()
            .map(|d| {
                let len = annual_dims
                    .iter()
                    .find(|a| a.name == d.name && a.len > d.len)
                    .map_or(d.len, |a| a.len);
                OutputDimension { name: d.name, len }
            })
            .collect();
        let extent = |name: &str| {
            dimensions
                .iter()
                .find(|d| d.name == name)
                .map_or(0, |d| d.len)
        };

        let mut axes = Vec::new();
        let mut data = Vec::new();
        for var in template.variables()? {
            let value_type = var.value_type.ok_or_else(|| MergeError::SchemaMismatch {
                path: template.path().to_path_buf(),
                reason: format!("variable '{}' is not numeric", var.name),
            })?;
            if var.rank() <= 1 {
                axes.push(axis_variable(template, annual, var, value_type)?);
                continue;
            }

            let shape: Vec<usize> = var.dims.iter().map(|d| extent(d.as_str())).collect();
            let fill_value = var
                .missing_values()
                .first()
                .copied()
                .unwrap_or(fallback_fill);
            let output = DataVariable {
                name: var.name,
                dims: var.dims,
                shape,
                attributes: var.attributes,
                value_type,
                fill_value,
            };
            if let Some(annual) = annual {
                let info = annual
                    .variable(&output.name)
                    .map_err(|_| MergeError::SchemaMismatch {
                        path: annual.path().to_path_buf(),
                        reason: format!("variable '{}' missing from annual file", output.name),
                    })?;
                output.check_input(&info, annual.path())?;
            }
            data.push(output);
        }

        debug!(
            dimensions = dimensions.len(),
            axes = axes.len(),
            data = data.len(),
            "derived series schema"
        );
        Ok(Self {
            record: record.clone(),
            dimensions,
            global_attributes: template.global_attributes()?,
            axes,
            data,
        })
    }

    /// The record axis.
    pub fn record(&self) -> &RecordAxis {
        &self.record
    }

    /// Non-record dimensions in template order.
    pub fn dimensions(&self) -> &[OutputDimension] {
        &self.dimensions
    }

    /// Global attributes copied from the template.
    pub fn global_attributes(&self) -> &[Attribute] {
        &self.global_attributes
    }

    /// Variables written once.
    pub fn axes(&self) -> &[AxisVariable] {
        &self.axes
    }

    /// Variables written per period.
    pub fn data_variables(&self) -> &[DataVariable] {
        &self.data
    }

    /// Output leading extent of the data variable `name`.
    pub fn max_depth(&self, name: &str) -> Option<usize> {
        self.data.iter().find(|v| v.name == name).map(DataVariable::depth)
    }
}

fn axis_variable(
    template: &Dataset,
    annual: Option<&Dataset>,
    var: VariableInfo,
    value_type: ValueType,
) -> Result<AxisVariable, MergeError> {
    let longer_annual = annual.filter(|a| {
        var.rank() == 1
            && a.variable(&var.name)
                .is_ok_and(|info| info.rank() == 1 && info.shape[0] > var.shape[0])
    });
    let (source, values) = match longer_annual {
        Some(a) => (AxisSource::Annual, a.read_all(&var.name)?),
        None => (AxisSource::Template, template.read_all(&var.name)?),
    };
    Ok(AxisVariable {
        name: var.name,
        dims: var.dims,
        attributes: var.attributes,
        value_type,
        source,
        values,
    })
}
