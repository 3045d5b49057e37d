//! Second phase of a merge: populate the output one period at a time.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use woa_io::{Attribute, Dataset, DatasetWriter};

use crate::error::MergeError;
use crate::schema::SeriesSchema;
use crate::splice::{SpliceRanges, splice_ranges};

/// How one variable of one period was assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpliceRecord {
    /// Zero-based record index.
    pub record: usize,
    /// Period file.
    pub path: PathBuf,
    /// Data variable name.
    pub variable: String,
    /// Level sources.
    pub ranges: SpliceRanges,
}

/// Summary of a finished merge.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Output file.
    pub path: PathBuf,
    /// Number of records written.
    pub n_records: usize,
    /// Output leading extent of each data variable.
    pub depths: Vec<(String, usize)>,
    /// Level sources for every period and variable, in write order.
    pub splices: Vec<SpliceRecord>,
}

/// Writes a merged series whose layout is already fixed.
///
/// Only a complete [`SeriesSchema`] can start a builder, so the output
/// dimensions and attributes are settled before the first period is written.
#[derive(Debug)]
pub struct SeriesBuilder {
    writer: DatasetWriter,
    schema: SeriesSchema,
    n_records: usize,
    splices: Vec<SpliceRecord>,
}

impl SeriesBuilder {
    /// Create the output file at `path` and write everything that does not
    /// vary by period: dimensions, attributes, axes and the record
    /// coordinate variable.
    ///
    /// Axis and data variables are stored with the template's types, so
    /// period values are copied exactly.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::Io`] if the file cannot be written.
    pub fn create(path: &Path, schema: SeriesSchema) -> Result<Self, MergeError> {
        let mut writer = DatasetWriter::create(path)?;
        let record = schema.record().name().to_string();

        writer.add_unlimited_dimension(&record)?;
        for dim in schema.dimensions() {
            writer.add_dimension(&dim.name, dim.len)?;
        }
        for attr in schema.global_attributes() {
            writer.add_attribute(&attr.name, attr.value.clone())?;
        }

        writer.add_variable(
            &record,
            &[record.as_str()],
            &[Attribute::new("units", schema.record().units())],
        )?;
        for axis in schema.axes() {
            let dims: Vec<&str> = axis.dims.iter().map(String::as_str).collect();
            writer.add_variable_of(&axis.name, axis.value_type, &dims, &axis.attributes)?;
        }
        for var in schema.data_variables() {
            let dims: Vec<&str> = std::iter::once(record.as_str())
                .chain(var.dims.iter().map(String::as_str))
                .collect();
            writer.add_variable_of(&var.name, var.value_type, &dims, &var.attributes)?;
        }

        for axis in schema.axes() {
            if axis.dims.is_empty() {
                writer.put_values(&axis.name, &axis.values)?;
            } else {
                writer.put_slab(&axis.name, &[0], &[axis.values.len()], &axis.values)?;
            }
        }

        debug!(path = %path.display(), "series layout written");
        Ok(Self {
            writer,
            schema,
            n_records: 0,
            splices: Vec::new(),
        })
    }

    /// The schema being written.
    pub fn schema(&self) -> &SeriesSchema {
        &self.schema
    }

    /// Number of periods written so far.
    pub fn n_records(&self) -> usize {
        self.n_records
    }

    /// Append `period` as the next record.
    ///
    /// For each data variable the period's own levels are written first.
    /// Deeper levels come from `annual` when it has them, and any levels
    /// still missing are set to the variable's fill value. The record
    /// coordinate is the 1-based period number.
    ///
    /// Every variable is checked before anything is written for the period.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::SchemaMismatch`] if the period (or annual file)
    /// lacks a data variable or has incompatible extents, or
    /// [`MergeError::Io`] on read and write failures.
    pub fn write_period(
        &mut self,
        period: &Dataset,
        annual: Option<&Dataset>,
    ) -> Result<&[SpliceRecord], MergeError> {
        let n = self.n_records;

        let mut plans = Vec::with_capacity(self.schema.data_variables().len());
        for var in self.schema.data_variables() {
            let info = period
                .variable(&var.name)
                .map_err(|_| MergeError::SchemaMismatch {
                    path: period.path().to_path_buf(),
                    reason: format!("variable '{}' missing", var.name),
                })?;
            var.check_input(&info, period.path())?;
            let annual_levels = match annual {
                Some(a) => {
                    let annual_info = a.variable(&var.name)?;
                    var.check_input(&annual_info, a.path())?;
                    Some(annual_info.shape[0])
                }
                None => None,
            };
            plans.push(splice_ranges(info.shape[0], annual_levels, var.depth()));
        }

        let first_new = self.splices.len();
        for (var, ranges) in self.schema.data_variables().iter().zip(plans) {
            let trailing = &var.shape[1..];
            let level_size = var.level_size();

            if !ranges.own.is_empty() {
                let values = period.read_all(&var.name)?;
                let (start, count) = record_slab(n, &ranges.own, trailing);
                self.writer.put_slab(&var.name, &start, &count, &values)?;
            }
            if let (Some(a), false) = (annual, ranges.annual.is_empty()) {
                let (start, count) = level_slab(&ranges.annual, trailing);
                let values = a.read_slab(&var.name, &start, &count)?;
                let (start, count) = record_slab(n, &ranges.annual, trailing);
                self.writer.put_slab(&var.name, &start, &count, &values)?;
            }
            if !ranges.fill.is_empty() {
                let values = vec![var.fill_value; ranges.fill.len() * level_size];
                let (start, count) = record_slab(n, &ranges.fill, trailing);
                self.writer.put_slab(&var.name, &start, &count, &values)?;
            }

            debug!(
                record = n,
                variable = %var.name,
                own = ranges.own.len(),
                annual = ranges.annual.len(),
                fill = ranges.fill.len(),
                "spliced levels"
            );
            self.splices.push(SpliceRecord {
                record: n,
                path: period.path().to_path_buf(),
                variable: var.name.clone(),
                ranges,
            });
        }

        let record = self.schema.record().name().to_string();
        self.writer
            .put_slab(&record, &[n], &[1], &[(n + 1) as f64])?;
        self.n_records += 1;
        info!(record = n + 1, path = %period.path().display(), "merged period");
        Ok(&self.splices[first_new..])
    }

    /// Close the output and summarise what was written.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::Io`] if the file cannot be closed.
    pub fn finish(self) -> Result<Series, MergeError> {
        let path = self.writer.path().to_path_buf();
        self.writer.close()?;
        Ok(Series {
            path,
            n_records: self.n_records,
            depths: self
                .schema
                .data_variables()
                .iter()
                .map(|v| (v.name.clone(), v.depth()))
                .collect(),
            splices: self.splices,
        })
    }
}

/// Slab of output record `n` covering `levels`.
fn record_slab(
    n: usize,
    levels: &std::ops::Range<usize>,
    trailing: &[usize],
) -> (Vec<usize>, Vec<usize>) {
    let (mut start, mut count) = level_slab(levels, trailing);
    start.insert(0, n);
    count.insert(0, 1);
    (start, count)
}

/// Slab of an input variable covering `levels`.
fn level_slab(levels: &std::ops::Range<usize>, trailing: &[usize]) -> (Vec<usize>, Vec<usize>) {
    let start = std::iter::once(levels.start)
        .chain(trailing.iter().map(|_| 0))
        .collect();
    let count = std::iter::once(levels.len())
        .chain(trailing.iter().copied())
        .collect();
    (start, count)
}
