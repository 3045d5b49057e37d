//! Merge configuration.

/// The record dimension introduced by a merge, and its coordinate units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordAxis {
    /// Name of the unlimited dimension and its coordinate variable.
    name: String,
    /// `units` attribute of the coordinate variable.
    units: String,
}

impl Default for RecordAxis {
    fn default() -> Self {
        Self {
            name: "time".to_string(),
            units: "month number".to_string(),
        }
    }
}

impl RecordAxis {
    /// Sets the record dimension name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the coordinate units.
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    /// Record dimension name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Coordinate units.
    pub fn units(&self) -> &str {
        &self.units
    }
}

/// Configuration for [`merge_series`](crate::merge_series).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeConfig {
    record: RecordAxis,
    /// Written into levels no input provides, for variables that declare no
    /// missing value of their own.
    fill_value: Option<f64>,
}

impl MergeConfig {
    /// Sets the record axis.
    pub fn with_record(mut self, record: RecordAxis) -> Self {
        self.record = record;
        self
    }

    /// Sets the fallback fill value.
    pub fn with_fill_value(mut self, fill_value: f64) -> Self {
        self.fill_value = Some(fill_value);
        self
    }

    /// The record axis.
    pub fn record(&self) -> &RecordAxis {
        &self.record
    }

    /// The fallback fill value; NaN unless set.
    pub fn fill_value(&self) -> f64 {
        self.fill_value.unwrap_or(f64::NAN)
    }
}
