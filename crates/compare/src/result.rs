//! Labelled comparison results and their report format.

use std::fmt;

use crate::stats::LevelStats;

/// Names one level of one variable: `var`, `var[k]` or `var[n,k]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelLabel {
    /// Variable name.
    pub variable: String,
    /// Leading indices of the level.
    pub index: Vec<usize>,
}

impl LevelLabel {
    /// Label the level at `index` of `variable`.
    pub fn new(variable: impl Into<String>, index: &[usize]) -> Self {
        Self {
            variable: variable.into(),
            index: index.to_vec(),
        }
    }
}

impl fmt::Display for LevelLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.variable)?;
        if self.index.is_empty() {
            return Ok(());
        }
        let indices: Vec<String> = self.index.iter().map(|i| i.to_string()).collect();
        write!(f, "[{}]", indices.join(","))
    }
}

/// Statistics for one matched pair of levels.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    /// Level in the first field.
    pub label_a: LevelLabel,
    /// Level in the second field.
    pub label_b: LevelLabel,
    /// Difference statistics.
    pub stats: LevelStats,
}

impl ComparisonResult {
    /// Pair the same level index of two variables.
    pub fn new(name_a: &str, name_b: &str, index: &[usize], stats: LevelStats) -> Self {
        Self {
            label_a: LevelLabel::new(name_a, index),
            label_b: LevelLabel::new(name_b, index),
            stats,
        }
    }
}

/// Renders `rmsd= 1.23450e-03 var[k] var[k]`, followed by the outlier count
/// and values when there are any.
impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rmsd={:>12} {} {}",
            scientific(self.stats.rms, 5),
            self.label_a,
            self.label_b
        )?;
        if !self.stats.outliers.is_empty() {
            let values: Vec<String> = self
                .stats
                .outliers
                .iter()
                .map(|&v| scientific(v, 5))
                .collect();
            write!(
                f,
                " {} outliers: [{}]",
                self.stats.outliers.len(),
                values.join(" ")
            )?;
        }
        Ok(())
    }
}

/// Scientific notation with a signed, at least two-digit exponent.
fn scientific(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string().to_lowercase();
    }
    let text = format!("{value:.precision$e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}
