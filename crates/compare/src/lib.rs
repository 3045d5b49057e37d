//! # woa-compare
//!
//! Level-by-level comparison of two gridded fields of the same quantity.
//!
//! Each matched level reports the RMS of `a - b` after discarding outliers,
//! the outlier count and the outlier values. Differences never fail a
//! comparison; only incompatible shapes do.
//!
//! ```
//! use ndarray::ArrayD;
//! use woa_compare::compare_fields;
//!
//! let a = ArrayD::from_shape_fn(vec![2, 3, 4], |ix| ix[2] as f64);
//! let results = compare_fields("t", &a, "t", &a).unwrap();
//! assert_eq!(results.len(), 2);
//! assert!(results.iter().all(|r| r.stats.rms == 0.0));
//! assert_eq!(results[1].label_a.to_string(), "t[1]");
//! ```

mod error;
mod plan;
mod result;
mod stats;

use ndarray::{ArrayD, ArrayViewD, Axis};
use tracing::debug;

pub use error::CompareError;
pub use plan::LevelPlan;
pub use result::{ComparisonResult, LevelLabel};
pub use stats::{LevelStats, level_stats};

/// Compare two in-memory fields level by level.
///
/// Levels are paired by [`LevelPlan::new`]. NaN marks missing samples.
///
/// # Errors
///
/// Returns [`CompareError::ShapeIncompatible`] if the shapes cannot be paired.
pub fn compare_fields(
    name_a: &str,
    a: &ArrayD<f64>,
    name_b: &str,
    b: &ArrayD<f64>,
) -> Result<Vec<ComparisonResult>, CompareError> {
    let plan = LevelPlan::new(a.shape(), b.shape())?;
    debug!(levels = plan.len(), "comparing fields");

    plan.levels()
        .iter()
        .map(|index| {
            let level_a = level_values(a.view(), index);
            let level_b = level_values(b.view(), index);
            let stats = level_stats(&level_a, &level_b)?;
            Ok(ComparisonResult::new(name_a, name_b, index, stats))
        })
        .collect()
}

fn level_values(field: ArrayViewD<'_, f64>, index: &[usize]) -> Vec<f64> {
    index
        .iter()
        .fold(field, |view, &i| view.index_axis_move(Axis(0), i))
        .iter()
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_d_labels_and_order() {
        let a = ArrayD::from_shape_fn(vec![2, 3, 2, 2], |ix| (ix[0] * 10 + ix[1]) as f64);
        let b = ArrayD::zeros(vec![2, 2, 2, 2]);
        let results = compare_fields("x", &a, "y", &b).unwrap();
        let labels: Vec<String> = results.iter().map(|r| r.label_a.to_string()).collect();
        assert_eq!(labels, vec!["x[0,0]", "x[0,1]", "x[1,0]", "x[1,1]"]);
        assert_eq!(results[3].stats.rms, 11.0);
        assert_eq!(results[3].label_b.to_string(), "y[1,1]");
    }

    #[test]
    fn shape_error_propagates() {
        let a = ArrayD::<f64>::zeros(vec![3, 4]);
        let b = ArrayD::<f64>::zeros(vec![4, 3]);
        assert!(matches!(
            compare_fields("a", &a, "b", &b),
            Err(CompareError::ShapeIncompatible { .. })
        ));
    }
}
