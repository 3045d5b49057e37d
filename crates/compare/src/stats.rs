//! Outlier-robust RMS difference of one level.

use crate::error::CompareError;

/// Multiple of the raw RMS difference beyond which a sample is an outlier.
const OUTLIER_FACTOR: f64 = 10.0;

/// Fraction of the value range used as the smallest allowed threshold.
const RANGE_FLOOR: f64 = 1.0e-6;

/// Statistics of `a - b` over one level.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelStats {
    /// RMS of the differences that are not outliers. NaN when the level has
    /// no valid samples.
    pub rms: f64,
    /// The outlier threshold applied to `|a - b|`.
    pub threshold: f64,
    /// Number of samples where both inputs are finite.
    pub n_valid: usize,
    /// Differences whose magnitude exceeds the threshold, in sample order.
    pub outliers: Vec<f64>,
}

impl LevelStats {
    /// Number of outliers.
    pub fn n_outliers(&self) -> usize {
        self.outliers.len()
    }
}

/// Compare two levels sample by sample.
///
/// Samples where either input is not finite are excluded. With
/// `d = a - b`, the threshold is `10 * sqrt(mean(d^2))`, raised to
/// `1e-6 * (max(a) - min(a))` if that is larger. Differences with
/// `|d| > threshold` are outliers; the reported RMS is taken over the rest.
///
/// # Errors
///
/// Returns [`CompareError::LengthMismatch`] if `a` and `b` differ in length.
pub fn level_stats(a: &[f64], b: &[f64]) -> Result<LevelStats, CompareError> {
    if a.len() != b.len() {
        return Err(CompareError::LengthMismatch {
            len_a: a.len(),
            len_b: b.len(),
        });
    }

    let diffs: Vec<f64> = a
        .iter()
        .zip(b)
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(x, y)| x - y)
        .collect();

    let Some(raw_rms) = woa_stats::rms(&diffs) else {
        return Ok(LevelStats {
            rms: f64::NAN,
            threshold: f64::NAN,
            n_valid: 0,
            outliers: Vec::new(),
        });
    };

    let range = woa_stats::finite_range(a).unwrap_or(0.0);
    let threshold = (OUTLIER_FACTOR * raw_rms).max(RANGE_FLOOR * range);

    let (outliers, inliers): (Vec<f64>, Vec<f64>) =
        diffs.iter().partition(|d| d.abs() > threshold);
    let rms = woa_stats::rms(&inliers).unwrap_or(f64::NAN);

    Ok(LevelStats {
        rms,
        threshold,
        n_valid: diffs.len(),
        outliers,
    })
}
