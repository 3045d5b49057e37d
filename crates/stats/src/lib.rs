//! Statistical helper functions over masked data.
//!
//! Missing samples are represented as NaN. Every function here skips
//! non-finite values instead of propagating them.

/// Number of finite values.
pub fn count_finite(data: &[f64]) -> usize {
    data.iter().filter(|v| v.is_finite()).count()
}

/// Mean of the squared finite values. Returns `None` if there are none.
pub fn mean_square(data: &[f64]) -> Option<f64> {
    let (sum, n) = data
        .iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(s, n), &v| (s + v * v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Root mean square of the finite values. Returns `None` if there are none.
pub fn rms(data: &[f64]) -> Option<f64> {
    mean_square(data).map(f64::sqrt)
}

/// Smallest and largest finite values, or `None` if there are none.
pub fn finite_min_max(data: &[f64]) -> Option<(f64, f64)> {
    data.iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// `max - min` over the finite values, or `None` if there are none.
pub fn finite_range(data: &[f64]) -> Option<f64> {
    finite_min_max(data).map(|(lo, hi)| hi - lo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_count_finite() {
        assert_eq!(count_finite(&[1.0, f64::NAN, f64::INFINITY, -2.0]), 2);
        assert_eq!(count_finite(&[]), 0);
    }

    #[test]
    fn test_mean_square() {
        // (1 + 4 + 9 + 16) / 4 = 7.5
        assert_relative_eq!(mean_square(&[1.0, -2.0, 3.0, -4.0]).unwrap(), 7.5);
        assert!(mean_square(&[]).is_none());
    }

    #[test]
    fn test_rms() {
        assert_relative_eq!(rms(&[3.0, -3.0, f64::NAN]).unwrap(), 3.0);
        assert_relative_eq!(rms(&[0.0; 10]).unwrap(), 0.0);
        assert!(rms(&[f64::NAN, f64::NAN]).is_none());
    }

    #[test]
    fn test_finite_range() {
        assert_relative_eq!(
            finite_range(&[5.0, f64::NAN, -1.5, 2.0]).unwrap(),
            6.5
        );
        assert_relative_eq!(finite_range(&[4.0]).unwrap(), 0.0);
        assert!(finite_range(&[f64::NAN]).is_none());
    }

    #[test]
    fn test_finite_min_max() {
        assert_eq!(
            finite_min_max(&[3.0, f64::NEG_INFINITY, 1.0, 2.0]),
            Some((1.0, 3.0))
        );
    }
}
