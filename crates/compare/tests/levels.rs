//! Integration tests: level-wise comparison of synthetic climatology fields.

use approx::assert_relative_eq;
use ndarray::{ArrayD, IxDyn};
use woa_compare::{CompareError, LevelPlan, compare_fields, level_stats};

/// A `(nk, 20, 20)` field with land (NaN) in one corner of every level.
fn field(nk: usize) -> ArrayD<f64> {
    ArrayD::from_shape_fn(IxDyn(&[nk, 20, 20]), |ix| {
        if ix[1] < 3 && ix[2] < 3 {
            f64::NAN
        } else {
            25.0 - 2.0 * ix[0] as f64 + 0.1 * ix[1] as f64 - 0.05 * ix[2] as f64
        }
    })
}

#[test]
fn field_compared_with_itself_is_clean() {
    let a = field(6);
    let results = compare_fields("temperature", &a, "temperature", &a).unwrap();
    assert_eq!(results.len(), 6);
    for r in &results {
        assert_eq!(r.stats.rms, 0.0);
        assert_eq!(r.stats.n_outliers(), 0);
        assert_eq!(r.stats.n_valid, 400 - 9);
    }
}

#[test]
fn single_perturbed_cell_is_one_outlier() {
    let a = field(2);
    let mut b = a.clone();
    // Small uniform noise everywhere plus one spike on level 1.
    b.mapv_inplace(|v| v + 0.001);
    b[[1, 10, 10]] += 5.0;

    let results = compare_fields("a", &a, "b", &b).unwrap();
    assert_eq!(results[0].stats.n_outliers(), 0);
    assert_relative_eq!(results[0].stats.rms, 0.001, epsilon = 1e-9);

    let spiked = &results[1].stats;
    assert_eq!(spiked.n_outliers(), 1);
    assert_relative_eq!(spiked.outliers[0], -5.001, epsilon = 1e-9);
    // The inlier RMS excludes the spike entirely.
    assert_relative_eq!(spiked.rms, 0.001, epsilon = 1e-9);
    assert!(spiked.threshold < 5.0);
    assert!(results[1].to_string().contains("1 outliers:"));
}

#[test]
fn deeper_field_truncated_to_common_levels() {
    let shallow = field(3);
    let deep = field(8);
    let results = compare_fields("s", &shallow, "d", &deep).unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[2].label_b.to_string(), "d[2]");
}

#[test]
fn mismatched_rows_rejected() {
    let a = field(2);
    let b = ArrayD::<f64>::zeros(IxDyn(&[2, 19, 20]));
    let err = compare_fields("a", &a, "b", &b).unwrap_err();
    assert_eq!(
        err,
        CompareError::ShapeIncompatible {
            shape_a: vec![2, 20, 20],
            shape_b: vec![2, 19, 20],
        }
    );
}

#[test]
fn slab_driven_comparison_matches_in_memory() {
    let a = field(4);
    let b = a.mapv(|v| v * 1.01);
    let plan = LevelPlan::new(a.shape(), b.shape()).unwrap();

    let in_memory = compare_fields("a", &a, "b", &b).unwrap();
    for (index, expected) in plan.levels().iter().zip(&in_memory) {
        let (start, count) = plan.slab(index);
        assert_eq!(start[0], index[0]);
        let k = start[0];
        let level_a: Vec<f64> = a.index_axis(ndarray::Axis(0), k).iter().copied().collect();
        let level_b: Vec<f64> = b.index_axis(ndarray::Axis(0), k).iter().copied().collect();
        assert_eq!(count[1] * count[2], level_a.len());
        let stats = level_stats(&level_a, &level_b).unwrap();
        assert_eq!(&stats, &expected.stats);
    }
}
