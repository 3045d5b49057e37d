//! Error types for woa-compare.

/// Error type for all fallible operations in the woa-compare crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompareError {
    /// Returned when two fields cannot be matched level by level.
    ///
    /// Fields match when both have rank below 3 and identical shapes, or
    /// both have rank 3 (or both rank 4) with identical trailing two extents.
    #[error("shapes do not match: {shape_a:?} v {shape_b:?}")]
    ShapeIncompatible {
        /// Shape of the first field.
        shape_a: Vec<usize>,
        /// Shape of the second field.
        shape_b: Vec<usize>,
    },

    /// Returned when two levels handed to the statistics have different sizes.
    #[error("level sizes differ: {len_a} v {len_b}")]
    LengthMismatch {
        /// Number of samples in the first level.
        len_a: usize,
        /// Number of samples in the second level.
        len_b: usize,
    },
}
