//! Error types for woa-grid.

/// Error type for all fallible operations in the woa-grid crate.
///
/// Most variants describe structurally invalid ASCII input. Climatology files
/// are static, so none of these conditions are retried.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Returned when a record is shorter than the fixed line width or carries
    /// data past it.
    #[error("malformed line {line}: {reason}")]
    MalformedLine {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the record.
        reason: String,
    },

    /// Returned when a fixed-width field does not parse as a number.
    #[error("invalid field at line {line}, column {column}: {text:?}")]
    InvalidField {
        /// 1-based line number.
        line: usize,
        /// 1-based column of the first character of the field.
        column: usize,
        /// Raw field text.
        text: String,
    },

    /// Returned when the field count is not a whole number of horizontal planes.
    #[error("{fields} fields read is not a whole number of {plane}-point levels")]
    PartialLevel {
        /// Total number of fields decoded.
        fields: usize,
        /// Points per horizontal level (`n_lon * n_lat`).
        plane: usize,
    },

    /// Returned when the input holds more fields than the layout allows.
    #[error("input exceeds capacity of {capacity} fields")]
    CapacityExceeded {
        /// Maximum number of fields for the layout.
        capacity: usize,
    },

    /// Returned when the input contains no fields at all.
    #[error("input contains no data")]
    EmptyInput,

    /// Returned when more depth levels are requested than the standard table holds.
    #[error("{requested} depth levels requested, at most {max} are defined")]
    TooManyLevels {
        /// Number of levels requested.
        requested: usize,
        /// Size of the standard depth table.
        max: usize,
    },

    /// Returned when a depth axis value is not the standard depth at that index.
    #[error("depth {depth} at level {index} is not a standard depth")]
    NonStandardDepth {
        /// Level index.
        index: usize,
        /// Offending depth value in metres.
        depth: f64,
    },

    /// Returned when an axis or array extent has an unexpected size.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the dimension.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },

    /// Returned when a value cannot be written into a fixed-width field.
    #[error("value {value} does not fit in {width} characters")]
    FieldOverflow {
        /// Value being encoded.
        value: f64,
        /// Field width in characters.
        width: usize,
    },

    /// Returned when a [`GridLayout`](crate::GridLayout) is internally inconsistent.
    #[error("invalid layout: {reason}")]
    InvalidLayout {
        /// Description of the inconsistency.
        reason: String,
    },

    /// Wraps an I/O failure while reading or writing text.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_malformed_line() {
        let err = GridError::MalformedLine {
            line: 12,
            reason: "expected 80 columns, found 72".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed line 12: expected 80 columns, found 72"
        );
    }

    #[test]
    fn display_invalid_field() {
        let err = GridError::InvalidField {
            line: 3,
            column: 17,
            text: "  1.2x34".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid field at line 3, column 17: \"  1.2x34\""
        );
    }

    #[test]
    fn display_partial_level() {
        let err = GridError::PartialLevel {
            fields: 64810,
            plane: 64800,
        };
        assert_eq!(
            err.to_string(),
            "64810 fields read is not a whole number of 64800-point levels"
        );
    }

    #[test]
    fn display_too_many_levels() {
        let err = GridError::TooManyLevels {
            requested: 34,
            max: 33,
        };
        assert_eq!(
            err.to_string(),
            "34 depth levels requested, at most 33 are defined"
        );
    }

    #[test]
    fn from_io_error() {
        let io = std::io::Error::other("disk gone");
        let err: GridError = io.into();
        assert!(matches!(err, GridError::Io(_)));
        assert!(err.to_string().contains("disk gone"));
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<GridError>();
    }
}
