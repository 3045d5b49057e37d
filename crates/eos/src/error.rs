//! Error types for woa-eos.

/// Error type for all fallible operations in the woa-eos crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EosError {
    /// Returned when salinity and temperature inputs differ in length.
    #[error("salinity has {salinity} samples, temperature has {temperature}")]
    LengthMismatch {
        /// Number of salinity samples.
        salinity: usize,
        /// Number of temperature samples.
        temperature: usize,
    },
}
