//! Per-variable data checksums.

use std::fmt;
use std::path::Path;

use crate::dataset::Dataset;
use crate::error::IoError;

/// CRC-32 of one variable's values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableChecksum {
    /// Variable name.
    pub name: String,
    /// CRC-32 over the values as little-endian `f64` bytes.
    pub crc32: u32,
}

impl fmt::Display for VariableChecksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.crc32)
    }
}

/// Checksum every variable in `path`, in file order.
///
/// Values are widened to `f64` and hashed as little-endian bytes, so the
/// digest does not depend on host byte order or on-disk storage type.
///
/// # Errors
///
/// Returns the errors of [`Dataset::open`] and [`Dataset::read_all`].
pub fn variable_checksums(path: &Path) -> Result<Vec<VariableChecksum>, IoError> {
    let dataset = Dataset::open(path)?;
    dataset
        .variables()?
        .into_iter()
        .map(|info| {
            let values = dataset.read_all(&info.name)?;
            Ok(VariableChecksum {
                crc32: checksum_values(&values),
                name: info.name,
            })
        })
        .collect()
}

/// CRC-32 of `values` as little-endian `f64` bytes.
pub fn checksum_values(values: &[f64]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    for v in values {
        hasher.update(&v.to_le_bytes());
    }
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_checksum() {
        assert_eq!(checksum_values(&[]), 0);
    }

    #[test]
    fn checksum_depends_on_order() {
        let a = checksum_values(&[1.0, 2.0]);
        let b = checksum_values(&[2.0, 1.0]);
        assert_ne!(a, b);
        assert_eq!(a, checksum_values(&[1.0, 2.0]));
    }

    #[test]
    fn checksum_is_crc32_of_le_f64_bytes() {
        let bytes: Vec<u8> = [1.5_f64, -99.9999]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        assert_eq!(checksum_values(&[1.5, -99.9999]), crc32fast::hash(&bytes));
    }

    #[test]
    fn display_is_zero_padded_hex() {
        let c = VariableChecksum {
            name: "lon".to_string(),
            crc32: 0xab,
        };
        assert_eq!(c.to_string(), "000000ab");
    }
}
