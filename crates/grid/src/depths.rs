//! Canonical standard depth levels.

use crate::error::GridError;

/// Number of standard depth levels in the climatology.
pub const MAX_LEVELS: usize = 33;

/// Standard depth levels in metres, surface first.
pub const STANDARD_DEPTHS: [f64; MAX_LEVELS] = [
    0.0, 10.0, 20.0, 30.0, 50.0, 75.0, 100.0, 125.0, 150.0, 200.0, 250.0, 300.0, 400.0, 500.0,
    600.0, 700.0, 800.0, 900.0, 1000.0, 1100.0, 1200.0, 1300.0, 1400.0, 1500.0, 1750.0, 2000.0,
    2500.0, 3000.0, 3500.0, 4000.0, 4500.0, 5000.0, 5500.0,
];

/// The first `nk` standard depths.
///
/// # Errors
///
/// Returns [`GridError::TooManyLevels`] if `nk > MAX_LEVELS`.
pub fn standard_depths(nk: usize) -> Result<&'static [f64], GridError> {
    if nk > MAX_LEVELS {
        return Err(GridError::TooManyLevels {
            requested: nk,
            max: MAX_LEVELS,
        });
    }
    Ok(&STANDARD_DEPTHS[..nk])
}
