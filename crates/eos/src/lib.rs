//! # woa-eos
//!
//! EOS-80 potential temperature of seawater (Fofonoff and Millard, 1983).
//!
//! Temperatures in and out are ITS-90; the algorithms use IPTS-68
//! internally. Salinity is practical salinity, pressure is in dbar.
//!
//! ```
//! use woa_eos::potential_temperature;
//!
//! let theta = potential_temperature(35.0, 10.0, 0.0, 0.0);
//! assert!((theta - 10.0).abs() < 1e-12);
//! ```

mod error;

pub use error::EosError;

/// Ratio between IPTS-68 and ITS-90 temperatures.
const T68_PER_T90: f64 = 1.00024;

fn t68(t90: f64) -> f64 {
    t90 * T68_PER_T90
}

fn t90(t68: f64) -> f64 {
    t68 / T68_PER_T90
}

/// Adiabatic temperature gradient in degC per dbar.
///
/// `t90` is in-situ temperature on ITS-90, `p` is pressure in dbar.
pub fn adiabatic_lapse_rate(s: f64, t90: f64, p: f64) -> f64 {
    const A: [f64; 4] = [3.5803e-5, 8.5258e-6, -6.836e-8, 6.6228e-10];
    const B: [f64; 2] = [1.8932e-6, -4.2393e-8];
    const C: [f64; 4] = [1.8741e-8, -6.7795e-10, 8.733e-12, -5.4481e-14];
    const D: [f64; 2] = [-1.1351e-10, 2.7759e-12];
    const E: [f64; 3] = [-4.6206e-13, 1.8676e-14, -2.1687e-16];

    let t = t68(t90);
    let ds = s - 35.0;
    A[0] + (A[1] + (A[2] + A[3] * t) * t) * t
        + (B[0] + B[1] * t) * ds
        + ((C[0] + (C[1] + (C[2] + C[3] * t) * t) * t) + (D[0] + D[1] * t) * ds) * p
        + (E[0] + (E[1] + E[2] * t) * t) * p * p
}

/// Potential temperature (ITS-90) of a parcel moved adiabatically from `p`
/// to the reference pressure `p_ref`.
///
/// Integrates the adiabatic lapse rate with a fourth-order Runge-Kutta
/// step. NaN inputs give NaN.
pub fn potential_temperature(s: f64, t90_in_situ: f64, p: f64, p_ref: f64) -> f64 {
    let sqrt2 = std::f64::consts::SQRT_2;
    let dp = p_ref - p;

    let mut dth = dp * adiabatic_lapse_rate(s, t90_in_situ, p);
    let mut th = t68(t90_in_situ) + 0.5 * dth;
    let mut q = dth;

    dth = dp * adiabatic_lapse_rate(s, t90(th), p + 0.5 * dp);
    th += (1.0 - 1.0 / sqrt2) * (dth - q);
    q = (2.0 - sqrt2) * dth + (-2.0 + 3.0 / sqrt2) * q;

    dth = dp * adiabatic_lapse_rate(s, t90(th), p + 0.5 * dp);
    th += (1.0 + 1.0 / sqrt2) * (dth - q);
    q = (2.0 + sqrt2) * dth + (-2.0 - 3.0 / sqrt2) * q;

    dth = dp * adiabatic_lapse_rate(s, t90(th), p + dp);
    t90(th + (dth - 2.0 * q) / 6.0)
}

/// Potential temperature of every sample of one level at pressure `p`.
///
/// # Errors
///
/// Returns [`EosError::LengthMismatch`] if the inputs differ in length.
pub fn potential_temperature_level(
    salinity: &[f64],
    temperature: &[f64],
    p: f64,
    p_ref: f64,
) -> Result<Vec<f64>, EosError> {
    if salinity.len() != temperature.len() {
        return Err(EosError::LengthMismatch {
            salinity: salinity.len(),
            temperature: temperature.len(),
        });
    }
    Ok(salinity
        .iter()
        .zip(temperature)
        .map(|(&s, &t)| potential_temperature(s, t, p, p_ref))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lapse_rate_check_value() {
        // UNESCO 1983 check value, stated for IPTS-68 input.
        let gamma = adiabatic_lapse_rate(40.0, t90(40.0), 10000.0);
        assert_relative_eq!(gamma, 3.255976e-4, epsilon = 1e-10);
    }

    #[test]
    fn potential_temperature_check_value() {
        let theta = potential_temperature(40.0, t90(40.0), 10000.0, 0.0);
        assert_relative_eq!(t68(theta), 36.89073, epsilon = 1e-5);
    }

    #[test]
    fn surface_is_identity() {
        assert_relative_eq!(potential_temperature(34.5, 3.2, 0.0, 0.0), 3.2, epsilon = 1e-12);
    }

    #[test]
    fn deep_parcel_cools_when_raised() {
        let theta = potential_temperature(34.7, 2.0, 4000.0, 0.0);
        assert!(theta < 2.0);
        assert!(theta > 1.5);
    }

    #[test]
    fn nan_propagates() {
        assert!(potential_temperature(f64::NAN, 10.0, 100.0, 0.0).is_nan());
        assert!(potential_temperature(35.0, f64::NAN, 100.0, 0.0).is_nan());
    }

    #[test]
    fn level_conversion() {
        let out = potential_temperature_level(&[35.0, 35.0], &[10.0, f64::NAN], 0.0, 0.0).unwrap();
        assert_relative_eq!(out[0], 10.0, epsilon = 1e-12);
        assert!(out[1].is_nan());

        let err = potential_temperature_level(&[35.0], &[], 0.0, 0.0).unwrap_err();
        assert!(matches!(
            err,
            EosError::LengthMismatch {
                salinity: 1,
                temperature: 0
            }
        ));
    }
}
