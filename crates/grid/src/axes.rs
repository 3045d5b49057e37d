//! Regular cell-centred longitude and latitude axes.

/// Longitude cell centres for `n_lon` columns spanning 0..360 degrees east.
///
/// With `dl = 360 / n_lon` the centres are `0.5*dl, 1.5*dl, ...`.
pub fn longitudes(n_lon: usize) -> Vec<f64> {
    let dl = 360.0 / n_lon as f64;
    (0..n_lon).map(|i| (i as f64 + 0.5) * dl).collect()
}

/// Latitude cell centres for `n_lat` rows starting at the South Pole.
///
/// The spacing is the longitude spacing `360 / n_lon`, so a global 1x1
/// degree grid gives `-89.5, -88.5, ..., 89.5`.
pub fn latitudes(n_lat: usize, n_lon: usize) -> Vec<f64> {
    let dl = 360.0 / n_lon as f64;
    (0..n_lat).map(|j| -90.0 + (j as f64 + 0.5) * dl).collect()
}
