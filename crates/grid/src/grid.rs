//! Dense `(depth, lat, lon)` grid with its coordinate axes.

use ndarray::{Array3, ArrayView2, Axis};

use crate::axes;
use crate::depths::standard_depths;
use crate::error::GridError;

/// A 3-D climatology field on standard depth levels.
///
/// The array is indexed `(depth, lat, lon)`. Axis lengths always equal the
/// matching array extents and the depth axis is always a prefix of
/// [`STANDARD_DEPTHS`](crate::STANDARD_DEPTHS). A `Grid` is immutable once
/// built.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    data: Array3<f64>,
    lon: Vec<f64>,
    lat: Vec<f64>,
    depth: Vec<f64>,
}

impl Grid {
    /// Create a grid from data and explicit coordinate axes.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DimensionMismatch`] if an axis length differs from
    /// the array extent, [`GridError::TooManyLevels`] if there are more levels
    /// than standard depths, or [`GridError::NonStandardDepth`] if the depth
    /// axis deviates from the standard table.
    pub fn new(
        data: Array3<f64>,
        lon: Vec<f64>,
        lat: Vec<f64>,
        depth: Vec<f64>,
    ) -> Result<Self, GridError> {
        let (nk, n_lat, n_lon) = data.dim();
        for (name, expected, got) in [
            ("lon", n_lon, lon.len()),
            ("lat", n_lat, lat.len()),
            ("depth", nk, depth.len()),
        ] {
            if expected != got {
                return Err(GridError::DimensionMismatch {
                    name: name.to_string(),
                    expected,
                    got,
                });
            }
        }

        let standard = standard_depths(nk)?;
        if let Some(index) = depth.iter().zip(standard).position(|(d, s)| d != s) {
            return Err(GridError::NonStandardDepth {
                index,
                depth: depth[index],
            });
        }

        Ok(Self {
            data,
            lon,
            lat,
            depth,
        })
    }

    /// Create a grid whose axes are derived from the array shape: regular
    /// cell-centred longitude and latitude, and the first `nk` standard depths.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::TooManyLevels`] if the array has more levels than
    /// the standard depth table.
    pub fn regular(data: Array3<f64>) -> Result<Self, GridError> {
        let (nk, n_lat, n_lon) = data.dim();
        let depth = standard_depths(nk)?.to_vec();
        Ok(Self {
            lon: axes::longitudes(n_lon),
            lat: axes::latitudes(n_lat, n_lon),
            depth,
            data,
        })
    }

    /// The sample array, indexed `(depth, lat, lon)`.
    pub fn data(&self) -> &Array3<f64> {
        &self.data
    }

    /// Consume the grid and return its sample array.
    pub fn into_data(self) -> Array3<f64> {
        self.data
    }

    /// Longitude cell centres (degrees east).
    pub fn lon(&self) -> &[f64] {
        &self.lon
    }

    /// Latitude cell centres (degrees north).
    pub fn lat(&self) -> &[f64] {
        &self.lat
    }

    /// Depth levels (metres).
    pub fn depth(&self) -> &[f64] {
        &self.depth
    }

    /// Number of depth levels.
    pub fn n_levels(&self) -> usize {
        self.depth.len()
    }

    /// Number of latitude rows.
    pub fn n_lat(&self) -> usize {
        self.lat.len()
    }

    /// Number of longitude columns.
    pub fn n_lon(&self) -> usize {
        self.lon.len()
    }

    /// One horizontal level, or `None` past the deepest level.
    pub fn level(&self, k: usize) -> Option<ArrayView2<'_, f64>> {
        (k < self.n_levels()).then(|| self.data.index_axis(Axis(0), k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depths::STANDARD_DEPTHS;

    fn ramp(nk: usize, ny: usize, nx: usize) -> Array3<f64> {
        Array3::from_shape_fn((nk, ny, nx), |(k, j, i)| (k * 100 + j * 10 + i) as f64)
    }

    #[test]
    fn regular_axes_follow_shape() {
        let grid = Grid::regular(ramp(3, 4, 8)).unwrap();
        assert_eq!(grid.n_levels(), 3);
        assert_eq!(grid.n_lat(), 4);
        assert_eq!(grid.n_lon(), 8);
        assert_eq!(grid.depth(), &STANDARD_DEPTHS[..3]);
        assert_eq!(grid.lon()[0], 22.5);
        assert_eq!(grid.lat()[0], -67.5);
    }

    #[test]
    fn regular_rejects_too_many_levels() {
        let err = Grid::regular(Array3::zeros((34, 1, 1))).unwrap_err();
        assert!(matches!(err, GridError::TooManyLevels { .. }));
    }

    #[test]
    fn new_rejects_axis_length_mismatch() {
        let err = Grid::new(
            ramp(2, 2, 2),
            vec![0.0, 1.0, 2.0],
            vec![0.0, 1.0],
            vec![0.0, 10.0],
        )
        .unwrap_err();
        match err {
            GridError::DimensionMismatch {
                name,
                expected,
                got,
            } => {
                assert_eq!(name, "lon");
                assert_eq!(expected, 2);
                assert_eq!(got, 3);
            }
            other => panic!("expected DimensionMismatch, got {other:?}"),
        }
    }

    #[test]
    fn new_rejects_non_standard_depth() {
        let err = Grid::new(
            ramp(2, 1, 1),
            vec![0.5],
            vec![0.5],
            vec![0.0, 15.0],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            GridError::NonStandardDepth { index: 1, depth } if depth == 15.0
        ));
    }

    #[test]
    fn level_view() {
        let grid = Grid::regular(ramp(2, 2, 3)).unwrap();
        let level = grid.level(1).unwrap();
        assert_eq!(level.dim(), (2, 3));
        assert_eq!(level[[1, 2]], 112.0);
        assert!(grid.level(2).is_none());
    }
}
