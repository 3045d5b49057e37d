//! # woa-grid
//!
//! Decode World Ocean Atlas fixed-width ASCII grids into dense
//! `(depth, lat, lon)` arrays.
//!
//! The ASCII distribution packs 8-character right-justified fields, ten to a
//! line, longitude fastest and depth slowest. Files do not say how many depth
//! levels they contain; the decoder recovers the level count from the number
//! of fields read.
//!
//! # Quick start
//!
//! ```
//! use woa_grid::{GridLayout, decode_grid};
//!
//! let layout = GridLayout::default().with_n_lon(10).with_n_lat(1);
//! let text = "       0       1       2       3       4       5       6       7       8       9\n";
//! let grid = decode_grid(text.as_bytes(), &layout).unwrap();
//! assert_eq!(grid.n_levels(), 1);
//! assert_eq!(grid.data()[[0, 0, 3]], 3.0);
//! assert_eq!(grid.lon()[0], 18.0);
//! ```
//!
//! # Architecture
//!
//! ```text
//! decode_grid()
//!   ├─ GridLayout::validate()     (layout.rs)
//!   ├─ parse fixed-width records  (decode.rs)
//!   ├─ derive nk = fields / plane
//!   └─ Grid::regular()            (grid.rs, axes.rs, depths.rs)
//! ```

mod axes;
mod decode;
mod depths;
mod encode;
mod error;
mod grid;
mod layout;

pub use axes::{latitudes, longitudes};
pub use decode::{DecodeProgress, decode_file, decode_grid, decode_grid_with_progress};
pub use depths::{MAX_LEVELS, STANDARD_DEPTHS, standard_depths};
pub use encode::encode_grid;
pub use error::GridError;
pub use grid::Grid;
pub use layout::GridLayout;
