//! End to end: ASCII grids are decoded, exported and merged into a series.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use ndarray::Array3;
use tempfile::{TempDir, tempdir};
use woa_grid::{Grid, GridLayout, decode_file, encode_grid};
use woa_io::{Dataset, ExportConfig, VariableKind, write_grid};
use woa_merge::{MergeConfig, merge_series};

const N_LAT: usize = 180;
const N_LON: usize = 360;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Values fit the 8-character field with four decimals, so they decode exactly.
fn grid(n_levels: usize, tag: f64) -> Grid {
    let data = Array3::from_shape_fn((n_levels, N_LAT, N_LON), |(k, j, i)| {
        tag + k as f64 + ((j * N_LON + i) % 100) as f64 * 0.01
    });
    Grid::regular(data).unwrap()
}

/// Encode `grid` to `<stem>.txt`, decode it back and export `<stem>.nc`.
fn ascii_to_netcdf(dir: &TempDir, stem: &str, grid: &Grid) -> PathBuf {
    let layout = GridLayout::default();
    let ascii = dir.path().join(format!("{stem}.txt"));
    encode_grid(grid, &layout, BufWriter::new(File::create(&ascii).unwrap())).unwrap();

    let decoded = decode_file(&ascii, &layout).unwrap();
    assert_eq!(decoded.n_levels(), grid.n_levels());

    let netcdf = dir.path().join(format!("{stem}.nc"));
    write_grid(&netcdf, &decoded, VariableKind::Temperature, &ExportConfig::default()).unwrap();
    netcdf
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

#[test]
fn decoded_periods_merge_with_annual_levels() {
    let dir = tempdir().unwrap();
    let inputs = vec![
        ascii_to_netcdf(&dir, "t01an1", &grid(5, 100.0)),
        ascii_to_netcdf(&dir, "t02an1", &grid(10, 200.0)),
        ascii_to_netcdf(&dir, "t03an1", &grid(8, 300.0)),
    ];
    let annual = ascii_to_netcdf(&dir, "t00an1", &grid(10, 0.0));
    let output = dir.path().join("t_monthly.nc");

    let series = merge_series(&inputs, Some(&annual), &output, &MergeConfig::default()).unwrap();
    assert_eq!(series.n_records, 3);

    let ds = Dataset::open(&output).unwrap();
    assert_eq!(
        ds.variable("temperature").unwrap().shape,
        vec![3, 10, N_LAT, N_LON]
    );

    let annual_ds = Dataset::open(&annual).unwrap();
    let first_period = Dataset::open(&inputs[0]).unwrap();
    for k in 0..10 {
        let merged = ds
            .read_slab("temperature", &[0, k, 0, 0], &[1, 1, N_LAT, N_LON])
            .unwrap();
        let expected = if k < 5 {
            first_period.read_slab("temperature", &[k, 0, 0], &[1, N_LAT, N_LON])
        } else {
            annual_ds.read_slab("temperature", &[k, 0, 0], &[1, N_LAT, N_LON])
        }
        .unwrap();
        assert_eq!(merged, expected, "record 0, level {k}");
    }
}
