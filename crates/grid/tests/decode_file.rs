//! Integration tests: decode full-size ASCII grids from disk.

use std::fs;
use std::io::Write;

use approx::assert_relative_eq;
use tempfile::tempdir;
use woa_grid::{GridError, GridLayout, STANDARD_DEPTHS, decode_file, decode_grid, encode_grid};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Value stored at `(k, j, i)` in synthetic fixtures.
fn sample(k: usize, j: usize, i: usize) -> f64 {
    (k as f64) + (j as f64) * 0.01 + (i as f64) * 0.0001
}

/// Render `nk` levels of the default 360 x 180 layout as ASCII text.
fn render(nk: usize) -> String {
    let layout = GridLayout::default();
    let mut text = String::with_capacity(nk * layout.plane() / 10 * 81);
    let mut on_line = 0;
    for k in 0..nk {
        for j in 0..layout.n_lat() {
            for i in 0..layout.n_lon() {
                text.push_str(&format!("{:>8.4}", sample(k, j, i)));
                on_line += 1;
                if on_line == layout.fields_per_line() {
                    text.push('\n');
                    on_line = 0;
                }
            }
        }
    }
    text
}

// ---------------------------------------------------------------------------
// Full-size decoding
// ---------------------------------------------------------------------------

#[test]
fn ten_level_global_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("t00an1.txt");
    fs::write(&path, render(10)).unwrap();

    let grid = decode_file(&path, &GridLayout::default()).unwrap();
    assert_eq!(grid.data().dim(), (10, 180, 360));
    assert_eq!(grid.depth(), &STANDARD_DEPTHS[..10]);
    assert_relative_eq!(grid.lon()[0], 0.5);
    assert_relative_eq!(grid.lon()[359], 359.5);
    assert_relative_eq!(grid.lat()[0], -89.5);
    assert_relative_eq!(grid.lat()[179], 89.5);

    for &(k, j, i) in &[(0, 0, 0), (3, 17, 200), (9, 179, 359)] {
        assert_relative_eq!(grid.data()[[k, j, i]], sample(k, j, i), epsilon = 1e-9);
    }
}

#[test]
fn shallower_file_is_prefix_of_deeper_file() {
    let layout = GridLayout::default();
    let shallow = decode_grid(render(3).as_bytes(), &layout).unwrap();
    let deep = decode_grid(render(7).as_bytes(), &layout).unwrap();

    assert_eq!(shallow.n_levels(), 3);
    assert_eq!(deep.n_levels(), 7);
    assert_eq!(deep.depth()[..3], *shallow.depth());
    for k in 0..3 {
        assert_eq!(shallow.level(k).unwrap(), deep.level(k).unwrap());
    }
}

#[test]
fn trailing_partial_level_rejected() {
    let mut text = render(2);
    text.push_str(&"  1.0000".repeat(10));
    text.push('\n');
    let err = decode_grid(text.as_bytes(), &GridLayout::default()).unwrap_err();
    assert!(matches!(
        err,
        GridError::PartialLevel {
            fields: 129_610,
            plane: 64_800
        }
    ));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = decode_file(&dir.path().join("absent.txt"), &GridLayout::default()).unwrap_err();
    assert!(matches!(err, GridError::Io(_)));
}

// ---------------------------------------------------------------------------
// Encoder interplay
// ---------------------------------------------------------------------------

#[test]
fn encoded_grid_decodes_to_same_values() {
    let layout = GridLayout::default().with_n_lon(20).with_n_lat(10);
    let text: String = (0..400)
        .map(|n| format!("{:>8.3}", n as f64 * 0.125 - 20.0))
        .collect::<Vec<_>>()
        .chunks(10)
        .map(|c| c.concat() + "\n")
        .collect();
    let grid = decode_grid(text.as_bytes(), &layout).unwrap();
    assert_eq!(grid.n_levels(), 2);

    let dir = tempdir().unwrap();
    let path = dir.path().join("encoded.txt");
    let mut file = fs::File::create(&path).unwrap();
    encode_grid(&grid, &layout, &mut file).unwrap();
    file.flush().unwrap();

    let again = decode_file(&path, &layout).unwrap();
    assert_eq!(again, grid);
}
