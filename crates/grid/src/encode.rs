//! Fixed-width ASCII grid encoder, the inverse of [`decode_grid`](crate::decode_grid).

use std::io::Write;

use crate::error::GridError;
use crate::grid::Grid;
use crate::layout::GridLayout;

/// Decimal places tried first when formatting a field.
const MAX_PRECISION: usize = 4;

/// Write `grid` as fixed-width ASCII records.
///
/// Each value is right-justified in `field_width` characters with the most
/// decimal places (up to four) that fit. The grid's horizontal extents must
/// match the layout.
///
/// # Errors
///
/// - [`GridError::InvalidLayout`] if the layout fails validation.
/// - [`GridError::DimensionMismatch`] if the grid extents differ from the
///   layout.
/// - [`GridError::TooManyLevels`] if the grid is deeper than `max_levels`.
/// - [`GridError::FieldOverflow`] if a value cannot fit the field width.
/// - [`GridError::Io`] if writing fails.
pub fn encode_grid<W: Write>(
    grid: &Grid,
    layout: &GridLayout,
    mut writer: W,
) -> Result<(), GridError> {
    layout.validate()?;
    for (name, expected, got) in [
        ("lon", layout.n_lon(), grid.n_lon()),
        ("lat", layout.n_lat(), grid.n_lat()),
    ] {
        if expected != got {
            return Err(GridError::DimensionMismatch {
                name: name.to_string(),
                expected,
                got,
            });
        }
    }
    if grid.n_levels() > layout.max_levels() {
        return Err(GridError::TooManyLevels {
            requested: grid.n_levels(),
            max: layout.max_levels(),
        });
    }

    let width = layout.field_width();
    let mut line = String::with_capacity(layout.line_width() + 1);
    for chunk in grid
        .data()
        .iter()
        .copied()
        .collect::<Vec<_>>()
        .chunks(layout.fields_per_line())
    {
        line.clear();
        for &value in chunk {
            line.push_str(&format_field(value, width)?);
        }
        line.push('\n');
        writer.write_all(line.as_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

fn format_field(value: f64, width: usize) -> Result<String, GridError> {
    if value.is_finite() {
        for precision in (0..=MAX_PRECISION).rev() {
            let text = format!("{value:>width$.precision$}");
            if text.len() <= width {
                return Ok(text);
            }
        }
    }
    Err(GridError::FieldOverflow { value, width })
}
