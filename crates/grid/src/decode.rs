//! Fixed-width ASCII grid decoder.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ndarray::Array3;
use tracing::debug;

use crate::error::GridError;
use crate::grid::Grid;
use crate::layout::GridLayout;

/// Snapshot of decoder progress, reported once per consumed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeProgress {
    /// Fields decoded so far.
    pub fields_read: usize,
    /// Largest number of fields the layout allows.
    pub capacity: usize,
}

impl DecodeProgress {
    /// Fraction of capacity consumed, in percent.
    ///
    /// Files shallower than the maximum depth finish below 100.
    pub fn percent(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        100.0 * self.fields_read as f64 / self.capacity as f64
    }
}

/// Decode a fixed-width ASCII grid.
///
/// See [`decode_grid_with_progress`] for the record rules.
///
/// # Errors
///
/// See [`decode_grid_with_progress`].
pub fn decode_grid<R: BufRead>(reader: R, layout: &GridLayout) -> Result<Grid, GridError> {
    decode_grid_with_progress(reader, layout, |_| {})
}

/// Decode a fixed-width ASCII grid, invoking `progress` after every line.
///
/// Every non-empty line must contain at least `layout.line_width()` ASCII
/// characters; anything past that width must be whitespace. Each line holds
/// `fields_per_line` fields of `field_width` characters, and a field is the
/// decimal number left after trimming its padding. Fields fill the grid
/// longitude fastest, then latitude, then depth. The number of depth levels
/// is the total field count divided by `n_lon * n_lat`.
///
/// # Errors
///
/// - [`GridError::InvalidLayout`] if the layout fails validation.
/// - [`GridError::MalformedLine`] for short lines, non-ASCII lines or data
///   past the line width.
/// - [`GridError::InvalidField`] if a field is not a number.
/// - [`GridError::CapacityExceeded`] if the input holds more than
///   `capacity()` fields.
/// - [`GridError::EmptyInput`] if no fields were read.
/// - [`GridError::PartialLevel`] if the field count is not a positive
///   multiple of one level.
/// - [`GridError::Io`] if reading fails.
pub fn decode_grid_with_progress<R, F>(
    reader: R,
    layout: &GridLayout,
    mut progress: F,
) -> Result<Grid, GridError>
where
    R: BufRead,
    F: FnMut(DecodeProgress),
{
    layout.validate()?;

    let capacity = layout.capacity();
    let width = layout.field_width();
    let per_line = layout.fields_per_line();
    let line_width = layout.line_width();

    let mut values: Vec<f64> = Vec::with_capacity(capacity);

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        if line.is_empty() {
            continue;
        }
        if !line.is_ascii() {
            return Err(GridError::MalformedLine {
                line: line_no,
                reason: "contains non-ASCII characters".to_string(),
            });
        }
        if line.len() < line_width {
            return Err(GridError::MalformedLine {
                line: line_no,
                reason: format!("expected {line_width} columns, found {}", line.len()),
            });
        }
        if !line[line_width..].trim().is_empty() {
            return Err(GridError::MalformedLine {
                line: line_no,
                reason: format!("unexpected data past column {line_width}"),
            });
        }
        if values.len() + per_line > capacity {
            return Err(GridError::CapacityExceeded { capacity });
        }

        for f in 0..per_line {
            let start = f * width;
            let text = &line[start..start + width];
            let value = text
                .trim()
                .parse::<f64>()
                .map_err(|_| GridError::InvalidField {
                    line: line_no,
                    column: start + 1,
                    text: text.to_string(),
                })?;
            values.push(value);
        }

        progress(DecodeProgress {
            fields_read: values.len(),
            capacity,
        });
    }

    let plane = layout.plane();
    let fields = values.len();
    if fields == 0 {
        return Err(GridError::EmptyInput);
    }
    if fields % plane != 0 {
        return Err(GridError::PartialLevel { fields, plane });
    }

    let nk = fields / plane;
    debug!(fields, levels = nk, "decoded ASCII grid");

    let data = Array3::from_shape_vec((nk, layout.n_lat(), layout.n_lon()), values).map_err(
        |e| GridError::InvalidLayout {
            reason: e.to_string(),
        },
    )?;
    Grid::regular(data)
}

/// Open `path` and decode it with [`decode_grid`].
///
/// # Errors
///
/// Returns [`GridError::Io`] if the file cannot be opened, otherwise the
/// errors of [`decode_grid_with_progress`].
pub fn decode_file(path: &Path, layout: &GridLayout) -> Result<Grid, GridError> {
    let file = File::open(path)?;
    debug!(path = %path.display(), "reading ASCII grid");
    decode_grid(BufReader::new(file), layout)
}
