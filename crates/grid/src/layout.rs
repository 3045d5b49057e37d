//! Fixed-width record layout and grid capacity.

use crate::depths::MAX_LEVELS;
use crate::error::GridError;

/// Shape of an ASCII grid file: horizontal extents, maximum depth count and
/// the fixed-width record format.
///
/// The [`Default`] implementation describes the global 1x1 degree WOA05
/// distribution: 360 x 180 points, up to 33 levels, ten 8-character fields
/// per 80-column line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Number of longitude columns.
    n_lon: usize,
    /// Number of latitude rows.
    n_lat: usize,
    /// Maximum number of depth levels a file may hold.
    max_levels: usize,
    /// Width of one numeric field in characters.
    field_width: usize,
    /// Number of fields per line.
    fields_per_line: usize,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            n_lon: 360,
            n_lat: 180,
            max_levels: MAX_LEVELS,
            field_width: 8,
            fields_per_line: 10,
        }
    }
}

impl GridLayout {
    /// Set the number of longitude columns.
    pub fn with_n_lon(mut self, n_lon: usize) -> Self {
        self.n_lon = n_lon;
        self
    }

    /// Set the number of latitude rows.
    pub fn with_n_lat(mut self, n_lat: usize) -> Self {
        self.n_lat = n_lat;
        self
    }

    /// Set the maximum number of depth levels.
    pub fn with_max_levels(mut self, max_levels: usize) -> Self {
        self.max_levels = max_levels;
        self
    }

    /// Set the field width in characters.
    pub fn with_field_width(mut self, field_width: usize) -> Self {
        self.field_width = field_width;
        self
    }

    /// Set the number of fields per line.
    pub fn with_fields_per_line(mut self, fields_per_line: usize) -> Self {
        self.fields_per_line = fields_per_line;
        self
    }

    /// Number of longitude columns.
    pub fn n_lon(&self) -> usize {
        self.n_lon
    }

    /// Number of latitude rows.
    pub fn n_lat(&self) -> usize {
        self.n_lat
    }

    /// Maximum number of depth levels.
    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    /// Field width in characters.
    pub fn field_width(&self) -> usize {
        self.field_width
    }

    /// Number of fields per line.
    pub fn fields_per_line(&self) -> usize {
        self.fields_per_line
    }

    /// Characters per record line.
    pub fn line_width(&self) -> usize {
        self.field_width * self.fields_per_line
    }

    /// Points in one horizontal level.
    pub fn plane(&self) -> usize {
        self.n_lon * self.n_lat
    }

    /// Largest number of fields a file may contain.
    pub fn capacity(&self) -> usize {
        self.plane() * self.max_levels
    }

    /// Validate that the layout is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidLayout`] if any extent is zero, if
    /// `max_levels` exceeds the standard depth table, or if a level does not
    /// fill a whole number of lines.
    pub fn validate(&self) -> Result<(), GridError> {
        let extents = [
            ("n_lon", self.n_lon),
            ("n_lat", self.n_lat),
            ("max_levels", self.max_levels),
            ("field_width", self.field_width),
            ("fields_per_line", self.fields_per_line),
        ];
        if let Some((name, _)) = extents.iter().find(|(_, v)| *v == 0) {
            return Err(GridError::InvalidLayout {
                reason: format!("{name} must be greater than 0"),
            });
        }
        if self.max_levels > MAX_LEVELS {
            return Err(GridError::InvalidLayout {
                reason: format!(
                    "max_levels must be at most {MAX_LEVELS}, got {}",
                    self.max_levels
                ),
            });
        }
        if self.plane() % self.fields_per_line != 0 {
            return Err(GridError::InvalidLayout {
                reason: format!(
                    "{} points per level do not fill whole lines of {} fields",
                    self.plane(),
                    self.fields_per_line
                ),
            });
        }
        Ok(())
    }
}
