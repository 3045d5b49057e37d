//! Depth splicing of a period field with an annual climatology.

use std::ops::Range;

/// Which output levels come from which source.
///
/// The three ranges are contiguous and together cover `0..out_levels`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpliceRanges {
    /// Levels copied from the period itself.
    pub own: Range<usize>,
    /// Levels copied from the annual file at the same depth indices.
    pub annual: Range<usize>,
    /// Levels no input provides, written as the fill value.
    pub fill: Range<usize>,
}

/// Assign each of `out_levels` levels to a source.
///
/// The period supplies its own `own_levels`; an annual file with
/// `annual_levels` supplies any deeper levels it has. Counts are clamped to
/// `out_levels`.
pub fn splice_ranges(
    own_levels: usize,
    annual_levels: Option<usize>,
    out_levels: usize,
) -> SpliceRanges {
    let own_end = own_levels.min(out_levels);
    let annual_end = annual_levels
        .unwrap_or(0)
        .min(out_levels)
        .max(own_end);
    SpliceRanges {
        own: 0..own_end,
        annual: own_end..annual_end,
        fill: annual_end..out_levels,
    }
}
