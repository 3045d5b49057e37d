//! Pairing of comparable levels between two fields.

use crate::error::CompareError;

/// The levels two fields share, and the shape of each level.
///
/// A level is addressed by its leading indices: none for fields of rank
/// below 3, `[k]` for 3-D fields and `[n, k]` for 4-D fields. Leading
/// extents are truncated to the smaller of the two fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelPlan {
    levels: Vec<Vec<usize>>,
    level_shape: Vec<usize>,
}

impl LevelPlan {
    /// Pair the levels of fields with shapes `shape_a` and `shape_b`.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::ShapeIncompatible`] for rank mismatches, for
    /// differing shapes below rank 3, for differing trailing extents at rank
    /// 3 or 4, and for any rank above 4.
    pub fn new(shape_a: &[usize], shape_b: &[usize]) -> Result<Self, CompareError> {
        let incompatible = || CompareError::ShapeIncompatible {
            shape_a: shape_a.to_vec(),
            shape_b: shape_b.to_vec(),
        };

        let rank = shape_a.len();
        if rank != shape_b.len() {
            return Err(incompatible());
        }
        if rank < 3 {
            if shape_a != shape_b {
                return Err(incompatible());
            }
            return Ok(Self {
                levels: vec![Vec::new()],
                level_shape: shape_a.to_vec(),
            });
        }
        if rank > 4 || shape_a[rank - 2..] != shape_b[rank - 2..] {
            return Err(incompatible());
        }

        let level_shape = shape_a[rank - 2..].to_vec();
        let nk = shape_a[rank - 3].min(shape_b[rank - 3]);
        let levels = if rank == 3 {
            (0..nk).map(|k| vec![k]).collect()
        } else {
            let nn = shape_a[0].min(shape_b[0]);
            (0..nn)
                .flat_map(|n| (0..nk).map(move |k| vec![n, k]))
                .collect()
        };
        Ok(Self {
            levels,
            level_shape,
        })
    }

    /// Leading indices of every compared level, in row-major order.
    pub fn levels(&self) -> &[Vec<usize>] {
        &self.levels
    }

    /// Shape of one level.
    pub fn level_shape(&self) -> &[usize] {
        &self.level_shape
    }

    /// Number of compared levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether there is nothing to compare.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Hyperslab `(start, count)` selecting the level at `index`.
    pub fn slab(&self, index: &[usize]) -> (Vec<usize>, Vec<usize>) {
        let start = index
            .iter()
            .copied()
            .chain(self.level_shape.iter().map(|_| 0))
            .collect();
        let count = index
            .iter()
            .map(|_| 1)
            .chain(self.level_shape.iter().copied())
            .collect();
        (start, count)
    }
}
