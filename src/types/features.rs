//! Model input feature structures

/// One sparse block of the feature row.
///
/// Entries are `(column, value)` pairs sorted by column, with columns local
/// to the block (`0..width`). Zero values are never stored.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseRow {
    width: usize,
    entries: Vec<(usize, f32)>,
}

impl SparseRow {
    /// Build a row from unordered entries, dropping zeros and summing duplicates
    pub fn from_entries(width: usize, mut entries: Vec<(usize, f32)>) -> Self {
        entries.sort_by_key(|&(col, _)| col);

        let mut merged: Vec<(usize, f32)> = Vec::with_capacity(entries.len());
        for (col, value) in entries {
            debug_assert!(col < width, "column {col} outside block width {width}");
            match merged.last_mut() {
                Some((last, acc)) if *last == col => *acc += value,
                _ => merged.push((col, value)),
            }
        }
        merged.retain(|&(_, v)| v != 0.0);

        Self {
            width,
            entries: merged,
        }
    }

    /// An all-zero row of the given width
    pub fn zeros(width: usize) -> Self {
        Self {
            width,
            entries: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn entries(&self) -> &[(usize, f32)] {
        &self.entries
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }
}

/// Number of dense numeric flag columns at the end of the row
pub const NUMERIC_WIDTH: usize = 3;

/// A single model input row: text ‖ categorical ‖ numeric.
///
/// The block order is the column layout the classifier was trained on.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub text: SparseRow,
    pub categorical: SparseRow,
    pub numeric: [f32; NUMERIC_WIDTH],
}

impl FeatureVector {
    /// Total column count
    pub fn width(&self) -> usize {
        self.text.width() + self.categorical.width() + NUMERIC_WIDTH
    }

    /// Non-zero `(column, value)` pairs over the whole row, in column order
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        let cat_offset = self.text.width();
        let num_offset = cat_offset + self.categorical.width();

        self.text
            .entries()
            .iter()
            .copied()
            .chain(
                self.categorical
                    .entries()
                    .iter()
                    .map(move |&(col, v)| (col + cat_offset, v)),
            )
            .chain(
                self.numeric
                    .iter()
                    .enumerate()
                    .filter(|(_, &v)| v != 0.0)
                    .map(move |(i, &v)| (i + num_offset, v)),
            )
    }

    /// Dense row, as fed to tensor-based models
    pub fn to_dense(&self) -> Vec<f32> {
        let mut dense = vec![0.0_f32; self.width()];
        for (col, value) in self.iter_nonzero() {
            dense[col] = value;
        }
        dense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_row_merges_and_sorts() {
        let row = SparseRow::from_entries(5, vec![(3, 1.0), (1, 2.0), (3, 0.5), (4, 0.0)]);
        assert_eq!(row.entries(), &[(1, 2.0), (3, 1.5)]);
        assert_eq!(row.width(), 5);
    }

    #[test]
    fn test_block_offsets() {
        let vector = FeatureVector {
            text: SparseRow::from_entries(4, vec![(2, 0.5)]),
            categorical: SparseRow::from_entries(3, vec![(0, 1.0)]),
            numeric: [0.0, 1.0, 0.0],
        };

        assert_eq!(vector.width(), 10);
        assert_eq!(
            vector.iter_nonzero().collect::<Vec<_>>(),
            vec![(2, 0.5), (4, 1.0), (8, 1.0)]
        );
        assert_eq!(
            vector.to_dense(),
            vec![0.0, 0.0, 0.5, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
        );
    }
}
