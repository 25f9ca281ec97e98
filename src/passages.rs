use bit_set::BitSet;
use std::fmt;

use crate::units::{ColumnsCount, RowsCount};

/// A fixed size matrix of booleans, stored as one bit per entry in row major order.
///
/// Used for the passages between maze cells and for the visited cells during generation.
/// A matrix can have zero rows or zero columns, e.g. the horizontal passages of a single row maze.
#[derive(Clone, PartialEq, Eq)]
pub struct PassageMatrix {
    bits: BitSet,
    rows: usize,
    columns: usize,
}

impl PassageMatrix {
    /// A matrix with every entry false.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> PassageMatrix {
        let (RowsCount(rows), ColumnsCount(columns)) = (rows, columns);
        PassageMatrix {
            bits: BitSet::with_capacity(rows * columns),
            rows,
            columns,
        }
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        RowsCount(self.rows)
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        ColumnsCount(self.columns)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.columns == 0
    }

    /// Entry at `[row][column]`. Out of bounds reads are false.
    #[inline]
    pub fn get(&self, row: usize, column: usize) -> bool {
        self.bit_index(row, column)
            .map_or(false, |index| self.bits.contains(index))
    }

    /// Set the entry at `[row][column]`.
    ///
    /// Panics if the entry is out of bounds.
    pub fn set(&mut self, row: usize, column: usize, value: bool) {
        let index = self.bit_index(row, column)
            .unwrap_or_else(|| {
                panic!("passage matrix entry [{}][{}] out of bounds for {}x{}",
                       row,
                       column,
                       self.rows,
                       self.columns)
            });
        if value {
            self.bits.insert(index);
        } else {
            self.bits.remove(index);
        }
    }

    /// Number of true entries.
    #[inline]
    pub fn count_set(&self) -> usize {
        self.bits.len()
    }

    /// Every entry as `(row, column, value)` in row major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        let columns = self.columns;
        (0..self.rows * self.columns).map(move |index| {
            (index / columns, index % columns, self.bits.contains(index))
        })
    }

    /// The matrix as nested rows, handy for comparing against literal matrices.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        (0..self.rows)
            .map(|row| (0..self.columns).map(|column| self.get(row, column)).collect())
            .collect()
    }

    #[inline]
    fn bit_index(&self, row: usize, column: usize) -> Option<usize> {
        if row < self.rows && column < self.columns {
            Some(row * self.columns + column)
        } else {
            None
        }
    }
}

impl fmt::Debug for PassageMatrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "PassageMatrix :: rows: {:?}, columns: {:?}, set: {:?}",
               self.rows,
               self.columns,
               self.to_rows())
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn matrix(rows: usize, columns: usize) -> PassageMatrix {
        PassageMatrix::new(RowsCount(rows), ColumnsCount(columns))
    }

    #[test]
    fn starts_all_false() {
        let m = matrix(3, 4);
        assert_eq!(m.count_set(), 0);
        assert!(m.iter().all(|(_, _, value)| !value));
        assert_eq!(m.iter().count(), 12);
    }

    #[test]
    fn set_and_clear() {
        let mut m = matrix(2, 3);
        m.set(1, 2, true);
        m.set(0, 1, true);
        assert!(m.get(1, 2));
        assert!(m.get(0, 1));
        assert!(!m.get(1, 1));
        assert_eq!(m.count_set(), 2);
        assert_eq!(m.to_rows(), vec![vec![false, true, false], vec![false, false, true]]);

        m.set(1, 2, false);
        assert!(!m.get(1, 2));
        assert_eq!(m.count_set(), 1);
    }

    #[test]
    fn out_of_bounds_reads_are_false() {
        let mut m = matrix(2, 2);
        m.set(1, 1, true);
        assert!(!m.get(2, 0));
        assert!(!m.get(0, 2));
        assert!(!m.get(usize::MAX, usize::MAX));
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_write_panics() {
        let mut m = matrix(2, 2);
        m.set(0, 2, true);
    }

    #[test]
    fn degenerate_shapes() {
        let no_rows = matrix(0, 5);
        assert!(no_rows.is_empty());
        assert_eq!(no_rows.iter().count(), 0);
        assert_eq!(no_rows.to_rows(), Vec::<Vec<bool>>::new());

        let no_columns = matrix(3, 0);
        assert!(no_columns.is_empty());
        let expected: Vec<Vec<bool>> = vec![vec![], vec![], vec![]];
        assert_eq!(no_columns.to_rows(), expected);
    }
}
