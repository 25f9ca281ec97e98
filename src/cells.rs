use std::convert::From;
use std::fmt;

use crate::units::{ColumnIndex, RowIndex};

/// A cell of a rectangular maze grid, addressed by row (top to bottom) and
/// column (left to right).
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub row: usize,
    pub column: usize,
}

impl GridCoordinate {
    pub fn new(row: usize, column: usize) -> GridCoordinate {
        GridCoordinate { row, column }
    }

    #[inline]
    pub fn from_row_column_indices(row_index: RowIndex, col_index: ColumnIndex) -> Self {
        let (RowIndex(row), ColumnIndex(column)) = (row_index, col_index);
        GridCoordinate::new(row, column)
    }

    #[inline]
    pub fn from_row_major_index(index: usize, row_length: usize) -> GridCoordinate {
        GridCoordinate::new(index / row_length, index % row_length)
    }
}

impl From<(usize, usize)> for GridCoordinate {
    fn from(row_column_pair: (usize, usize)) -> GridCoordinate {
        GridCoordinate::new(row_column_pair.0, row_column_pair.1)
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North,
    East,
    South,
    West,
}

/// Up, right, down, left. The order neighbour candidates are listed in before they are shuffled.
pub const COMPASS_PRIMARY_DIRECTIONS: [CompassPrimary; 4] = [CompassPrimary::North,
                                                             CompassPrimary::East,
                                                             CompassPrimary::South,
                                                             CompassPrimary::West];

impl CompassPrimary {
    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::West => CompassPrimary::East,
        }
    }
}

/// Creates a new `GridCoordinate` offset 1 cell away in the given direction.
///
/// Returns None if the coordinate is not representable (moving north of row 0 or west of column 0).
/// The result is not checked against any grid's dimensions.
pub fn offset_coordinate(coord: GridCoordinate, dir: CompassPrimary) -> Option<GridCoordinate> {
    let (row, column) = (coord.row, coord.column);
    match dir {
        CompassPrimary::North => {
            if row > 0 {
                Some(GridCoordinate { row: row - 1, column })
            } else {
                None
            }
        }
        CompassPrimary::South => Some(GridCoordinate { row: row + 1, column }),
        CompassPrimary::East => Some(GridCoordinate { row, column: column + 1 }),
        CompassPrimary::West => {
            if column > 0 {
                Some(GridCoordinate { row, column: column - 1 })
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn offsets_from_origin() {
        let origin = GridCoordinate::new(0, 0);
        assert_eq!(offset_coordinate(origin, CompassPrimary::North), None);
        assert_eq!(offset_coordinate(origin, CompassPrimary::West), None);
        assert_eq!(offset_coordinate(origin, CompassPrimary::South),
                   Some(GridCoordinate::new(1, 0)));
        assert_eq!(offset_coordinate(origin, CompassPrimary::East),
                   Some(GridCoordinate::new(0, 1)));
    }

    #[test]
    fn offsets_are_reversible() {
        let gc = GridCoordinate::new(3, 7);
        for dir in COMPASS_PRIMARY_DIRECTIONS.iter() {
            let moved = offset_coordinate(gc, *dir).expect("interior cell has all neighbours");
            assert_eq!(offset_coordinate(moved, dir.opposite()), Some(gc));
        }
    }

    #[test]
    fn row_major_index_conversion() {
        assert_eq!(GridCoordinate::from_row_major_index(0, 3), GridCoordinate::new(0, 0));
        assert_eq!(GridCoordinate::from_row_major_index(5, 3), GridCoordinate::new(1, 2));
        assert_eq!(GridCoordinate::from_row_major_index(6, 3), GridCoordinate::new(2, 0));
        assert_eq!(GridCoordinate::from_row_column_indices(RowIndex(4), ColumnIndex(1)),
                   GridCoordinate::new(4, 1));
        assert_eq!(GridCoordinate::from((2, 5)), GridCoordinate::new(2, 5));
    }
}
