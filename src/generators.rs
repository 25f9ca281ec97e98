use log::{debug, trace};
use std::error::Error;
use std::fmt;

use crate::cells::{offset_coordinate, CompassPrimary, GridCoordinate, COMPASS_PRIMARY_DIRECTIONS};
use crate::maze::Maze;
use crate::passages::PassageMatrix;
use crate::random::{shuffle, RandomSource};
use crate::units::{ColumnsCount, RowsCount};

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GenerationError {
    /// A maze needs at least one row and one column, and a cell count that fits in a `usize`.
    InvalidDimensions { rows: usize, columns: usize },
    InvalidStartCell(GridCoordinate),
    InvalidGoalCell(GridCoordinate),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GenerationError::InvalidDimensions { rows, columns } => {
                write!(f,
                       "invalid maze dimensions {}x{}, rows and columns must be at least 1 \
                        and the cell count must fit in a usize",
                       rows,
                       columns)
            }
            GenerationError::InvalidStartCell(coord) => {
                write!(f, "start cell {} is outside the maze", coord)
            }
            GenerationError::InvalidGoalCell(coord) => {
                write!(f, "goal cell {} is outside the maze", coord)
            }
        }
    }
}

impl Error for GenerationError {}

/// Generates perfect mazes of a fixed size with the recursive backtracker algorithm.
///
/// The start cell is where the traversal begins, a uniformly random cell unless one is given.
/// The goal defaults to the bottom right cell. Every cell of a generated maze is reachable from
/// every other cell, so any start and goal are connected.
///
/// A generator keeps no state between calls, so it can be reused for any number of mazes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MazeGenerator {
    rows: usize,
    columns: usize,
    start: Option<GridCoordinate>,
    goal: Option<GridCoordinate>,
}

impl MazeGenerator {
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<MazeGenerator, GenerationError> {
        let (RowsCount(rows), ColumnsCount(columns)) = (rows, columns);
        if rows < 1 || columns < 1 || rows.checked_mul(columns).is_none() {
            return Err(GenerationError::InvalidDimensions { rows, columns });
        }

        Ok(MazeGenerator {
            rows,
            columns,
            start: None,
            goal: None,
        })
    }

    /// Begin every traversal at this cell instead of a random one.
    pub fn start(mut self, start: GridCoordinate) -> MazeGenerator {
        self.start = Some(start);
        self
    }

    /// Designate this cell as the goal instead of the bottom right cell.
    pub fn goal(mut self, goal: GridCoordinate) -> MazeGenerator {
        self.goal = Some(goal);
        self
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        RowsCount(self.rows)
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        ColumnsCount(self.columns)
    }

    /// Carve a new maze, consuming randomness from `rng`.
    ///
    /// With the same start cell and a source handing out the same draws the result is identical.
    pub fn generate<R>(&self, rng: &mut R) -> Result<Maze, GenerationError>
        where R: RandomSource + ?Sized
    {
        let goal = self.goal.unwrap_or_else(|| GridCoordinate::new(self.rows - 1, self.columns - 1));
        if !self.contains(goal) {
            return Err(GenerationError::InvalidGoalCell(goal));
        }

        let start = match self.start {
            Some(start) if self.contains(start) => start,
            Some(start) => return Err(GenerationError::InvalidStartCell(start)),
            None => {
                let row = rng.next_index(self.rows);
                let column = rng.next_index(self.columns);
                GridCoordinate::new(row, column)
            }
        };

        let mut traversal = Traversal::new(self.rows, self.columns);
        traversal.carve_from(start, rng);

        let Traversal { horizontal_passages, vertical_passages, .. } = traversal;
        let maze = Maze::from_parts(self.rows,
                                    self.columns,
                                    horizontal_passages,
                                    vertical_passages,
                                    start,
                                    goal);
        debug!("Generated {}x{} maze from {} with {} passages, goal {}",
               self.rows,
               self.columns,
               start,
               maze.links_count(),
               goal);
        Ok(maze)
    }

    #[inline]
    fn contains(&self, coord: GridCoordinate) -> bool {
        coord.row < self.rows && coord.column < self.columns
    }
}

/// Generate a `rows` x `columns` perfect maze with the recursive backtracker algorithm.
///
/// Starts from `start` when given, otherwise from a random cell. The goal is the bottom right cell.
pub fn generate<R>(rows: RowsCount,
                                columns: ColumnsCount,
                                rng: &mut R,
                                start: Option<GridCoordinate>)
                                -> Result<Maze, GenerationError>
    where R: RandomSource + ?Sized
{
    let generator = MazeGenerator::new(rows, columns)?;
    match start {
        Some(start_cell) => generator.start(start_cell).generate(rng),
        None => generator.generate(rng),
    }
}

/// A cell on the traversal stack: the neighbour directions in shuffled order and how many of them
/// have been tried so far.
#[derive(Debug, Copy, Clone)]
struct Frame {
    cell: GridCoordinate,
    directions: [CompassPrimary; 4],
    next_direction: usize,
}

/// State of one depth first traversal. Lives only for a single generation.
struct Traversal {
    rows: usize,
    columns: usize,
    visited: PassageMatrix,
    horizontal_passages: PassageMatrix,
    vertical_passages: PassageMatrix,
}

impl Traversal {
    fn new(rows: usize, columns: usize) -> Traversal {
        Traversal {
            rows,
            columns,
            visited: PassageMatrix::new(RowsCount(rows), ColumnsCount(columns)),
            horizontal_passages: PassageMatrix::new(RowsCount(rows - 1), ColumnsCount(columns)),
            vertical_passages: PassageMatrix::new(RowsCount(rows), ColumnsCount(columns - 1)),
        }
    }

    /// Depth first walk from `start`, opening a passage into every unvisited neighbour just before
    /// stepping into it.
    ///
    /// A cell's neighbours are shuffled when the cell is first entered and tried in that order,
    /// each fully explored before the next is tried. The frames live on a heap allocated stack
    /// rather than the call stack, so large grids cannot overflow it.
    fn carve_from<R>(&mut self, start: GridCoordinate, rng: &mut R)
        where R: RandomSource + ?Sized
    {
        if self.is_visited(start) {
            return;
        }

        let mut stack = vec![self.enter(start, rng)];

        while let Some(frame) = stack.last_mut() {
            if frame.next_direction == frame.directions.len() {
                let _ = stack.pop();
                continue;
            }

            let cell = frame.cell;
            let direction = frame.directions[frame.next_direction];
            frame.next_direction += 1;

            if let Some(neighbour) = self.neighbour_at_direction(cell, direction) {
                if !self.is_visited(neighbour) {
                    self.open_passage(cell, direction);
                    let neighbour_frame = self.enter(neighbour, rng);
                    stack.push(neighbour_frame);
                }
            }
        }
    }

    fn enter<R>(&mut self, cell: GridCoordinate, rng: &mut R) -> Frame
        where R: RandomSource + ?Sized
    {
        trace!("Entering cell {}", cell);
        self.visited.set(cell.row, cell.column, true);

        let mut directions = COMPASS_PRIMARY_DIRECTIONS;
        shuffle(&mut directions, rng);
        Frame {
            cell,
            directions,
            next_direction: 0,
        }
    }

    #[inline]
    fn is_visited(&self, cell: GridCoordinate) -> bool {
        self.visited.get(cell.row, cell.column)
    }

    fn neighbour_at_direction(&self,
                              cell: GridCoordinate,
                              direction: CompassPrimary)
                              -> Option<GridCoordinate> {
        offset_coordinate(cell, direction)
            .filter(|neighbour| neighbour.row < self.rows && neighbour.column < self.columns)
    }

    /// Left/right passages live in the vertical matrix at the lower column index, up/down passages
    /// in the horizontal matrix at the lower row index.
    fn open_passage(&mut self, cell: GridCoordinate, direction: CompassPrimary) {
        let (row, column) = (cell.row, cell.column);
        match direction {
            CompassPrimary::North => self.horizontal_passages.set(row - 1, column, true),
            CompassPrimary::South => self.horizontal_passages.set(row, column, true),
            CompassPrimary::East => self.vertical_passages.set(row, column, true),
            CompassPrimary::West => self.vertical_passages.set(row, column - 1, true),
        }
    }
}
