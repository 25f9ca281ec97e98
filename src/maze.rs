use petgraph::graph::{NodeIndex, UnGraph};
use smallvec::SmallVec;

use crate::cells::{offset_coordinate, CompassPrimary, GridCoordinate, COMPASS_PRIMARY_DIRECTIONS};
use crate::passages::PassageMatrix;
use crate::units::{ColumnsCount, EdgesCount, NodesCount, RowsCount};

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;

/// A rectangular maze: which passages between adjacent cells are open, plus the designated start
/// and goal cells.
///
/// Horizontal passages are the boundaries below each row except the last, `(rows - 1) x columns`.
/// Entry `[r][c]` is open when cell `(r, c)` connects to cell `(r + 1, c)`.
/// Vertical passages are the boundaries right of each column except the last, `rows x (columns - 1)`.
/// Entry `[r][c]` is open when cell `(r, c)` connects to cell `(r, c + 1)`.
///
/// A generated maze is perfect: the open passages form a spanning tree over the cells.
/// There are no mutators, a maze is fixed once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    rows: usize,
    columns: usize,
    horizontal_passages: PassageMatrix,
    vertical_passages: PassageMatrix,
    start: GridCoordinate,
    goal: GridCoordinate,
}

impl Maze {
    /// Assemble a maze from already carved passage matrices.
    ///
    /// Callers guarantee `rows` and `columns` are at least 1, the matrices have the shapes
    /// described on `Maze` and that start and goal are valid cells.
    pub(crate) fn from_parts(rows: usize,
                             columns: usize,
                             horizontal_passages: PassageMatrix,
                             vertical_passages: PassageMatrix,
                             start: GridCoordinate,
                             goal: GridCoordinate)
                             -> Maze {
        debug_assert!(rows >= 1 && columns >= 1);
        debug_assert_eq!(horizontal_passages.rows(), RowsCount(rows - 1));
        debug_assert_eq!(horizontal_passages.columns(), ColumnsCount(columns));
        debug_assert_eq!(vertical_passages.rows(), RowsCount(rows));
        debug_assert_eq!(vertical_passages.columns(), ColumnsCount(columns - 1));

        Maze {
            rows,
            columns,
            horizontal_passages,
            vertical_passages,
            start,
            goal,
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

    /// Number of cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.rows * self.columns
    }

    #[inline]
    pub fn start(&self) -> GridCoordinate {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> GridCoordinate {
        self.goal
    }

    #[inline]
    pub fn horizontal_passages(&self) -> &PassageMatrix {
        &self.horizontal_passages
    }

    #[inline]
    pub fn vertical_passages(&self) -> &PassageMatrix {
        &self.vertical_passages
    }

    /// Number of open passages.
    #[inline]
    pub fn links_count(&self) -> usize {
        self.horizontal_passages.count_set() + self.vertical_passages.count_set()
    }

    /// Nodes and edges of the maze viewed as a graph, with every open passage an edge.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        (NodesCount(self.size()), EdgesCount(self.links_count()))
    }

    /// Is the grid coordinate within the maze's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        coord.row < self.rows && coord.column < self.columns
    }

    /// Convert a grid coordinate to a one dimensional row major index in the range 0..size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.row * self.columns + coord.column)
        } else {
            None
        }
    }

    pub fn neighbour_at_direction(&self,
                                  coord: GridCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<GridCoordinate> {
        offset_coordinate(coord, direction).filter(|neighbour| self.is_valid_coordinate(*neighbour))
    }

    /// Cells that are up, right, down or left of a cell, but not necessarily connected by a passage.
    pub fn neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        COMPASS_PRIMARY_DIRECTIONS.iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    /// Is there an open passage leading out of `coord` in the given direction?
    ///
    /// False at the maze boundary and for invalid coordinates.
    pub fn is_open(&self, coord: GridCoordinate, direction: CompassPrimary) -> bool {
        if !self.is_valid_coordinate(coord) {
            return false;
        }
        let (row, column) = (coord.row, coord.column);
        match direction {
            CompassPrimary::North => row > 0 && self.horizontal_passages.get(row - 1, column),
            CompassPrimary::South => self.horizontal_passages.get(row, column),
            CompassPrimary::East => self.vertical_passages.get(row, column),
            CompassPrimary::West => column > 0 && self.vertical_passages.get(row, column - 1),
        }
    }

    /// Are two cells connected directly by an open passage?
    pub fn is_linked(&self, a: GridCoordinate, b: GridCoordinate) -> bool {
        COMPASS_PRIMARY_DIRECTIONS.iter()
            .find(|dir| offset_coordinate(a, **dir) == Some(b))
            .map_or(false, |dir| self.is_open(a, *dir))
    }

    /// Cells connected to a particular cell by an open passage.
    /// Returns None for an invalid coordinate.
    pub fn links(&self, coord: GridCoordinate) -> Option<CoordinateSmallVec> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }

        let linked = COMPASS_PRIMARY_DIRECTIONS.iter()
            .filter(|dir| self.is_open(coord, **dir))
            .filter_map(|dir| offset_coordinate(coord, *dir))
            .collect();
        Some(linked)
    }

    /// All cells in row major order.
    pub fn iter(&self) -> impl Iterator<Item = GridCoordinate> {
        let columns = self.columns;
        (0..self.size()).map(move |index| GridCoordinate::from_row_major_index(index, columns))
    }

    /// The cells of each row, top row first.
    pub fn iter_row(&self) -> impl Iterator<Item = Vec<GridCoordinate>> {
        let columns = self.columns;
        (0..self.rows).map(move |row| {
            (0..columns).map(|column| GridCoordinate::new(row, column)).collect()
        })
    }

    /// Every open passage once, as the pair of cells it connects with the upper/left cell first.
    pub fn iter_links(&self) -> impl Iterator<Item = (GridCoordinate, GridCoordinate)> + '_ {
        let below = self.horizontal_passages
            .iter()
            .filter(|&(_, _, open)| open)
            .map(|(row, column, _)| {
                (GridCoordinate::new(row, column), GridCoordinate::new(row + 1, column))
            });
        let right = self.vertical_passages
            .iter()
            .filter(|&(_, _, open)| open)
            .map(|(row, column, _)| {
                (GridCoordinate::new(row, column), GridCoordinate::new(row, column + 1))
            });
        below.chain(right)
    }

    /// The maze as an undirected petgraph graph.
    ///
    /// Node `i` holds the cell with row major index `i`, and there is one edge per open passage.
    pub fn to_graph(&self) -> UnGraph<GridCoordinate, ()> {
        let (NodesCount(nodes), EdgesCount(edges)) = self.graph_size();
        let mut graph = UnGraph::with_capacity(nodes, edges);
        for coord in self.iter() {
            let _ = graph.add_node(coord);
        }
        let edge_indices = self.iter_links().filter_map(|(a, b)| {
            Some((self.grid_coordinate_to_index(a)?, self.grid_coordinate_to_index(b)?))
        });
        for (a_index, b_index) in edge_indices {
            let _ = graph.add_edge(NodeIndex::new(a_index), NodeIndex::new(b_index), ());
        }
        graph
    }
}

#[cfg(test)]
pub(crate) mod tests {

    use itertools::Itertools;
    use petgraph::algo::{connected_components, is_cyclic_undirected};

    use super::*;

    /// A maze with the given open passages, start at the top left and goal at the bottom right.
    pub(crate) fn maze_with_links(rows: usize,
                                  columns: usize,
                                  links: &[((usize, usize), (usize, usize))])
                                  -> Maze {
        let mut horizontal = PassageMatrix::new(RowsCount(rows - 1), ColumnsCount(columns));
        let mut vertical = PassageMatrix::new(RowsCount(rows), ColumnsCount(columns - 1));
        for &(a, b) in links {
            let (a, b) = (GridCoordinate::from(a), GridCoordinate::from(b));
            let (first, second) = if a < b { (a, b) } else { (b, a) };
            if first.row == second.row {
                assert_eq!(first.column + 1, second.column, "cells not adjacent");
                vertical.set(first.row, first.column, true);
            } else {
                assert_eq!(first.column, second.column, "cells not adjacent");
                assert_eq!(first.row + 1, second.row, "cells not adjacent");
                horizontal.set(first.row, first.column, true);
            }
        }
        Maze::from_parts(rows,
                         columns,
                         horizontal,
                         vertical,
                         GridCoordinate::new(0, 0),
                         GridCoordinate::new(rows - 1, columns - 1))
    }

    fn gc(row: usize, column: usize) -> GridCoordinate {
        GridCoordinate::new(row, column)
    }

    fn sorted_links(maze: &Maze, coord: GridCoordinate) -> Vec<GridCoordinate> {
        maze.links(coord).expect("coordinate is invalid").iter().cloned().sorted().collect()
    }

    #[test]
    fn neighbour_cells() {
        let maze = maze_with_links(10, 10, &[]);

        let check_expected_neighbours = |coord: GridCoordinate, expected: &[GridCoordinate]| {
            let actual: Vec<GridCoordinate> = maze.neighbours(coord).iter().cloned().sorted().collect();
            let expected: Vec<GridCoordinate> = expected.iter().cloned().sorted().collect();
            assert_eq!(actual, expected);
        };

        // corners
        check_expected_neighbours(gc(0, 0), &[gc(0, 1), gc(1, 0)]);
        check_expected_neighbours(gc(0, 9), &[gc(0, 8), gc(1, 9)]);
        check_expected_neighbours(gc(9, 0), &[gc(8, 0), gc(9, 1)]);
        check_expected_neighbours(gc(9, 9), &[gc(8, 9), gc(9, 8)]);

        // sides
        check_expected_neighbours(gc(0, 1), &[gc(0, 0), gc(1, 1), gc(0, 2)]);
        check_expected_neighbours(gc(8, 9), &[gc(7, 9), gc(9, 9), gc(8, 8)]);

        // inside the grid
        check_expected_neighbours(gc(1, 1), &[gc(0, 1), gc(1, 0), gc(2, 1), gc(1, 2)]);
    }

    #[test]
    fn neighbour_at_dir() {
        let maze = maze_with_links(2, 2, &[]);
        assert_eq!(maze.neighbour_at_direction(gc(0, 0), CompassPrimary::North), None);
        assert_eq!(maze.neighbour_at_direction(gc(0, 0), CompassPrimary::West), None);
        assert_eq!(maze.neighbour_at_direction(gc(0, 0), CompassPrimary::South), Some(gc(1, 0)));
        assert_eq!(maze.neighbour_at_direction(gc(0, 0), CompassPrimary::East), Some(gc(0, 1)));
        assert_eq!(maze.neighbour_at_direction(gc(1, 1), CompassPrimary::South), None);
        assert_eq!(maze.neighbour_at_direction(gc(1, 1), CompassPrimary::East), None);
        assert_eq!(maze.neighbour_at_direction(gc(1, 1), CompassPrimary::North), Some(gc(0, 1)));
        assert_eq!(maze.neighbour_at_direction(gc(1, 1), CompassPrimary::West), Some(gc(1, 0)));
    }

    #[test]
    fn passages_open_in_both_directions() {
        let maze = maze_with_links(3, 3, &[((0, 0), (0, 1)), ((1, 1), (0, 1)), ((2, 2), (2, 1))]);

        assert!(maze.is_open(gc(0, 0), CompassPrimary::East));
        assert!(maze.is_open(gc(0, 1), CompassPrimary::West));
        assert!(maze.is_open(gc(0, 1), CompassPrimary::South));
        assert!(maze.is_open(gc(1, 1), CompassPrimary::North));
        assert!(maze.is_open(gc(2, 1), CompassPrimary::East));
        assert!(maze.is_open(gc(2, 2), CompassPrimary::West));

        assert!(!maze.is_open(gc(0, 0), CompassPrimary::South));
        assert!(!maze.is_open(gc(0, 0), CompassPrimary::North));
        assert!(!maze.is_open(gc(2, 2), CompassPrimary::East));
        assert!(!maze.is_open(gc(5, 5), CompassPrimary::North));

        assert!(maze.is_linked(gc(0, 0), gc(0, 1)));
        assert!(maze.is_linked(gc(0, 1), gc(0, 0)));
        assert!(!maze.is_linked(gc(0, 0), gc(1, 1)));
        assert!(!maze.is_linked(gc(0, 0), gc(0, 0)));

        assert_eq!(sorted_links(&maze, gc(0, 1)), vec![gc(0, 0), gc(1, 1)]);
        assert_eq!(sorted_links(&maze, gc(1, 0)), vec![]);
        assert_eq!(maze.links(gc(3, 0)), None);
    }

    #[test]
    fn link_iteration_and_counts() {
        let maze = maze_with_links(2, 2, &[((0, 0), (0, 1)), ((0, 0), (1, 0)), ((1, 0), (1, 1))]);
        assert_eq!(maze.links_count(), 3);
        assert_eq!(maze.graph_size(), (NodesCount(4), EdgesCount(3)));

        let links: Vec<_> = maze.iter_links().sorted().collect();
        assert_eq!(links,
                   vec![(gc(0, 0), gc(0, 1)), (gc(0, 0), gc(1, 0)), (gc(1, 0), gc(1, 1))]);
        for (a, b) in links {
            assert!(maze.is_linked(a, b));
        }
    }

    #[test]
    fn cell_and_row_iteration() {
        let maze = maze_with_links(2, 3, &[]);
        assert_eq!(maze.iter().collect::<Vec<_>>(),
                   vec![gc(0, 0), gc(0, 1), gc(0, 2), gc(1, 0), gc(1, 1), gc(1, 2)]);
        assert_eq!(maze.iter_row().collect::<Vec<_>>(),
                   vec![vec![gc(0, 0), gc(0, 1), gc(0, 2)], vec![gc(1, 0), gc(1, 1), gc(1, 2)]]);
    }

    #[test]
    fn grid_coordinate_as_index() {
        let maze = maze_with_links(3, 3, &[]);
        let indices: Vec<Option<usize>> = maze.iter()
            .map(|coord| maze.grid_coordinate_to_index(coord))
            .collect();
        let expected = (0..9).map(Some).collect::<Vec<Option<usize>>>();
        assert_eq!(indices, expected);

        assert_eq!(maze.grid_coordinate_to_index(gc(3, 2)), None);
        assert_eq!(maze.grid_coordinate_to_index(gc(2, 3)), None);
        assert_eq!(maze.grid_coordinate_to_index(gc(usize::MAX, usize::MAX)), None);
    }

    #[test]
    fn petgraph_conversion() {
        let maze = maze_with_links(2, 2, &[((0, 0), (0, 1)), ((0, 1), (1, 1)), ((1, 1), (1, 0))]);
        let graph = maze.to_graph();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph[NodeIndex::new(3)], gc(1, 1));
        assert_eq!(connected_components(&graph), 1);
        assert!(!is_cyclic_undirected(&graph));

        let cycle = maze_with_links(2,
                                    2,
                                    &[((0, 0), (0, 1)), ((0, 1), (1, 1)), ((1, 1), (1, 0)),
                                      ((1, 0), (0, 0))]);
        assert!(is_cyclic_undirected(&cycle.to_graph()));
    }
}
