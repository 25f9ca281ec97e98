//! Distances and routes through a maze.
//!
//! Passages all have the same length, so a breadth first flood fill from a cell gives the shortest
//! distance to every reachable cell. Paths are recovered by walking back downhill from the end.

use std::fmt::{Debug, Display, LowerHex};
use std::ops::Add;

use itertools::Itertools;
use num::traits::{Bounded, One, Unsigned, Zero};
use smallvec::SmallVec;

use crate::cells::GridCoordinate;
use crate::maze::Maze;
use crate::utils;
use crate::utils::FnvHashMap;

// Trait (hack) used purely as a generic type parameter alias because it looks ugly to type this out each time
pub trait MaxDistance
    : Zero + One + Bounded + Unsigned + Add + Debug + Clone + Copy + Display + LowerHex + Ord
    {
}
impl<T: Zero + One + Bounded + Unsigned + Add + Debug + Clone + Copy + Display + LowerHex + Ord> MaxDistance for T {}

#[derive(Debug, Clone)]
pub struct Distances<MaxDistanceT = u32> {
    start_coordinate: GridCoordinate,
    distances: FnvHashMap<GridCoordinate, MaxDistanceT>,
    max_distance: MaxDistanceT,
}

impl<MaxDistanceT: MaxDistance> Distances<MaxDistanceT> {
    /// Flood fill out from `start_coordinate` along open passages.
    ///
    /// Returns None if the start is not a cell of the maze. Unreachable cells get no distance.
    pub fn new(maze: &Maze, start_coordinate: GridCoordinate) -> Option<Distances<MaxDistanceT>> {

        if !maze.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = Zero::zero();
        let mut distances = utils::fnv_hashmap(maze.size());
        distances.insert(start_coordinate, Zero::zero());

        // The distances map doubles as the visited set: every passage is one step long, so the first
        // distance recorded for a cell is already its shortest.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell: MaxDistanceT = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for link_coordinate in maze.links(*cell_coord).iter().flatten() {
                    if !distances.contains_key(link_coordinate) {
                        distances.insert(*link_coordinate, distance_to_cell + One::one());
                        new_frontier.push(*link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> GridCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> MaxDistanceT {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: GridCoordinate) -> Option<MaxDistanceT> {
        self.distances.get(&coord).cloned()
    }

    /// Number of cells reachable from the start, the start included.
    #[inline]
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    /// The cells at the maximum distance from the start, in row major order.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[GridCoordinate; 8]> {
        let furthest_distance = self.max();
        self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .sorted()
            .collect()
    }
}

/// The route from the start of `distances_from_start` to `end_point`, both ends included.
///
/// Returns None if the end point is unreachable.
pub fn shortest_path<MaxDistanceT: MaxDistance>(maze: &Maze,
                                                distances_from_start: &Distances<MaxDistanceT>,
                                                end_point: GridCoordinate)
                                                -> Option<Vec<GridCoordinate>> {

    distances_from_start.distance_from_start_to(end_point)?;

    let mut path = vec![end_point];
    let start = distances_from_start.start();
    let mut current_coord = end_point;

    while current_coord != start {

        let current_distance_to_start = distances_from_start.distance_from_start_to(current_coord)?;

        let closest_to_start = maze.links(current_coord)?
            .iter()
            .filter_map(|coord| {
                distances_from_start.distance_from_start_to(*coord).map(|distance| (*coord, distance))
            })
            .min_by_key(|&(_, distance)| distance);

        match closest_to_start {
            Some((closer_coord, closer_distance)) if closer_distance < current_distance_to_start => {
                current_coord = closer_coord;
                path.push(current_coord);
            }
            // No linked neighbour gets any closer to the start, the distances are not for this maze.
            _ => return None,
        }
    }

    path.reverse();
    Some(path)
}

/// The longest path in a perfect maze.
///
/// The cell furthest from any arbitrary cell is one end of the longest path, and the cell furthest
/// from that end is the other. Only holds for perfect mazes.
pub fn longest_path<MaxDistanceT: MaxDistance>(maze: &Maze) -> Option<Vec<GridCoordinate>> {
    let arbitrary_start_point = GridCoordinate::new(0, 0);
    let first_distances = Distances::<MaxDistanceT>::new(maze, arbitrary_start_point)?;

    let long_path_start_coordinate = *first_distances.furthest_points_on_grid().first()?;

    let distances_from_start = Distances::<MaxDistanceT>::new(maze, long_path_start_coordinate)?;
    let end_point = *distances_from_start.furthest_points_on_grid().first()?;

    shortest_path(maze, &distances_from_start, end_point)
}

/// The route from the maze's start cell to its goal cell.
pub fn solution_path(maze: &Maze) -> Option<Vec<GridCoordinate>> {
    let distances = Distances::<u32>::new(maze, maze.start())?;
    shortest_path(maze, &distances, maze.goal())
}
