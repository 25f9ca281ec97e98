//! **mazes** generates perfect mazes on rectangular grids with a randomised depth first traversal,
//! and describes them as passages, text or wall geometry.

pub mod cells;
pub mod generators;
pub mod geometry;
pub mod grid_displays;
pub mod maze;
pub mod passages;
pub mod pathing;
pub mod random;
pub mod units;
mod utils;
