use std::fmt;

use crate::cells::{CompassPrimary, GridCoordinate};
use crate::maze::Maze;
use crate::pathing::{Distances, MaxDistance};
use crate::utils;
use crate::utils::FnvHashSet;

pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, _: GridCoordinate) -> String {
        String::from("   ")
    }
}

impl<MaxDistanceT: MaxDistance> GridDisplay for Distances<MaxDistanceT> {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if let Some(d) = self.distance_from_start_to(coord) {
            // centre align, padding 3, lowercase hexadecimal
            format!("{:^3x}", d)
        } else {
            String::from("   ")
        }
    }
}

#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<GridCoordinate>,
}
impl PathDisplay {
    pub fn new(path: &[GridCoordinate]) -> Self {
        let mut on_path_coordinates = utils::fnv_hashset(path.len());
        on_path_coordinates.extend(path.iter().cloned());
        PathDisplay { on_path_coordinates }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}

#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start_coordinate: GridCoordinate,
    end_coordinate: GridCoordinate,
}
impl StartEndPointsDisplay {
    pub fn new(start: GridCoordinate, end: GridCoordinate) -> StartEndPointsDisplay {
        StartEndPointsDisplay {
            start_coordinate: start,
            end_coordinate: end,
        }
    }

    pub fn for_maze(maze: &Maze) -> StartEndPointsDisplay {
        StartEndPointsDisplay::new(maze.start(), maze.goal())
    }
}
impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if coord == self.start_coordinate {
            String::from(" S ")
        } else if coord == self.end_coordinate {
            String::from(" E ")
        } else {
            String::from("   ")
        }
    }
}

/// Start and end markers drawn over any other cell display, e.g. a path.
pub struct MarkedDisplay<'a> {
    markers: StartEndPointsDisplay,
    underlay: &'a dyn GridDisplay,
}
impl<'a> MarkedDisplay<'a> {
    pub fn new(markers: StartEndPointsDisplay, underlay: &'a dyn GridDisplay) -> MarkedDisplay<'a> {
        MarkedDisplay { markers, underlay }
    }
}
impl<'a> GridDisplay for MarkedDisplay<'a> {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        let marker = self.markers.render_cell_body(coord);
        if marker.trim().is_empty() {
            self.underlay.render_cell_body(coord)
        } else {
            marker
        }
    }
}

/// Box drawing text rendering of a maze, with cell bodies filled in by an optional `GridDisplay`.
pub struct MazeTextRender<'a> {
    maze: &'a Maze,
    grid_display: Option<&'a dyn GridDisplay>,
}

impl<'a> MazeTextRender<'a> {
    pub fn new(maze: &'a Maze, grid_display: Option<&'a dyn GridDisplay>) -> MazeTextRender<'a> {
        MazeTextRender { maze, grid_display }
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&MazeTextRender::new(self, None), f)
    }
}

impl<'a> fmt::Display for MazeTextRender<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const WALL_L: &str = "╴";
        const WALL_R: &str = "╶";
        const WALL_U: &str = "╵";
        const WALL_D: &str = "╷";
        const WALL_LR_3: &str = "───";
        const WALL_LR: &str = "─";
        const WALL_UD: &str = "│";
        const WALL_LD: &str = "┐";
        const WALL_RU: &str = "└";
        const WALL_LU: &str = "┘";
        const WALL_RD: &str = "┌";
        const WALL_LRU: &str = "┴";
        const WALL_LRD: &str = "┬";
        const WALL_LRUD: &str = "┼";
        const WALL_RUD: &str = "├";
        const WALL_LUD: &str = "┤";
        let default_cell_body = String::from("   ");

        let maze = self.maze;
        let columns_count = maze.columns().0;
        let rows_count = maze.rows().0;

        // Start by special case rendering the text for the north most boundary
        let mut output = String::from(WALL_RD);
        for column in 0..columns_count {
            output.push_str(WALL_LR_3);
            let coord = GridCoordinate::new(0, column);
            if maze.is_open(coord, CompassPrimary::East) {
                output.push_str(WALL_LR);
            } else if column == columns_count - 1 {
                output.push_str(WALL_LD);
            } else {
                output.push_str(WALL_LRD);
            }
        }
        output.push('\n');

        for (index_row, row) in maze.iter_row().enumerate() {

            let is_last_row = index_row == (rows_count - 1);

            // The west most boundary of the row is a special case.
            // The top section of the cell is done by the previous row.
            let mut row_middle_section_render = String::from(WALL_UD);
            let mut row_bottom_section_render = String::new();

            for (index_column, cell_coord) in row.into_iter().enumerate() {

                let is_first_column = index_column == 0;
                let is_last_column = index_column == (columns_count - 1);
                let east_open = maze.is_open(cell_coord, CompassPrimary::East);
                let south_open = maze.is_open(cell_coord, CompassPrimary::South);

                // Each cell uses the southern wall of the cell above it as its own northern wall,
                // so only the cell's body, its eastern boundary ('|') and its southern boundary
                // ('---+') minus the south west corner are drawn here.
                match self.grid_display {
                    Some(displayer) => {
                        row_middle_section_render.push_str(&displayer.render_cell_body(cell_coord))
                    }
                    None => row_middle_section_render.push_str(&default_cell_body),
                }
                row_middle_section_render.push_str(if east_open { " " } else { WALL_UD });

                if is_first_column {
                    row_bottom_section_render = if is_last_row {
                        String::from(WALL_RU)
                    } else if south_open {
                        String::from(WALL_UD)
                    } else {
                        String::from(WALL_RUD)
                    };
                }
                row_bottom_section_render.push_str(if south_open { "   " } else { WALL_LR_3 });

                let corner = match (is_last_row, is_last_column) {
                    (true, true) => WALL_LU,
                    (true, false) => if east_open { WALL_LR } else { WALL_LRU },
                    (false, true) => if south_open { WALL_UD } else { WALL_LUD },
                    (false, false) => {
                        let access_se_from_east =
                            maze.neighbour_at_direction(cell_coord, CompassPrimary::East)
                                .map_or(false, |c| maze.is_open(c, CompassPrimary::South));
                        let access_se_from_south =
                            maze.neighbour_at_direction(cell_coord, CompassPrimary::South)
                                .map_or(false, |c| maze.is_open(c, CompassPrimary::East));
                        let show_right_section = !access_se_from_east;
                        let show_down_section = !access_se_from_south;
                        let show_up_section = !east_open;
                        let show_left_section = !south_open;

                        match (show_left_section,
                               show_right_section,
                               show_up_section,
                               show_down_section) {
                            (true, true, true, true) => WALL_LRUD,
                            (true, true, true, false) => WALL_LRU,
                            (true, true, false, true) => WALL_LRD,
                            (true, false, true, true) => WALL_LUD,
                            (false, true, true, true) => WALL_RUD,
                            (true, true, false, false) => WALL_LR,
                            (false, false, true, true) => WALL_UD,
                            (false, true, true, false) => WALL_RU,
                            (true, false, false, true) => WALL_LD,
                            (true, false, true, false) => WALL_LU,
                            (false, true, false, true) => WALL_RD,
                            (true, false, false, false) => WALL_L,
                            (false, true, false, false) => WALL_R,
                            (false, false, true, false) => WALL_U,
                            (false, false, false, true) => WALL_D,
                            _ => " ",
                        }
                    }
                };

                row_bottom_section_render.push_str(corner);
            }

            output.push_str(&row_middle_section_render);
            output.push('\n');
            output.push_str(&row_bottom_section_render);
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::maze::tests::maze_with_links;

    fn gc(row: usize, column: usize) -> GridCoordinate {
        GridCoordinate::new(row, column)
    }

    #[test]
    fn single_cell_render() {
        let maze = maze_with_links(1, 1, &[]);
        assert_eq!(maze.to_string(), "┌───┐\n│   │\n└───┘\n");
    }

    #[test]
    fn corridor_render() {
        let maze = maze_with_links(1, 3, &[((0, 0), (0, 1)), ((0, 1), (0, 2))]);
        assert_eq!(maze.to_string(),
                   "┌───────────┐\n\
                    │           │\n\
                    └───────────┘\n");
    }

    #[test]
    fn two_by_two_render() {
        // Open everywhere except between the two bottom cells.
        let maze = maze_with_links(2, 2, &[((0, 0), (0, 1)), ((0, 0), (1, 0)), ((0, 1), (1, 1))]);
        assert_eq!(maze.to_string(),
                   "┌───────┐\n\
                    │       │\n\
                    │   ╷   │\n\
                    │   │   │\n\
                    └───┴───┘\n");
    }

    #[test]
    fn cell_bodies_from_display() {
        let maze = maze_with_links(1, 2, &[((0, 0), (0, 1))]);
        let markers = StartEndPointsDisplay::for_maze(&maze);
        let rendered = MazeTextRender::new(&maze, Some(&markers as &dyn GridDisplay)).to_string();
        assert_eq!(rendered, "┌───────┐\n│ S   E │\n└───────┘\n");

        let path = PathDisplay::new(&[gc(0, 0), gc(0, 1)]);
        let rendered = MazeTextRender::new(&maze, Some(&path as &dyn GridDisplay)).to_string();
        assert_eq!(rendered, "┌───────┐\n│ .   . │\n└───────┘\n");

        let marked_path = MarkedDisplay::new(StartEndPointsDisplay::new(gc(0, 0), gc(5, 5)), &path);
        assert_eq!(marked_path.render_cell_body(gc(0, 0)), " S ");
        assert_eq!(marked_path.render_cell_body(gc(0, 1)), " . ");
    }

    #[test]
    fn distances_display_as_hex() {
        let links: Vec<((usize, usize), (usize, usize))> = (0..11)
            .map(|column| ((0, column), (0, column + 1)))
            .collect();
        let maze = maze_with_links(1, 12, &links);
        let distances = Distances::<u32>::new(&maze, gc(0, 0)).unwrap();
        assert_eq!(distances.render_cell_body(gc(0, 0)), " 0 ");
        assert_eq!(distances.render_cell_body(gc(0, 11)), " b ");
        assert_eq!(distances.render_cell_body(gc(3, 3)), "   ");
    }
}
