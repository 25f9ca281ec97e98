//! Static geometry for a maze: axis aligned rectangles for the walls and goal, a circle for the ball.
//!
//! Coordinates are in the canvas space of a physics or rendering backend, x to the right and y
//! down, with every cell a `cell_size` square. Shapes are described by their centre, which is
//! how most 2d physics engines place bodies.

use std::fmt;

use crate::cells::GridCoordinate;
use crate::maze::Maze;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BodyLabel {
    /// Outer edge of the canvas.
    Boundary,
    /// A closed passage between two cells.
    Wall,
    Goal,
    Ball,
}

impl fmt::Display for BodyLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            BodyLabel::Boundary => "boundary",
            BodyLabel::Wall => "wall",
            BodyLabel::Goal => "goal",
            BodyLabel::Ball => "ball",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rectangle {
    pub label: BodyLabel,
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub fn new(label: BodyLabel, center_x: f64, center_y: f64, width: f64, height: f64) -> Rectangle {
        Rectangle {
            label,
            center_x,
            center_y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.center_x - self.width / 2.0
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.center_x + self.width / 2.0
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.center_y - self.height / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.center_y + self.height / 2.0
    }

    /// Edges count as inside.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.left() && x <= self.right() && y >= self.top() && y <= self.bottom()
    }

    /// Does the circle overlap the rectangle, touching included?
    pub fn intersects_circle(&self, circle: &Circle) -> bool {
        let nearest_x = circle.center_x.max(self.left()).min(self.right());
        let nearest_y = circle.center_y.max(self.top()).min(self.bottom());
        let (dx, dy) = (circle.center_x - nearest_x, circle.center_y - nearest_y);
        dx * dx + dy * dy <= circle.radius * circle.radius
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Circle {
    pub label: BodyLabel,
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

/// Sizes used to lay out maze geometry.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeometryOptions {
    cell_size: f64,
    wall_thickness: f64,
    boundary_thickness: f64,
    goal_scale: f64,
    ball_radius_scale: f64,
}

impl GeometryOptions {
    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    #[inline]
    pub fn wall_thickness(&self) -> f64 {
        self.wall_thickness
    }

    #[inline]
    pub fn boundary_thickness(&self) -> f64 {
        self.boundary_thickness
    }

    /// Side of the goal square as a fraction of the cell size.
    #[inline]
    pub fn goal_scale(&self) -> f64 {
        self.goal_scale
    }

    /// Ball radius as a fraction of the cell size.
    #[inline]
    pub fn ball_radius_scale(&self) -> f64 {
        self.ball_radius_scale
    }
}

impl Default for GeometryOptions {
    fn default() -> GeometryOptions {
        GeometryOptionsBuilder::new().build()
    }
}

pub struct GeometryOptionsBuilder {
    options: GeometryOptions,
}

impl GeometryOptionsBuilder {
    pub fn new() -> GeometryOptionsBuilder {
        GeometryOptionsBuilder {
            options: GeometryOptions {
                cell_size: 200.0,
                wall_thickness: 5.0,
                boundary_thickness: 2.0,
                goal_scale: 0.7,
                ball_radius_scale: 0.25,
            },
        }
    }
    pub fn cell_size(mut self, cell_size: f64) -> GeometryOptionsBuilder {
        self.options.cell_size = cell_size;
        self
    }
    pub fn wall_thickness(mut self, wall_thickness: f64) -> GeometryOptionsBuilder {
        self.options.wall_thickness = wall_thickness;
        self
    }
    pub fn boundary_thickness(mut self, boundary_thickness: f64) -> GeometryOptionsBuilder {
        self.options.boundary_thickness = boundary_thickness;
        self
    }
    pub fn goal_scale(mut self, goal_scale: f64) -> GeometryOptionsBuilder {
        self.options.goal_scale = goal_scale;
        self
    }
    pub fn ball_radius_scale(mut self, ball_radius_scale: f64) -> GeometryOptionsBuilder {
        self.options.ball_radius_scale = ball_radius_scale;
        self
    }
    pub fn build(self) -> GeometryOptions {
        self.options
    }
}

impl Default for GeometryOptionsBuilder {
    fn default() -> GeometryOptionsBuilder {
        GeometryOptionsBuilder::new()
    }
}

/// Everything a physics backend needs to build a playable maze: static boundary and wall bodies,
/// a static goal marker in the goal cell and a movable ball in the start cell.
#[derive(Debug, Clone, PartialEq)]
pub struct MazeGeometry {
    width: f64,
    height: f64,
    cell_size: f64,
    boundaries: Vec<Rectangle>,
    walls: Vec<Rectangle>,
    goal: Rectangle,
    ball: Circle,
}

impl MazeGeometry {
    pub fn from_maze(maze: &Maze, options: &GeometryOptions) -> MazeGeometry {
        let unit = options.cell_size;
        let width = maze.columns().0 as f64 * unit;
        let height = maze.rows().0 as f64 * unit;

        let boundary = options.boundary_thickness;
        let boundaries = vec![
            // up
            Rectangle::new(BodyLabel::Boundary, width / 2.0, 0.0, width, boundary),
            // down
            Rectangle::new(BodyLabel::Boundary, width / 2.0, height, width, boundary),
            // left
            Rectangle::new(BodyLabel::Boundary, 0.0, height / 2.0, boundary, height),
            // right
            Rectangle::new(BodyLabel::Boundary, width, height / 2.0, boundary, height),
        ];

        let wall = options.wall_thickness;
        let below_walls = maze.horizontal_passages()
            .iter()
            .filter(|&(_, _, open)| !open)
            .map(|(row, column, _)| {
                Rectangle::new(BodyLabel::Wall,
                               column as f64 * unit + unit / 2.0,
                               row as f64 * unit + unit,
                               unit,
                               wall)
            });
        let right_walls = maze.vertical_passages()
            .iter()
            .filter(|&(_, _, open)| !open)
            .map(|(row, column, _)| {
                Rectangle::new(BodyLabel::Wall,
                               column as f64 * unit + unit,
                               row as f64 * unit + unit / 2.0,
                               wall,
                               unit)
            });
        let walls = below_walls.chain(right_walls).collect();

        let (goal_x, goal_y) = cell_centre(maze.goal(), unit);
        let goal_side = unit * options.goal_scale;
        let goal = Rectangle::new(BodyLabel::Goal, goal_x, goal_y, goal_side, goal_side);

        let (ball_x, ball_y) = cell_centre(maze.start(), unit);
        let ball = Circle {
            label: BodyLabel::Ball,
            center_x: ball_x,
            center_y: ball_y,
            radius: unit * options.ball_radius_scale,
        };

        MazeGeometry {
            width,
            height,
            cell_size: unit,
            boundaries,
            walls,
            goal,
            ball,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[inline]
    pub fn boundaries(&self) -> &[Rectangle] {
        &self.boundaries
    }

    /// One wall per closed passage.
    #[inline]
    pub fn walls(&self) -> &[Rectangle] {
        &self.walls
    }

    #[inline]
    pub fn goal(&self) -> &Rectangle {
        &self.goal
    }

    /// The ball at its starting position.
    #[inline]
    pub fn ball(&self) -> &Circle {
        &self.ball
    }

    /// Every static body: boundaries, walls then the goal.
    pub fn static_bodies(&self) -> impl Iterator<Item = &Rectangle> {
        self.boundaries.iter().chain(self.walls.iter()).chain(Some(&self.goal))
    }

    /// Would the ball, moved to `(x, y)`, be touching the goal?
    pub fn is_ball_at_goal(&self, x: f64, y: f64) -> bool {
        let moved_ball = Circle {
            center_x: x,
            center_y: y,
            ..self.ball
        };
        self.goal.intersects_circle(&moved_ball)
    }

    /// The maze cell containing a canvas point, None outside the maze.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<GridCoordinate> {
        if x < 0.0 || y < 0.0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(GridCoordinate::new((y / self.cell_size) as usize, (x / self.cell_size) as usize))
    }
}

fn cell_centre(coord: GridCoordinate, unit: f64) -> (f64, f64) {
    (coord.column as f64 * unit + unit / 2.0, coord.row as f64 * unit + unit / 2.0)
}
