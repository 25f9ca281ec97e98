use docopt::Docopt;
use error_chain::bail;
use log::{debug, info};
use mazes::{
    cells::GridCoordinate,
    generators::MazeGenerator,
    geometry::{GeometryOptionsBuilder, MazeGeometry},
    grid_displays::{GridDisplay, MarkedDisplay, MazeTextRender, PathDisplay, StartEndPointsDisplay},
    maze::Maze,
    pathing,
    units::{ColumnsCount, RowsCount},
};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Mazes

Usage:
    mazes_driver -h | --help
    mazes_driver [text] [options]
    mazes_driver geometry [options]

Options:
    -h --help                 Show this screen.
    --grid-size=<n>           The grid size is n * n, overriding rows and columns.
    --rows=<r>                Number of cell rows in the maze [default: 10].
    --columns=<c>             Number of cell columns in the maze [default: 10].
    --seed=<s>                Seed for the random number generator. A random seed is used and logged if not given.
    --start-row=<r>           Row of the cell the maze is carved from. Random if not given.
    --start-column=<c>        Column of the cell the maze is carved from. Random if not given.
    --goal-row=<r>            Row of the goal cell. Defaults to the bottom row.
    --goal-column=<c>         Column of the goal cell. Defaults to the right most column.
    --show-path               Mark the path from the start to the goal in a text rendering.
    --show-distances          Show the distance from the start to every other cell in a text rendering.
    --text-out=<path>         Write the text or geometry output to a file instead of stdout.
    --cell-size=<n>           Side length of one cell for geometry output [default: 200].
    --wall-thickness=<n>      Thickness of the walls for geometry output [default: 5].
    --save-edges=<path>       Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    cmd_geometry: bool,
    flag_grid_size: Option<usize>,
    flag_rows: usize,
    flag_columns: usize,
    flag_seed: Option<u64>,
    flag_start_row: Option<usize>,
    flag_start_column: Option<usize>,
    flag_goal_row: Option<usize>,
    flag_goal_column: Option<usize>,
    flag_show_path: bool,
    flag_show_distances: bool,
    flag_text_out: String,
    flag_cell_size: f64,
    flag_wall_thickness: f64,
    flag_save_edges: String,
}

// Create the Error, ErrorKind, ResultExt, and Result types with error_chain
mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            Io(::std::io::Error);
            Generation(::mazes::generators::GenerationError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    env_logger::init();

    let args = parse_args(std::env::args()).unwrap_or_else(|e| e.exit());
    debug!("{:?}", args);

    let generator = maze_generator(&args)?;

    let seed = args.flag_seed.unwrap_or_else(rand::random);
    info!("Generating a {}x{} maze with seed {}",
          generator.rows().0,
          generator.columns().0,
          seed);
    let mut rng = XorShiftRng::seed_from_u64(seed);
    let maze = generator.generate(&mut rng)?;

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(&maze, &args.flag_save_edges)?;
    }

    let output = if args.cmd_geometry {
        render_geometry(&maze, &args)
    } else {
        render_text(&maze, &args)?
    };

    if args.flag_text_out.is_empty() {
        print!("{}", output);
    } else {
        write_text_to_file(&output, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
        info!("Wrote maze to {}", args.flag_text_out);
    }

    Ok(())
}

fn parse_args<I, S>(argv: I) -> ::std::result::Result<MazeArgs, docopt::Error>
    where I: IntoIterator<Item = S>,
          S: AsRef<str>
{
    Docopt::new(USAGE).and_then(|d| d.argv(argv).deserialize())
}

/// The generator configured by the grid size and the start and goal placement arguments.
fn maze_generator(args: &MazeArgs) -> Result<MazeGenerator> {

    let (rows, columns) = if let Some(square_grid_size) = args.flag_grid_size {
        (square_grid_size, square_grid_size)
    } else {
        (args.flag_rows, args.flag_columns)
    };

    let mut generator = MazeGenerator::new(RowsCount(rows), ColumnsCount(columns))?;
    if let Some(start) = optional_cell("start", args.flag_start_row, args.flag_start_column)? {
        generator = generator.start(start);
    }
    if let Some(goal) = optional_cell("goal", args.flag_goal_row, args.flag_goal_column)? {
        generator = generator.goal(goal);
    }
    Ok(generator)
}

/// A cell from a row and column argument pair, both or neither must be given.
fn optional_cell(name: &str,
                 row: Option<usize>,
                 column: Option<usize>)
                 -> Result<Option<GridCoordinate>> {
    match (row, column) {
        (Some(r), Some(c)) => Ok(Some(GridCoordinate::new(r, c))),
        (None, None) => Ok(None),
        _ => bail!("Both the {0} row and {0} column are required to place the {0} cell.", name),
    }
}

/// Box drawing rendering, with cell bodies showing the start and goal, the solution path or the
/// distances from the start.
fn render_text(maze: &Maze, maze_args: &MazeArgs) -> Result<String> {

    let markers = StartEndPointsDisplay::for_maze(maze);

    let rendered = if maze_args.flag_show_distances {

        let distances = pathing::Distances::<u32>::new(maze, maze.start())
            .ok_or("Invalid start coordinate from which to show path distances.")?;
        MazeTextRender::new(maze, Some(&distances as &dyn GridDisplay)).to_string()

    } else if maze_args.flag_show_path {

        let path = pathing::solution_path(maze)
            .ok_or("No route from the start to the goal, the maze is not perfect.")?;
        let path_display = PathDisplay::new(&path);
        let marked_path = MarkedDisplay::new(markers, &path_display);
        MazeTextRender::new(maze, Some(&marked_path as &dyn GridDisplay)).to_string()

    } else {
        MazeTextRender::new(maze, Some(&markers as &dyn GridDisplay)).to_string()
    };

    Ok(rendered)
}

/// One line per body: `label centre_x centre_y width height` for rectangles and
/// `ball centre_x centre_y radius` for the ball.
fn render_geometry(maze: &Maze, maze_args: &MazeArgs) -> String {

    let options = GeometryOptionsBuilder::new()
        .cell_size(maze_args.flag_cell_size)
        .wall_thickness(maze_args.flag_wall_thickness)
        .build();
    let geometry = MazeGeometry::from_maze(maze, &options);

    let mut output = String::new();
    for body in geometry.static_bodies() {
        output.push_str(&format!("{} {} {} {} {}\n",
                                 body.label,
                                 body.center_x,
                                 body.center_y,
                                 body.width,
                                 body.height));
    }
    let ball = geometry.ball();
    output.push_str(&format!("{} {} {} {}\n",
                             ball.label,
                             ball.center_x,
                             ball.center_y,
                             ball.radius));
    output
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze: &Maze, file_path: &str) -> Result<()> {

    let mut graph_data = String::new();
    graph_data.push_str(&format!("{} {}\n", maze.size(), maze.links_count()));

    for (src, dst) in maze.iter_links() {
        let index_a = maze.grid_coordinate_to_index(src)
            .ok_or("Links iter should give valid coordinates")?;
        let index_b = maze.grid_coordinate_to_index(dst)
            .ok_or("Links iter should give valid coordinates")?;
        graph_data.push_str(&format!("{} {}\n", index_a + 1, index_b + 1));
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;
    info!("Saved {} maze passages to {}", maze.links_count(), file_path);

    Ok(())
}
