//! Printable renderings of a maze layout
//!
//! Text output draws one border segment per wall bit and labels the
//! entrance `IN` and the exit `OUT`, the same conventions the worksheet
//! page uses.

use maze_core::{Maze, Wall};
use serde::{Deserialize, Serialize};

use crate::MazeLayout;

/// Output format for a rendered maze
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Layout JSON (wall masks plus dimensions)
    #[default]
    Json,
    /// ASCII drawing with entrance and exit labels
    Text,
    /// 0/1 grid, 0=wall and 1=path, (2h+1) x (2w+1)
    Binary,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            "binary" => Ok(OutputFormat::Binary),
            _ => Err(format!("Invalid output format: '{}'. Must be 'json', 'text', or 'binary'", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Binary => write!(f, "binary"),
        }
    }
}

const ENTRANCE_LABEL: &str = "IN ";
const EXIT_LABEL: &str = "OUT";
const EMPTY_LABEL: &str = "   ";

/// Draw the maze as ASCII art
///
/// Each cell is three characters wide; corners are `+`, horizontal walls
/// `---` and vertical walls `|`.
pub fn render_text(maze: &Maze) -> String {
    let (width, height) = (maze.width(), maze.height());
    let exit = maze.exit();
    let mut out = String::with_capacity((width * 4 + 2) * (height * 2 + 1));

    for row in 0..height {
        for col in 0..width {
            out.push('+');
            out.push_str(if maze.has_wall(row, col, Wall::North) { "---" } else { "   " });
        }
        out.push_str("+\n");

        for col in 0..width {
            out.push(if maze.has_wall(row, col, Wall::West) { '|' } else { ' ' });
            out.push_str(if (row, col) == maze.entrance() {
                ENTRANCE_LABEL
            } else if (row, col) == exit {
                EXIT_LABEL
            } else {
                EMPTY_LABEL
            });
        }
        out.push(if maze.has_wall(row, width - 1, Wall::East) { '|' } else { ' ' });
        out.push('\n');
    }

    for col in 0..width {
        out.push('+');
        out.push_str(if maze.has_wall(height - 1, col, Wall::South) { "---" } else { "   " });
    }
    out.push_str("+\n");

    out
}

fn render_binary(maze: &Maze) -> String {
    maze.to_binary_grid_vec()
        .iter()
        .map(|row| row.iter().map(|&cell| if cell == 1 { '1' } else { '0' }).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a layout in the requested format
///
/// The layout is validated first, so a tampered grid never reaches the page.
pub fn render_layout(layout: &MazeLayout, format: OutputFormat) -> Result<String, Box<dyn std::error::Error>> {
    let maze = layout.to_maze()?;

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(layout)?,
        OutputFormat::Text => render_text(&maze),
        OutputFormat::Binary => render_binary(&maze),
    };

    Ok(rendered)
}
