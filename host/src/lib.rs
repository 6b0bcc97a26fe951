use maze_core::{Maze, SimpleLCG, DEFAULT_HEIGHT, DEFAULT_SEED, DEFAULT_WIDTH};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

pub mod render;

pub use render::{render_layout, render_text, OutputFormat};

/// Largest layout file accepted by [`load_layout`] (1 MB)
pub const MAX_LAYOUT_FILE_SIZE: u64 = 1_048_576;

/// Maze settings as sent by the worksheet content service
///
/// Mirrors the `mazeConfig` object of a maze section. Every field is an
/// optional JSON number or numeric string; a missing, zero, NaN, or
/// unparseable value selects the default (12 x 12, seed 12345).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_number")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_number")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_number")]
    pub seed: Option<f64>,
}

/// Accept `12`, `12.5`, or `"12"`; anything else counts as not supplied
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// Integer inputs handed to the maze builder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeRequest {
    pub width: i64,
    pub height: i64,
    /// Starting generator state; the zero-seed fallback is already applied
    pub seed: u32,
}

impl MazeConfig {
    pub fn new(width: i64, height: i64, seed: i64) -> Self {
        Self {
            width: Some(width as f64),
            height: Some(height as f64),
            seed: Some(seed as f64),
        }
    }

    /// Apply defaults and truncate to integers
    ///
    /// Dimensions are truncated toward zero (saturating at the i64 range);
    /// the builder clamps them afterwards. Seeds are truncated and reduced
    /// modulo 2^32, so negative seeds wrap. Only a seed that is missing or
    /// zero before wrapping gets the default; 2^32 wraps to a state of 0.
    pub fn to_request(&self) -> MazeRequest {
        MazeRequest {
            width: present(self.width).map_or(DEFAULT_WIDTH, |w| w.trunc() as i64),
            height: present(self.height).map_or(DEFAULT_HEIGHT, |h| h.trunc() as i64),
            seed: present(self.seed).map_or(DEFAULT_SEED, |s| {
                (s.trunc() as i64).rem_euclid(1 << 32) as u32
            }),
        }
    }
}

/// A value the content service actually supplied (not missing, zero, or NaN)
fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

/// A generated maze in the shape the worksheet renderer consumes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MazeLayout {
    /// Clamped number of columns
    pub safe_width: usize,

    /// Clamped number of rows
    pub safe_height: usize,

    /// Generator state the maze was carved from (after the zero fallback)
    pub seed: u32,

    /// Row-major wall masks: North=1, East=2, South=4, West=8
    pub grid: Vec<Vec<u8>>,

    /// Entrance cell as [row, col]
    pub entrance: [usize; 2],

    /// Exit cell as [row, col]
    pub exit: [usize; 2],
}

impl MazeLayout {
    /// Layout for a built maze; `seed` is the state the generator started from
    pub fn from_maze(maze: &Maze, seed: u32) -> Self {
        let (er, ec) = maze.exit();
        Self {
            safe_width: maze.width(),
            safe_height: maze.height(),
            seed,
            grid: maze.to_rows(),
            entrance: [0, 0],
            exit: [er, ec],
        }
    }

    /// Rebuild the maze behind this layout, checking it is a perfect maze
    ///
    /// Also checks the recorded dimensions and the entrance/exit convention,
    /// which renderers rely on.
    pub fn to_maze(&self) -> Result<Maze, Box<dyn std::error::Error>> {
        let maze = Maze::from_rows(self.grid.as_slice())?;

        if maze.width() != self.safe_width || maze.height() != self.safe_height {
            return Err(format!(
                "Layout claims {}x{} but grid is {}x{}",
                self.safe_width,
                self.safe_height,
                maze.width(),
                maze.height()
            )
            .into());
        }

        let (er, ec) = maze.exit();
        if self.entrance != [0, 0] || self.exit != [er, ec] {
            return Err(format!(
                "Entrance must be [0, 0] and exit [{}, {}], got {:?} and {:?}",
                er, ec, self.entrance, self.exit
            )
            .into());
        }

        Ok(maze)
    }

    /// Validate without keeping the rebuilt maze
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.to_maze().map(|_| ())
    }
}

/// Generate a maze for a worksheet section.
///
/// # Arguments
/// * `config` - Maze settings from the content service (missing values use defaults)
///
/// # Example
/// ```
/// use maze_host::{generate_maze, MazeConfig};
///
/// let layout = generate_maze(&MazeConfig::new(3, 200, 42));
/// assert_eq!((layout.safe_width, layout.safe_height), (5, 25));
/// ```
pub fn generate_maze(config: &MazeConfig) -> MazeLayout {
    let request = config.to_request();
    tracing::debug!(?config, ?request, "Resolved maze request");

    let maze = Maze::build_with_rng(request.width, request.height, SimpleLCG::from_state(request.seed));
    let layout = MazeLayout::from_maze(&maze, request.seed);

    tracing::info!(
        "Generated {}x{} maze for seed {}",
        layout.safe_width,
        layout.safe_height,
        layout.seed
    );
    if layout.safe_width as i64 != request.width || layout.safe_height as i64 != request.height {
        tracing::info!(
            "Requested size {}x{} clamped to {}x{}",
            request.width,
            request.height,
            layout.safe_width,
            layout.safe_height
        );
    }

    layout
}

pub fn save_layout<P: AsRef<Path>>(layout: &MazeLayout, path: P) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(layout)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load and validate a layout saved by [`save_layout`]
pub fn load_layout<P: AsRef<Path>>(path: P) -> Result<MazeLayout, Box<dyn std::error::Error>> {
    let path = path.as_ref();

    // Validate file size (prevent loading huge files into memory)
    let size = fs::metadata(path)?.len();
    if size > MAX_LAYOUT_FILE_SIZE {
        return Err(format!("Layout file is too large: {} bytes (max 1MB)", size).into());
    }

    let json = fs::read_to_string(path)?;
    let layout: MazeLayout = serde_json::from_str(&json)?;
    layout
        .validate()
        .map_err(|e| format!("Invalid layout in {}: {}", path.display(), e))?;

    tracing::debug!("Loaded {}x{} layout from {}", layout.safe_width, layout.safe_height, path.display());
    Ok(layout)
}
