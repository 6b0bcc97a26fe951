//! Maze generation using Recursive Backtracker algorithm
//!
//! This implementation must exactly match the worksheet gallery's generator
//! to ensure deterministic maze generation from the same seed.
//!
//! Algorithm: Recursive Backtracker (DFS with backtracking)
//! 1. Start at (0, 0), mark as visited
//! 2. While stack is not empty:
//!    - Get unvisited neighbors of the cell on top of the stack
//!    - If neighbors exist:
//!      * Choose random neighbor
//!      * Remove wall between current and neighbor
//!      * Mark neighbor as visited, push to stack
//!    - Else: backtrack (pop from stack)

use crate::rng::SimpleLCG;
use crate::verify::{self, LayoutError};
use crate::walls::{Wall, ALL_WALLS};
use crate::{MAX_CELLS, MAX_DIMENSION, MIN_DIMENSION};

#[cfg(feature = "std")]
use std::vec::Vec;

/// Binary grid side for the largest maze (MAX_DIMENSION * 2 + 1)
pub const MAX_GRID_SIZE: usize = MAX_DIMENSION * 2 + 1;

/// Clamp a requested width or height into [MIN_DIMENSION, MAX_DIMENSION]
pub fn clamp_dimension(value: i64) -> usize {
    value.clamp(MIN_DIMENSION as i64, MAX_DIMENSION as i64) as usize
}

/// A rectangular grid of wall masks
///
/// Storage is a fixed 25x25 array; only the top-left `height x width`
/// region is meaningful.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Maze {
    cells: [[u8; MAX_DIMENSION]; MAX_DIMENSION],
    width: usize,
    height: usize,
}

impl Maze {
    /// Generate a maze using the recursive backtracker algorithm
    ///
    /// # Arguments
    /// * `width` - Requested number of cell columns, clamped to [5, 25]
    /// * `height` - Requested number of cell rows, clamped to [5, 25]
    /// * `seed` - RNG seed for deterministic generation (0 selects the default seed)
    ///
    /// # Returns
    /// A perfect maze with a guaranteed path from (0, 0) to (height-1, width-1)
    pub fn build(width: i64, height: i64, seed: u32) -> Self {
        Self::build_with_rng(width, height, SimpleLCG::new(seed))
    }

    /// Generate a maze driven by an already constructed generator
    ///
    /// Used when the starting state must be taken as-is, e.g. a wide seed
    /// that wraps to 0 and must not hit the zero-seed fallback.
    pub fn build_with_rng(width: i64, height: i64, mut rng: SimpleLCG) -> Self {
        let mut maze = Self {
            cells: [[ALL_WALLS; MAX_DIMENSION]; MAX_DIMENSION],
            width: clamp_dimension(width),
            height: clamp_dimension(height),
        };

        maze.recursive_backtracker(&mut rng);
        maze
    }

    /// Recursive backtracker algorithm (iterative with explicit stack)
    ///
    /// Uses fixed-size stack and visited arrays, no allocation.
    fn recursive_backtracker(&mut self, rng: &mut SimpleLCG) {
        let mut visited = [[false; MAX_DIMENSION]; MAX_DIMENSION];
        let mut stack = [(0usize, 0usize); MAX_CELLS];
        let mut stack_len = 0;

        visited[0][0] = true;
        stack[stack_len] = (0, 0);
        stack_len += 1;

        while stack_len > 0 {
            let (row, col) = stack[stack_len - 1];
            let (neighbors, neighbor_count) = self.unvisited_neighbors(&visited, row, col);

            if neighbor_count > 0 {
                let idx = rng.choice_index(neighbor_count);
                let (wall, nr, nc) = neighbors[idx];

                self.cells[row][col] &= !wall.bit();
                self.cells[nr][nc] &= !wall.opposite().bit();

                visited[nr][nc] = true;
                stack[stack_len] = (nr, nc);
                stack_len += 1;
            } else {
                stack_len -= 1;
            }
        }
    }

    /// Unvisited in-bounds neighbors in up, right, down, left order
    ///
    /// Returns: fixed array of neighbors with count (max 4 neighbors)
    fn unvisited_neighbors(
        &self,
        visited: &[[bool; MAX_DIMENSION]; MAX_DIMENSION],
        row: usize,
        col: usize,
    ) -> ([(Wall, usize, usize); 4], usize) {
        let mut neighbors = [(Wall::North, 0, 0); 4];
        let mut count = 0;

        for wall in Wall::ALL {
            if let Some((nr, nc)) = wall.neighbor(row, col, self.width, self.height) {
                if !visited[nr][nc] {
                    neighbors[count] = (wall, nr, nc);
                    count += 1;
                }
            }
        }

        (neighbors, count)
    }

    /// Rebuild a maze from externally supplied wall rows
    ///
    /// The rows must describe a valid perfect maze; see [`verify::validate`].
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, LayoutError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());

        if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&width)
            || !(MIN_DIMENSION..=MAX_DIMENSION).contains(&height)
            || rows.iter().any(|row| row.as_ref().len() != width)
        {
            return Err(LayoutError::InvalidDimensions { width, height });
        }

        let mut cells = [[ALL_WALLS; MAX_DIMENSION]; MAX_DIMENSION];
        for (r, row) in rows.iter().enumerate() {
            cells[r][..width].copy_from_slice(row.as_ref());
        }

        let maze = Self { cells, width, height };
        maze.validate()?;
        Ok(maze)
    }

    /// Check the spanning-tree invariant and wall symmetry
    pub fn validate(&self) -> Result<(), LayoutError> {
        verify::validate(self.width, self.height, |row, col| self.cells[row][col])
    }

    /// Number of cell columns actually used (after clamping)
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of cell rows actually used (after clamping)
    pub fn height(&self) -> usize {
        self.height
    }

    /// Wall mask of one cell
    ///
    /// Panics if the cell lies outside the maze.
    pub fn walls(&self, row: usize, col: usize) -> u8 {
        assert!(row < self.height && col < self.width, "Cell ({}, {}) outside maze", row, col);
        self.cells[row][col]
    }

    /// Whether the given side of a cell still has a wall
    pub fn has_wall(&self, row: usize, col: usize, wall: Wall) -> bool {
        self.walls(row, col) & wall.bit() != 0
    }

    /// Row-major view of the wall masks
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.cells[..self.height].iter().map(move |row| &row[..self.width])
    }

    /// Entrance cell, always the top-left corner
    pub fn entrance(&self) -> (usize, usize) {
        (0, 0)
    }

    /// Exit cell, always the bottom-right corner
    pub fn exit(&self) -> (usize, usize) {
        (self.height - 1, self.width - 1)
    }

    /// Convert maze to binary grid representation (fixed-size array)
    ///
    /// Creates a grid where:
    /// - 0 = wall
    /// - 1 = path (walkable cell or open passage)
    ///
    /// For a maze with H rows and W columns the used region is
    /// (H*2 + 1) x (W*2 + 1) and cell centers sit at (row*2+1, col*2+1).
    pub fn to_binary_grid(&self) -> [[u8; MAX_GRID_SIZE]; MAX_GRID_SIZE] {
        let mut grid = [[0u8; MAX_GRID_SIZE]; MAX_GRID_SIZE];

        for row in 0..self.height {
            for col in 0..self.width {
                let walls = self.cells[row][col];
                let gr = row * 2 + 1;
                let gc = col * 2 + 1;

                grid[gr][gc] = 1;

                // Only south and east are needed; the neighbor opens north and west
                if walls & Wall::South.bit() == 0 {
                    grid[gr + 1][gc] = 1;
                }
                if walls & Wall::East.bit() == 0 {
                    grid[gr][gc + 1] = 1;
                }
            }
        }

        grid
    }

    /// Wall masks as nested vectors (for JSON serialization)
    #[cfg(feature = "std")]
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.rows().map(|row| row.to_vec()).collect()
    }

    /// Convert maze to binary grid representation (Vec for host/std)
    ///
    /// Same algorithm as to_binary_grid(), trimmed to the used region.
    #[cfg(feature = "std")]
    pub fn to_binary_grid_vec(&self) -> Vec<Vec<u8>> {
        let rows = self.height * 2 + 1;
        let cols = self.width * 2 + 1;
        let grid = self.to_binary_grid();

        grid[..rows].iter().map(|row| row[..cols].to_vec()).collect()
    }
}
