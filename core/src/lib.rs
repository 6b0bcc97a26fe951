//! Shared types, constants, and logic for the worksheet maze generator
//!
//! This crate provides the seeded random number generator, the maze
//! builder, and the wall-mask helpers used by the host library, the
//! command-line tool, and the HTTP API.
//!
//! The crate is no_std compatible, with optional std features for
//! host-side convenience.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod maze_gen;
pub mod rng;
pub mod verify;
pub mod walls;

// Re-export commonly used types for convenience
pub use maze_gen::{clamp_dimension, Maze};
pub use rng::SimpleLCG;
pub use verify::LayoutError;
pub use walls::Wall;

/// Smallest width or height a maze is built with
pub const MIN_DIMENSION: usize = 5;

/// Largest width or height a maze is built with (caps grid size at 25x25)
pub const MAX_DIMENSION: usize = 25;

/// Width used when the caller does not supply one
pub const DEFAULT_WIDTH: i64 = 12;

/// Height used when the caller does not supply one
pub const DEFAULT_HEIGHT: i64 = 12;

/// Seed used when the caller supplies none, or supplies zero
pub const DEFAULT_SEED: u32 = 12345;

/// Maximum number of cells in a maze
pub const MAX_CELLS: usize = MAX_DIMENSION * MAX_DIMENSION;
