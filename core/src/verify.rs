//! Structural validation of wall-mask grids
//!
//! Grids that arrive from outside the builder (files, HTTP bodies) are
//! checked here before anything renders them. A grid passes when:
//! - its dimensions lie within [MIN_DIMENSION, MAX_DIMENSION]
//! - every mask fits in four bits
//! - the outer border is closed
//! - every shared wall is present on both sides or on neither
//! - it has exactly `width * height - 1` passages
//! - every cell is reachable from the entrance
//!
//! Together the last two make the passage graph a spanning tree.

use core::fmt;

use crate::walls::{Wall, ALL_WALLS};
use crate::{MAX_CELLS, MAX_DIMENSION, MIN_DIMENSION};

/// Why a wall-mask grid is not a perfect maze
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutError {
    InvalidDimensions { width: usize, height: usize },
    InvalidMask { row: usize, col: usize, mask: u8 },
    OpenBorder { row: usize, col: usize },
    AsymmetricWall { row: usize, col: usize },
    WrongPassageCount { expected: usize, found: usize },
    Disconnected { reachable: usize, total: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            LayoutError::InvalidDimensions { width, height } => write!(
                f,
                "Invalid maze dimensions {}x{}: width and height must be between {} and {}",
                width, height, MIN_DIMENSION, MAX_DIMENSION
            ),
            LayoutError::InvalidMask { row, col, mask } => {
                write!(f, "Cell ({}, {}) has wall mask {} (max {})", row, col, mask, ALL_WALLS)
            }
            LayoutError::OpenBorder { row, col } => {
                write!(f, "Outer wall missing at cell ({}, {})", row, col)
            }
            LayoutError::AsymmetricWall { row, col } => {
                write!(f, "Wall at cell ({}, {}) is open on one side only", row, col)
            }
            LayoutError::WrongPassageCount { expected, found } => {
                write!(f, "Expected {} passages, found {}", expected, found)
            }
            LayoutError::Disconnected { reachable, total } => {
                write!(f, "Only {} of {} cells reachable from the entrance", reachable, total)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LayoutError {}

/// Validate a `width x height` grid whose masks are read through `mask`
pub fn validate<F>(width: usize, height: usize, mask: F) -> Result<(), LayoutError>
where
    F: Fn(usize, usize) -> u8,
{
    if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&width)
        || !(MIN_DIMENSION..=MAX_DIMENSION).contains(&height)
    {
        return Err(LayoutError::InvalidDimensions { width, height });
    }

    let mut passages = 0;

    for row in 0..height {
        for col in 0..width {
            let walls = mask(row, col);
            if walls > ALL_WALLS {
                return Err(LayoutError::InvalidMask { row, col, mask: walls });
            }

            for wall in Wall::ALL {
                match wall.neighbor(row, col, width, height) {
                    None => {
                        if walls & wall.bit() == 0 {
                            return Err(LayoutError::OpenBorder { row, col });
                        }
                    }
                    Some((nr, nc)) => {
                        let open_here = walls & wall.bit() == 0;
                        let open_there = mask(nr, nc) & wall.opposite().bit() == 0;
                        if open_here != open_there {
                            return Err(LayoutError::AsymmetricWall { row, col });
                        }
                        // Count each passage once, from its north/west side
                        if open_here && matches!(wall, Wall::East | Wall::South) {
                            passages += 1;
                        }
                    }
                }
            }
        }
    }

    let total = width * height;
    if passages != total - 1 {
        return Err(LayoutError::WrongPassageCount {
            expected: total - 1,
            found: passages,
        });
    }

    let reachable = count_reachable(width, height, &mask);
    if reachable != total {
        return Err(LayoutError::Disconnected { reachable, total });
    }

    Ok(())
}

/// Breadth-first walk over open passages from the entrance
fn count_reachable<F>(width: usize, height: usize, mask: &F) -> usize
where
    F: Fn(usize, usize) -> u8,
{
    let mut seen = [[false; MAX_DIMENSION]; MAX_DIMENSION];
    let mut queue = [(0usize, 0usize); MAX_CELLS];
    let (mut head, mut tail) = (0, 1);
    seen[0][0] = true;

    while head < tail {
        let (row, col) = queue[head];
        head += 1;

        for wall in Wall::ALL {
            if mask(row, col) & wall.bit() != 0 {
                continue;
            }
            if let Some((nr, nc)) = wall.neighbor(row, col, width, height) {
                if !seen[nr][nc] {
                    seen[nr][nc] = true;
                    queue[tail] = (nr, nc);
                    tail += 1;
                }
            }
        }
    }

    tail
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Maze;

    fn grid_of(maze: &Maze) -> [[u8; MAX_DIMENSION]; MAX_DIMENSION] {
        let mut grid = [[ALL_WALLS; MAX_DIMENSION]; MAX_DIMENSION];
        for (r, row) in maze.rows().enumerate() {
            grid[r][..row.len()].copy_from_slice(row);
        }
        grid
    }

    fn check(grid: &[[u8; MAX_DIMENSION]; MAX_DIMENSION], width: usize, height: usize) -> Result<(), LayoutError> {
        validate(width, height, |r, c| grid[r][c])
    }

    #[test]
    fn test_generated_maze_passes() {
        let maze = Maze::build(12, 9, 12345);
        assert_eq!(check(&grid_of(&maze), 12, 9), Ok(()));
    }

    #[test]
    fn test_dimensions_out_of_range() {
        let grid = [[ALL_WALLS; MAX_DIMENSION]; MAX_DIMENSION];
        assert_eq!(
            check(&grid, 4, 10),
            Err(LayoutError::InvalidDimensions { width: 4, height: 10 })
        );
    }

    #[test]
    fn test_mask_too_large() {
        let maze = Maze::build(5, 5, 1);
        let mut grid = grid_of(&maze);
        grid[2][3] = 16;
        assert_eq!(
            check(&grid, 5, 5),
            Err(LayoutError::InvalidMask { row: 2, col: 3, mask: 16 })
        );
    }

    #[test]
    fn test_open_border() {
        let maze = Maze::build(5, 5, 1);
        let mut grid = grid_of(&maze);
        grid[0][0] &= !Wall::West.bit();
        assert_eq!(check(&grid, 5, 5), Err(LayoutError::OpenBorder { row: 0, col: 0 }));
    }

    #[test]
    fn test_asymmetric_wall() {
        let maze = Maze::build(6, 6, 3);
        let mut grid = grid_of(&maze);
        // Toggle the east wall of (2, 2) without touching (2, 3)
        grid[2][2] ^= Wall::East.bit();
        assert_eq!(check(&grid, 6, 6), Err(LayoutError::AsymmetricWall { row: 2, col: 2 }));
    }

    #[test]
    fn test_cycle_detected() {
        let maze = Maze::build(6, 6, 8);
        let mut grid = grid_of(&maze);

        // Open the first closed interior east wall found; a spanning tree plus one edge has a cycle
        let (r, c) = (0..6)
            .flat_map(|r| (0..5).map(move |c| (r, c)))
            .find(|&(r, c)| grid[r][c] & Wall::East.bit() != 0)
            .expect("a closed interior wall");
        grid[r][c] &= !Wall::East.bit();
        grid[r][c + 1] &= !Wall::West.bit();

        assert_eq!(
            check(&grid, 6, 6),
            Err(LayoutError::WrongPassageCount { expected: 35, found: 36 })
        );
    }

    #[test]
    fn test_all_walls_fails_passage_count() {
        let grid = [[ALL_WALLS; MAX_DIMENSION]; MAX_DIMENSION];
        assert_eq!(
            check(&grid, 5, 5),
            Err(LayoutError::WrongPassageCount { expected: 24, found: 0 })
        );
    }

    #[test]
    fn test_disconnected_with_right_edge_count() {
        // Close one passage and open one elsewhere: edge count stays at w*h-1
        // but a cycle appears and part of the grid is cut off.
        let maze = Maze::build(5, 5, 21);
        let mut grid = grid_of(&maze);

        let (r, c) = (0..5)
            .flat_map(|r| (0..4).map(move |c| (r, c)))
            .find(|&(r, c)| grid[r][c] & Wall::East.bit() != 0)
            .expect("a closed interior wall");
        grid[r][c] &= !Wall::East.bit();
        grid[r][c + 1] &= !Wall::West.bit();

        // Isolate the exit cell by sealing every open side of it
        let (er, ec) = (4, 4);
        let mut sealed = 0;
        for wall in [Wall::North, Wall::West] {
            if grid[er][ec] & wall.bit() == 0 {
                let (nr, nc) = wall.neighbor(er, ec, 5, 5).expect("interior neighbor");
                grid[er][ec] |= wall.bit();
                grid[nr][nc] |= wall.opposite().bit();
                sealed += 1;
            }
        }

        let result = check(&grid, 5, 5);
        if sealed == 1 {
            assert!(matches!(result, Err(LayoutError::Disconnected { total: 25, .. })));
        } else {
            assert!(matches!(result, Err(LayoutError::WrongPassageCount { .. })));
        }
    }

    #[test]
    fn test_display_messages() {
        let err = LayoutError::WrongPassageCount { expected: 24, found: 25 };
        let mut buf = [0u8; 64];
        let mut cursor = Cursor { buf: &mut buf, len: 0 };
        fmt::write(&mut cursor, format_args!("{}", err)).unwrap();
        assert_eq!(&cursor.buf[..cursor.len], b"Expected 24 passages, found 25");
    }

    struct Cursor<'a> {
        buf: &'a mut [u8],
        len: usize,
    }

    impl fmt::Write for Cursor<'_> {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            let end = self.len + s.len();
            if end > self.buf.len() {
                return Err(fmt::Error);
            }
            self.buf[self.len..end].copy_from_slice(s.as_bytes());
            self.len = end;
            Ok(())
        }
    }
}
