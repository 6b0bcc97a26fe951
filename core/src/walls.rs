//! Wall-mask encoding shared by the builder and every renderer
//!
//! Each cell stores a 4-bit mask, one bit per side that still has a wall:
//! North=1, East=2, South=4, West=8.

/// Mask with all four walls present
pub const ALL_WALLS: u8 = 0b1111;

/// One side of a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Wall {
    North,
    East,
    South,
    West,
}

impl Wall {
    /// Neighbor priority order used while carving: up, right, down, left
    pub const ALL: [Wall; 4] = [Wall::North, Wall::East, Wall::South, Wall::West];

    /// Bit for this side in a cell's wall mask
    pub const fn bit(self) -> u8 {
        match self {
            Wall::North => 1,
            Wall::East => 2,
            Wall::South => 4,
            Wall::West => 8,
        }
    }

    /// The side a neighbor shares with this one
    pub const fn opposite(self) -> Wall {
        match self {
            Wall::North => Wall::South,
            Wall::South => Wall::North,
            Wall::East => Wall::West,
            Wall::West => Wall::East,
        }
    }

    /// (row, col) offset of the neighbor behind this wall
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Wall::North => (-1, 0),
            Wall::East => (0, 1),
            Wall::South => (1, 0),
            Wall::West => (0, -1),
        }
    }

    /// Position of the neighbor behind this wall, if it lies inside `width x height`
    pub fn neighbor(self, row: usize, col: usize, width: usize, height: usize) -> Option<(usize, usize)> {
        let (dr, dc) = self.delta();
        // wrapping_add_signed turns 0 - 1 into usize::MAX, which fails the bounds check
        let nr = row.wrapping_add_signed(dr);
        let nc = col.wrapping_add_signed(dc);
        (nr < height && nc < width).then_some((nr, nc))
    }
}
