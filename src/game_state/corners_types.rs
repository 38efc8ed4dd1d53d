//! Primitive value types shared by every subsystem: coordinates, players,
//! corner shapes and pieces.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CornersError, CornersResult};

/// Side length of the (always square) board.
pub const BOARD_SIZE: i8 = 8;

/// Orthogonal step directions, in the order move generation explores them.
pub const DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Cell coordinate, `0`-indexed from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: i8,
    pub col: i8,
}

impl Coord {
    #[inline]
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    #[inline]
    pub const fn in_bounds(self) -> bool {
        self.row >= 0 && self.row < BOARD_SIZE && self.col >= 0 && self.col < BOARD_SIZE
    }

    /// Step by `(d_row, d_col)`, returning `None` when the result leaves the board.
    #[inline]
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Coord> {
        let next = Coord::new(self.row + d_row, self.col + d_col);
        next.in_bounds().then_some(next)
    }

    #[inline]
    pub fn manhattan(self, other: Coord) -> i32 {
        i32::from((self.row - other.row).abs()) + i32::from((self.col - other.col).abs())
    }

    #[inline]
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }

    /// Square index `row * 8 + col`. Only meaningful for in-bounds coordinates.
    #[inline]
    pub const fn index(self) -> usize {
        (self.row as usize) * (BOARD_SIZE as usize) + self.col as usize
    }

    #[inline]
    pub const fn bit(self) -> u64 {
        1u64 << self.index()
    }

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self {
            row: (index / BOARD_SIZE as usize) as i8,
            col: (index % BOARD_SIZE as usize) as i8,
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i8, i8)> for Coord {
    fn from((row, col): (i8, i8)) -> Self {
        Coord::new(row, col)
    }
}

/// One of the two sides. `A` starts top-left, `B` starts bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    A,
    B,
}

impl Player {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Player::A => 0,
            Player::B => 1,
        }
    }

    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// The far board corner this player races toward.
    #[inline]
    pub const fn target_corner(self) -> Coord {
        match self {
            Player::A => Coord::new(BOARD_SIZE - 1, BOARD_SIZE - 1),
            Player::B => Coord::new(0, 0),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::A => write!(f, "A"),
            Player::B => write!(f, "B"),
        }
    }
}

/// Axis-aligned rectangle of cells, half-open on both axes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub rows: std::ops::Range<i8>,
    pub cols: std::ops::Range<i8>,
}

impl Region {
    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        self.rows.contains(&coord.row) && self.cols.contains(&coord.col)
    }

    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.rows
            .clone()
            .flat_map(move |row| self.cols.clone().map(move |col| Coord::new(row, col)))
    }

    /// Manhattan distance from `coord` to the nearest cell of the region.
    #[inline]
    pub fn distance_to(&self, coord: Coord) -> i32 {
        fn axis(value: i8, range: &std::ops::Range<i8>) -> i32 {
            if value < range.start {
                i32::from(range.start - value)
            } else if value >= range.end {
                i32::from(value - (range.end - 1))
            } else {
                0
            }
        }
        axis(coord.row, &self.rows) + axis(coord.col, &self.cols)
    }

    /// Occupancy mask of every cell in the region.
    pub fn mask(&self) -> u64 {
        self.cells().fold(0u64, |acc, c| acc | c.bit())
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.rows.len() * self.cols.len()
    }
}

/// Size of the starting/goal corner block. Valid shapes: 3x3, 3x4, 4x4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCornerShape", into = "RawCornerShape")]
pub struct CornerShape {
    rows: u8,
    cols: u8,
}

#[derive(Serialize, Deserialize)]
struct RawCornerShape {
    rows: u8,
    cols: u8,
}

impl TryFrom<RawCornerShape> for CornerShape {
    type Error = CornersError;

    fn try_from(raw: RawCornerShape) -> Result<Self, Self::Error> {
        CornerShape::new(raw.rows, raw.cols)
    }
}

impl From<CornerShape> for RawCornerShape {
    fn from(shape: CornerShape) -> Self {
        RawCornerShape {
            rows: shape.rows,
            cols: shape.cols,
        }
    }
}

impl Default for CornerShape {
    fn default() -> Self {
        Self::SMALL
    }
}

impl CornerShape {
    pub const SMALL: CornerShape = CornerShape { rows: 3, cols: 3 };
    pub const MEDIUM: CornerShape = CornerShape { rows: 3, cols: 4 };
    pub const LARGE: CornerShape = CornerShape { rows: 4, cols: 4 };

    pub const ALL: [CornerShape; 3] = [Self::SMALL, Self::MEDIUM, Self::LARGE];

    pub fn new(rows: u8, cols: u8) -> CornersResult<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.rows == rows && s.cols == cols)
            .ok_or(CornersError::InvalidCornerShape { rows, cols })
    }

    #[inline]
    pub const fn rows(self) -> u8 {
        self.rows
    }

    #[inline]
    pub const fn cols(self) -> u8 {
        self.cols
    }

    /// Number of pieces each player owns with this shape.
    #[inline]
    pub const fn area(self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Guess the shape from a piece list: the shape whose area matches the
    /// larger per-player piece count, falling back to 3x3.
    pub fn infer(pieces: &[Piece]) -> CornerShape {
        let count_a = pieces.iter().filter(|p| p.owner == Player::A).count();
        let count_b = pieces.len() - count_a;
        let count = count_a.max(count_b);
        Self::ALL
            .into_iter()
            .find(|s| s.area() == count)
            .unwrap_or(Self::SMALL)
    }

    /// The corner a player starts in.
    pub fn home_region(self, player: Player) -> Region {
        let rows = self.rows as i8;
        let cols = self.cols as i8;
        match player {
            Player::A => Region {
                rows: 0..rows,
                cols: 0..cols,
            },
            Player::B => Region {
                rows: BOARD_SIZE - rows..BOARD_SIZE,
                cols: BOARD_SIZE - cols..BOARD_SIZE,
            },
        }
    }

    /// The corner a player must fill to win: the opponent's home.
    #[inline]
    pub fn goal_region(self, player: Player) -> Region {
        self.home_region(player.opponent())
    }
}

impl fmt::Display for CornerShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// A single game piece. `id` is stable for the whole game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub id: u16,
    pub owner: Player,
    pub position: Coord,
}

impl Piece {
    #[inline]
    pub const fn new(id: u16, owner: Player, position: Coord) -> Self {
        Self {
            id,
            owner,
            position,
        }
    }
}

/// Origin and destination of one move. The landing sequence of a jump chain
/// is recovered separately with `find_path`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
}

impl Move {
    #[inline]
    pub const fn new(from: Coord, to: Coord) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
