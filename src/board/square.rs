use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Cursor step directions, as seen on the terminal screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    const fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// A board cell address: file 0-7 left to right, rank 0-7 top to bottom.
///
/// Rank 0 is the eighth row as printed on the board, so `Square` displays
/// (4, 7) as `e1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    rank: u8,
    file: u8,
}

impl Square {
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 { Some(Square { rank, file }) } else { None }
    }

    /// For coordinates already known to be on the board (constants, loops over 0..8).
    pub(crate) const fn at(file: u8, rank: u8) -> Self {
        debug_assert!(file < 8 && rank < 8);
        Square { rank: rank & 7, file: file & 7 }
    }

    pub const fn file(self) -> u8 { self.file }
    pub const fn rank(self) -> u8 { self.rank }

    /// Neighbouring square one step away, or `None` past the board edge.
    pub fn step(self, dir: Direction) -> Option<Square> {
        let (df, dr) = dir.delta();
        let file = self.file as i8 + df;
        let rank = self.rank as i8 + dr;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square::at(file as u8, rank as u8))
        } else {
            None
        }
    }

    /// Squares alternate starting with a light square at the top-left corner.
    pub const fn is_dark(self) -> bool { (self.file + self.rank) % 2 == 1 }

    /// All 64 squares, rank by rank from the top.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Square::at(file, rank)))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, 8 - self.rank)
    }
}

impl FromStr for Square {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(Error::InvalidSquare(s.to_string()));
        }
        let file = bytes[0].to_ascii_lowercase();
        let digit = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&digit) {
            return Err(Error::InvalidSquare(s.to_string()));
        }
        Ok(Square::at(file - b'a', 8 - (digit - b'0')))
    }
}
