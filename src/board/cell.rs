use std::fmt;
use std::hash::{Hash, Hasher};

pub const COLOR_MASK: u8 = 0b1000;
pub const PIECE_MASK: u8 = 0b0111;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Piece {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl Piece {
    pub const ALL: [Piece; 6] = [Piece::Pawn, Piece::Rook, Piece::Knight, Piece::Bishop, Piece::Queen, Piece::King];

    /// Low three bits of a cell code (0 is reserved for an empty cell).
    pub const fn code(self) -> u8 {
        match self {
            Piece::Pawn => 1,
            Piece::Rook => 2,
            Piece::Knight => 3,
            Piece::Bishop => 4,
            Piece::Queen => 5,
            Piece::King => 6,
        }
    }

    pub const fn from_code(code: u8) -> Option<Piece> {
        match code & PIECE_MASK {
            1 => Some(Piece::Pawn),
            2 => Some(Piece::Rook),
            3 => Some(Piece::Knight),
            4 => Some(Piece::Bishop),
            5 => Some(Piece::Queen),
            6 => Some(Piece::King),
            _ => None,
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            Piece::Pawn => 'p',
            Piece::Rook => 'r',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Queen => 'q',
            Piece::King => 'k',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub const fn bit(self) -> u8 {
        match self {
            Color::Black => 0,
            Color::White => COLOR_MASK,
        }
    }

    pub const fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Rank holding this color's back row at game start.
    pub const fn home_rank(self) -> u8 {
        match self {
            Color::Black => 0,
            Color::White => 7,
        }
    }

    /// Farthest rank for this color's pawns.
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::Black => 7,
            Color::White => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// One board cell: piece code in the low three bits, color in bit 3.
///
/// The color bit of an empty cell carries no meaning, so all empty
/// values compare (and hash) equal.
#[derive(Clone, Copy, Debug, Default)]
pub struct CellValue(u8);

impl CellValue {
    pub const EMPTY: CellValue = CellValue(0);

    pub const fn new(piece: Piece, color: Color) -> Self { CellValue(piece.code() | color.bit()) }

    /// Builds a cell from a raw code. Unknown piece codes read as empty.
    pub const fn from_raw(raw: u8) -> Self {
        match Piece::from_code(raw) {
            Some(_) => CellValue(raw & (PIECE_MASK | COLOR_MASK)),
            None => CellValue::EMPTY,
        }
    }

    pub const fn raw(self) -> u8 { self.0 }

    pub const fn piece(self) -> Option<Piece> { Piece::from_code(self.0) }

    pub const fn is_empty(self) -> bool { self.piece().is_none() }

    pub const fn color(self) -> Option<Color> {
        if self.is_empty() {
            None
        } else if self.0 & COLOR_MASK == COLOR_MASK {
            Some(Color::White)
        } else {
            Some(Color::Black)
        }
    }

    pub fn belongs_to(self, color: Color) -> bool { self.color() == Some(color) }

    pub fn is(self, piece: Piece) -> bool { self.piece() == Some(piece) }

    /// Diagram character: uppercase for white, lowercase for black, '.' when empty.
    pub fn to_char(self) -> char {
        match (self.piece(), self.color()) {
            (Some(p), Some(Color::White)) => p.to_char().to_ascii_uppercase(),
            (Some(p), _) => p.to_char(),
            _ => '.',
        }
    }

    fn normalized(self) -> u8 { if self.is_empty() { 0 } else { self.0 } }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool { self.normalized() == other.normalized() }
}

impl Eq for CellValue {}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) { self.normalized().hash(state); }
}

impl From<(Piece, Color)> for CellValue {
    fn from((piece, color): (Piece, Color)) -> Self { CellValue::new(piece, color) }
}
