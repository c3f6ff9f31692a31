//! Board model: an 8x8 grid of cell codes.
//!
//! No legality checks live here; callers decide what may be written.

mod cell;
mod square;

use std::fmt;

pub use cell::{CellValue, Color, Piece, COLOR_MASK, PIECE_MASK};
pub use square::{Direction, Square};

/// Back row by file, identical for both colors.
pub const BACK_RANK: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [[CellValue; 8]; 8], // [file][rank]
}

impl Board {
    pub fn empty() -> Self { Self { cells: [[CellValue::EMPTY; 8]; 8] } }

    pub fn standard() -> Self {
        let mut board = Self::empty();
        board.initial_standard_setup();
        board
    }

    /// Black back row on rank 0, black pawns on rank 1, white pawns on
    /// rank 6, white back row on rank 7; everything else cleared.
    pub fn initial_standard_setup(&mut self) {
        *self = Self::empty();
        for (file, piece) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            self.set(Square::at(file, 0), CellValue::new(*piece, Color::Black));
            self.set(Square::at(file, 1), CellValue::new(Piece::Pawn, Color::Black));
            self.set(Square::at(file, 6), CellValue::new(Piece::Pawn, Color::White));
            self.set(Square::at(file, 7), CellValue::new(*piece, Color::White));
        }
    }

    pub fn get(&self, sq: Square) -> CellValue { self.cells[sq.file() as usize][sq.rank() as usize] }

    pub fn set(&mut self, sq: Square, value: CellValue) { self.cells[sq.file() as usize][sq.rank() as usize] = value; }

    pub fn clear(&mut self, sq: Square) { self.set(sq, CellValue::EMPTY); }

    /// Occupied squares with their contents, rank by rank from the top.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, CellValue)> + '_ {
        Square::all().map(move |sq| (sq, self.get(sq))).filter(|(_, v)| !v.is_empty())
    }

    pub fn count(&self, piece: Piece, color: Color) -> usize {
        self.occupied().filter(|(_, v)| *v == CellValue::new(piece, color)).count()
    }
}

impl Default for Board {
    fn default() -> Self { Board::standard() }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in 0..8u8 {
            write!(f, "{} ", 8 - rank)?;
            for file in 0..8u8 {
                write!(f, "{}", self.get(Square::at(file, rank)).to_char())?;
            }
            writeln!(f)?;
        }
        write!(f, "  abcdefgh")
    }
}
