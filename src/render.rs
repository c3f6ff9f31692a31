//! Board drawing on the terminal.
//!
//! Every function here is a fixed translation of board contents and
//! cursor/selection state into [`DisplayDevice`] calls; the renderer keeps
//! no state of its own besides the device.

use crate::board::{Board, CellValue, Color, Square};
use crate::display::{Attribute, DisplayDevice, TermColor};

pub const CASE_WIDTH: u8 = 4;
pub const CASE_HEIGHT: u8 = 3;
pub const BOARD_TOP: u8 = 1;
pub const BOARD_LEFT: u8 = 5;
pub const PIECE_WIDTH: usize = 3;
pub const PIECE_HEIGHT: usize = 3;

pub const LIGHT_SQUARE: TermColor = TermColor::Green;
pub const DARK_SQUARE: TermColor = TermColor::Blue;

const FULL_BLOCK: u8 = 0b111111;
const BLANK: u8 = 0b000000;

/// 3x3 mosaic glyphs indexed by piece code, each listed in reading order.
pub const GLYPHS: [[u8; PIECE_WIDTH * PIECE_HEIGHT]; 7] = [
    [0b000000, 0b000000, 0b000000, 0b000000, 0b000000, 0b000000, 0b000000, 0b000000, 0b000000], // empty
    [0b000000, 0b000000, 0b000000, 0b000101, 0b101111, 0b000000, 0b000100, 0b101100, 0b000000], // pawn
    [0b000010, 0b000010, 0b000010, 0b110101, 0b111101, 0b100000, 0b011100, 0b011100, 0b001000], // rook
    [0b000000, 0b000111, 0b000010, 0b011110, 0b011101, 0b101010, 0b001100, 0b111100, 0b001000], // knight
    [0b000001, 0b001011, 0b000000, 0b111111, 0b101111, 0b101010, 0b011100, 0b111100, 0b001000], // bishop
    [0b001001, 0b000011, 0b001000, 0b000111, 0b101111, 0b000010, 0b111100, 0b011100, 0b101000], // queen
    [0b000001, 0b001011, 0b000000, 0b000111, 0b101111, 0b000010, 0b111100, 0b011100, 0b101000], // king
];

/// The parts of the game state that decide how a marker looks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkerContext {
    pub player: Color,
    pub selection: Option<Square>,
}

impl MarkerContext {
    pub fn is_selected(&self, sq: Square) -> bool { self.selection == Some(sq) }

    /// White to move: cursor white, selection black. Black to move: the reverse.
    pub fn marker_color(&self, selected: bool) -> TermColor {
        match (self.player, selected) {
            (Color::White, false) | (Color::Black, true) => TermColor::White,
            (Color::White, true) | (Color::Black, false) => TermColor::Black,
        }
    }
}

pub fn square_color(sq: Square) -> TermColor { if sq.is_dark() { DARK_SQUARE } else { LIGHT_SQUARE } }

/// Top-left screen cell (the label column) of a square.
pub fn screen_origin(sq: Square) -> (u8, u8) {
    (sq.file() * CASE_WIDTH + BOARD_LEFT, sq.rank() * CASE_HEIGHT + BOARD_TOP)
}

pub struct Renderer<D: DisplayDevice> {
    device: D,
}

impl<D: DisplayDevice> Renderer<D> {
    pub fn new(device: D) -> Self { Self { device } }

    pub fn device(&self) -> &D { &self.device }
    pub fn device_mut(&mut self) -> &mut D { &mut self.device }
    pub fn into_device(self) -> D { self.device }

    /// Empty board with square labels, drawn row by row from a8.
    ///
    /// Each screen row of a square starts with its label column in inverse
    /// video (file letter, then rank digit, then blank) followed by three
    /// blank mosaic cells on the square's color.
    pub fn draw_board(&mut self) {
        let d = &mut self.device;
        d.move_to(BOARD_LEFT, BOARD_TOP);
        for rank in 0..8u8 {
            for row in 0..CASE_HEIGHT {
                for file in 0..8u8 {
                    let color = square_color(Square::at(file, rank));
                    d.text_mode();
                    d.attribute(Attribute::Foreground(color));
                    d.attribute(Attribute::InverseBackground);
                    d.print_char(match row {
                        0 => b'A' + file,
                        1 => b'0' + (8 - rank),
                        _ => b' ',
                    });
                    d.graphic_mode();
                    d.attribute(Attribute::Background(color));
                    d.graphic(BLANK);
                    d.repeat(CASE_WIDTH - 2);
                }
                d.move_left(CASE_WIDTH * 8);
                d.move_down(1);
            }
        }
    }

    /// Draws every occupied square, then the cursor marker.
    pub fn draw_all_pieces(&mut self, board: &Board, ctx: MarkerContext, cursor: Square) {
        for (sq, value) in board.occupied() {
            self.draw_piece(sq, value);
        }
        self.render_marker(ctx, cursor, true);
    }

    /// Draws `value`'s glyph over the three mosaic columns of `sq`.
    ///
    /// Position, mode and colors are re-sent for every glyph row since a
    /// cursor positioning resets the terminal's serial attributes.
    pub fn draw_piece(&mut self, sq: Square, value: CellValue) {
        let (x, y) = screen_origin(sq);
        let glyph = &GLYPHS[value.piece().map_or(0, |p| p.code() as usize)];
        let white = value.color() == Some(Color::White);
        let d = &mut self.device;
        for (j, row) in glyph.chunks(PIECE_WIDTH).enumerate() {
            d.move_to(x + 1, y + j as u8);
            d.graphic_mode();
            if white {
                // lining sharpens white mosaics on colored squares
                d.attribute(Attribute::StartLining);
                d.attribute(Attribute::Foreground(TermColor::White));
            } else {
                d.attribute(Attribute::Foreground(TermColor::Black));
            }
            d.attribute(Attribute::Background(square_color(sq)));
            for &pattern in row {
                d.graphic(pattern);
            }
        }
        if white {
            d.attribute(Attribute::EndLining);
        }
    }

    pub fn erase_piece(&mut self, sq: Square) { self.draw_piece(sq, CellValue::EMPTY) }

    /// Shows or hides the marker in the bottom of a square's label column.
    ///
    /// Hiding leaves a pending selection's marker in place; use
    /// [`Renderer::erase_selection_marker`] with `force` to remove it.
    pub fn render_marker(&mut self, ctx: MarkerContext, sq: Square, show: bool) {
        if !show {
            self.erase_selection_marker(ctx, sq, false);
            return;
        }
        let color = ctx.marker_color(ctx.is_selected(sq));
        self.marker_cell(sq);
        self.device.attribute(Attribute::Foreground(color));
        self.device.graphic(FULL_BLOCK);
    }

    /// Clears the marker of `sq`. Without `force`, a square holding the
    /// pending selection keeps its marker.
    pub fn erase_selection_marker(&mut self, ctx: MarkerContext, sq: Square, force: bool) {
        if ctx.is_selected(sq) && !force {
            return;
        }
        self.marker_cell(sq);
        self.device.graphic(BLANK);
    }

    fn marker_cell(&mut self, sq: Square) {
        let (x, y) = screen_origin(sq);
        self.device.move_to(x, y + CASE_HEIGHT - 1);
        self.device.graphic_mode();
        self.device.attribute(Attribute::Background(square_color(sq)));
    }
}
