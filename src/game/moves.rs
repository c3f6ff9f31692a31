use super::GameState;
use crate::board::{CellValue, Color, Piece, Square};
use crate::display::DisplayDevice;
use crate::render::Renderer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Special {
    Castle { rook_from: Square, rook_to: Square },
    Promotion { square: Square, to: CellValue },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    pub piece: CellValue,
    pub special: Option<Special>,
}

/// Rook relocation for a king going from its start square to `to`:
/// file 1 pulls the rook from file 0 to file 2, file 6 pulls it from
/// file 7 to file 5, both on the king's home rank.
pub fn castle_rook(color: Color, from: Square, to: Square) -> Option<(Square, Square)> {
    let home = color.home_rank();
    if from != Square::at(4, home) || to.rank() != home {
        return None;
    }
    match to.file() {
        1 => Some((Square::at(0, home), Square::at(2, home))),
        6 => Some((Square::at(7, home), Square::at(5, home))),
        _ => None,
    }
}

/// Moves whatever stands on `from` to `to`, then handles castling and
/// promotion. Nothing is checked: the caller has already decided the move
/// goes ahead.
///
/// Each board write is followed by the matching redraw: origin erase,
/// selection marker erase, destination piece, destination marker erase;
/// then the same four steps for a castling rook, then the promoted piece.
pub fn apply<D: DisplayDevice>(state: &mut GameState, renderer: &mut Renderer<D>, from: Square, to: Square) -> MoveRecord {
    let piece = state.board.get(from);
    relocate(state, renderer, from, to);

    let mut special = None;
    if let (Some(Piece::King), Some(color)) = (piece.piece(), piece.color()) {
        if let Some((rook_from, rook_to)) = castle_rook(color, from, to) {
            log::debug!("{color} castles, rook {rook_from} -> {rook_to}");
            relocate(state, renderer, rook_from, rook_to);
            special = Some(Special::Castle { rook_from, rook_to });
        }
    }
    if let (Some(Piece::Pawn), Some(color)) = (piece.piece(), piece.color()) {
        if to.rank() == color.promotion_rank() {
            let queen = CellValue::new(Piece::Queen, color);
            log::debug!("{color} pawn promoted on {to}");
            state.board.set(to, queen);
            renderer.draw_piece(to, queen);
            special = Some(Special::Promotion { square: to, to: queen });
        }
    }
    MoveRecord { from, to, piece, special }
}

fn relocate<D: DisplayDevice>(state: &mut GameState, renderer: &mut Renderer<D>, from: Square, to: Square) {
    let value = state.board.get(from);
    state.board.set(to, value);
    state.board.clear(from);
    let ctx = state.marker_context();
    renderer.erase_piece(from);
    renderer.erase_selection_marker(ctx, from, true);
    renderer.draw_piece(to, value);
    renderer.render_marker(ctx, to, false);
}
