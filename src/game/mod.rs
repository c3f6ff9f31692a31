//! Cursor and selection handling for one game.
//!
//! The whole game lives in a single [`GameState`] that callers own and pass
//! by `&mut` to [`handle_intent`]; the renderer and the move validator are
//! passed alongside. Rejected input never errors: it comes back as an
//! [`Outcome`] and leaves the state untouched.

mod legality;
pub mod moves;

pub use legality::{AcceptAll, MoveValidator};
pub use moves::{MoveRecord, Special};

use crate::board::{Board, Color, Direction, Square};
use crate::display::DisplayDevice;
use crate::input::Intent;
use crate::render::{MarkerContext, Renderer};

/// Where the cursor sits when a game starts (a1).
pub const START_CURSOR: Square = Square::at(0, 7);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingDestination { from: Square },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    CursorMoved { from: Square, to: Square },
    AtEdge,
    Selected(Square),
    /// Empty square or opponent's piece.
    InvalidSelection,
    /// Destination equals the selected square.
    NoOpMove,
    /// The move validator refused the destination.
    Rejected,
    MoveCompleted(MoveRecord),
    Cancelled(Square),
    NothingToCancel,
    Ignored,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    cursor: Square,
    selection: Option<Square>,
    player: Color,
}

impl GameState {
    pub fn new() -> Self { Self::with_board(Board::standard()) }

    /// Fresh cursor, no selection, white to move, on an arbitrary board.
    pub fn with_board(board: Board) -> Self { Self { board, cursor: START_CURSOR, selection: None, player: Color::White } }

    pub fn board(&self) -> &Board { &self.board }
    pub fn cursor(&self) -> Square { self.cursor }
    pub fn selection(&self) -> Option<Square> { self.selection }
    pub fn player(&self) -> Color { self.player }

    pub fn phase(&self) -> Phase {
        match self.selection {
            Some(from) => Phase::AwaitingDestination { from },
            None => Phase::Idle,
        }
    }

    pub fn marker_context(&self) -> MarkerContext { MarkerContext { player: self.player, selection: self.selection } }

    pub fn reset(&mut self) { *self = Self::new(); }
}

impl Default for GameState {
    fn default() -> Self { Self::new() }
}

/// Runs one intent through the state machine.
pub fn handle_intent<D, V>(state: &mut GameState, renderer: &mut Renderer<D>, validator: &V, intent: Intent) -> Outcome
where
    D: DisplayDevice,
    V: MoveValidator + ?Sized,
{
    let outcome = match intent {
        Intent::Move(dir) => move_cursor(state, renderer, dir),
        Intent::Confirm => match state.selection {
            None => select(state, renderer),
            Some(from) => complete_move(state, renderer, validator, from),
        },
        Intent::Cancel => cancel(state, renderer),
        Intent::Ignored => Outcome::Ignored,
    };
    log::debug!("{intent:?} -> {outcome:?}");
    outcome
}

/// Hands the turn to the other side and repaints the cursor in its colors.
pub fn change_player<D: DisplayDevice>(state: &mut GameState, renderer: &mut Renderer<D>) {
    state.player = state.player.opponent();
    renderer.render_marker(state.marker_context(), state.cursor, true);
}

fn move_cursor<D: DisplayDevice>(state: &mut GameState, renderer: &mut Renderer<D>, dir: Direction) -> Outcome {
    let from = state.cursor;
    let Some(to) = from.step(dir) else { return Outcome::AtEdge };
    let ctx = state.marker_context();
    renderer.render_marker(ctx, from, false);
    state.cursor = to;
    renderer.render_marker(ctx, to, true);
    Outcome::CursorMoved { from, to }
}

fn select<D: DisplayDevice>(state: &mut GameState, renderer: &mut Renderer<D>) -> Outcome {
    let sq = state.cursor;
    if !state.board.get(sq).belongs_to(state.player) {
        return Outcome::InvalidSelection;
    }
    state.selection = Some(sq);
    renderer.render_marker(state.marker_context(), sq, true);
    Outcome::Selected(sq)
}

fn complete_move<D, V>(state: &mut GameState, renderer: &mut Renderer<D>, validator: &V, from: Square) -> Outcome
where
    D: DisplayDevice,
    V: MoveValidator + ?Sized,
{
    let to = state.cursor;
    if to == from {
        return Outcome::NoOpMove;
    }
    if !validator.allows(&state.board, from, to) {
        return Outcome::Rejected;
    }
    let record = moves::apply(state, renderer, from, to);
    state.selection = None;
    Outcome::MoveCompleted(record)
}

fn cancel<D: DisplayDevice>(state: &mut GameState, renderer: &mut Renderer<D>) -> Outcome {
    let Some(sel) = state.selection.take() else { return Outcome::NothingToCancel };
    let ctx = state.marker_context();
    renderer.erase_selection_marker(ctx, sel, true);
    if sel == state.cursor {
        renderer.render_marker(ctx, state.cursor, true);
    }
    Outcome::Cancelled(sel)
}
