use crate::board::{Board, Square};

/// Hook consulted before a selected piece is moved.
///
/// Chess rules are not enforced by this crate: [`AcceptAll`] lets any
/// destination through and only the same-square move is refused, by the
/// state machine itself.
pub trait MoveValidator {
    fn allows(&self, board: &Board, from: Square, to: Square) -> bool;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAll;

impl MoveValidator for AcceptAll {
    fn allows(&self, _board: &Board, _from: Square, _to: Square) -> bool { true }
}

impl<F> MoveValidator for F
where
    F: Fn(&Board, Square, Square) -> bool,
{
    fn allows(&self, board: &Board, from: Square, to: Square) -> bool { self(board, from, to) }
}
