use minitel_chess::board::{Board, CellValue, Color, Piece, Square};
use minitel_chess::display::{DrawCall, RecordingDisplay};
use minitel_chess::game::Outcome;
use minitel_chess::input::{KeyCode, KeySource, ScriptedKeys};
use minitel_chess::MiniChess;
use pretty_assertions::assert_eq;

fn sq(name: &str) -> Square { name.parse().unwrap() }

const UP: KeyCode = KeyCode::ARROW_UP;
const DOWN: KeyCode = KeyCode::ARROW_DOWN;
const RIGHT: KeyCode = KeyCode::ARROW_RIGHT;
const OK: KeyCode = KeyCode::ENVOI;

#[test]
fn two_players_alternate() {
    let mut game = MiniChess::new(RecordingDisplay::new());
    game.start().unwrap();
    // white a2-a4, then black walks up to a7 and plays a7-a5
    let mut keys = ScriptedKeys::new([UP, OK, UP, UP, OK, UP, UP, UP, OK, DOWN, DOWN, OK]);
    game.run(&mut keys).unwrap();
    assert_eq!(keys.remaining(), 0);
    assert_eq!(game.moves_played(), 2);
    assert_eq!(game.state().player(), Color::White);
    let b = game.state().board();
    assert_eq!(b.get(sq("a4")), CellValue::new(Piece::Pawn, Color::White));
    assert_eq!(b.get(sq("a5")), CellValue::new(Piece::Pawn, Color::Black));
    assert!(b.get(sq("a2")).is_empty() && b.get(sq("a7")).is_empty());
}

#[test]
fn every_key_is_flushed() {
    let mut game = MiniChess::new(RecordingDisplay::new());
    game.start().unwrap();
    game.device_mut().clear();
    for key in [KeyCode::SOMMAIRE, KeyCode::ANNULATION, DOWN] {
        game.handle_key(key).unwrap();
    }
    assert_eq!(game.device_mut().calls(), &[DrawCall::Flush, DrawCall::Flush, DrawCall::Flush]);
}

#[test]
fn key_outcomes() {
    let mut game = MiniChess::new(RecordingDisplay::new());
    game.start().unwrap();
    assert_eq!(game.handle_key(KeyCode::GUIDE).unwrap(), Outcome::Ignored);
    assert_eq!(game.handle_key(KeyCode::SPACE).unwrap(), Outcome::Selected(sq("a1")));
    assert_eq!(game.handle_key(KeyCode::CORRECTION).unwrap(), Outcome::Cancelled(sq("a1")));
    assert_eq!(game.handle_key(RIGHT).unwrap(), Outcome::CursorMoved { from: sq("a1"), to: sq("b1") });
}

#[test]
fn refusing_validator_never_passes_the_turn() {
    let mut game = MiniChess::with_validator(RecordingDisplay::new(), |_: &Board, _: Square, _: Square| false);
    game.start().unwrap();
    let mut keys = ScriptedKeys::new([UP, OK, UP, OK]);
    while let Some(k) = keys.next_key().unwrap() {
        game.handle_key(k).unwrap();
    }
    assert_eq!(game.moves_played(), 0);
    assert_eq!(game.state().player(), Color::White);
    assert_eq!(game.state().selection(), Some(sq("a2")));
}

#[test]
fn restart_from_custom_position() {
    let mut game = MiniChess::new(RecordingDisplay::new());
    let mut board = Board::empty();
    board.set(sq("a1"), CellValue::new(Piece::King, Color::White));
    game.start_with(board.clone()).unwrap();
    assert_eq!(game.state().board(), &board);
    assert_eq!(game.state().cursor(), sq("a1"));
    assert_eq!(game.device_mut().calls().last(), Some(&DrawCall::Flush));
}

#[test]
fn terminal_setup_goes_first() {
    let mut game = MiniChess::new(RecordingDisplay::new());
    game.prepare_terminal().unwrap();
    game.start().unwrap();
    assert_eq!(game.device_mut().calls()[0], DrawCall::Echo(false));
    assert!(!game.device_mut().calls().iter().any(|c| matches!(c, DrawCall::SetBaud(_))));
}
