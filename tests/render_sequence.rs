use minitel_chess::board::{Board, CellValue, Color, Direction, Piece, Square};
use minitel_chess::display::{Attribute, DrawCall, RecordingDisplay, TermColor};
use minitel_chess::game::Outcome;
use minitel_chess::input::Intent;
use minitel_chess::render::{screen_origin, square_color, Renderer, GLYPHS};
use minitel_chess::MiniChess;
use pretty_assertions::assert_eq;

fn sq(name: &str) -> Square { name.parse().unwrap() }

fn piece_calls(at: Square, value: CellValue) -> Vec<DrawCall> {
    let (x, y) = screen_origin(at);
    let glyph = GLYPHS[value.piece().map_or(0, |p| p.code() as usize)];
    let white = value.color() == Some(Color::White);
    let mut calls = Vec::new();
    for j in 0..3u8 {
        calls.push(DrawCall::MoveTo { x: x + 1, y: y + j });
        calls.push(DrawCall::GraphicMode);
        if white {
            calls.push(DrawCall::Attribute(Attribute::StartLining));
            calls.push(DrawCall::Attribute(Attribute::Foreground(TermColor::White)));
        } else {
            calls.push(DrawCall::Attribute(Attribute::Foreground(TermColor::Black)));
        }
        calls.push(DrawCall::Attribute(Attribute::Background(square_color(at))));
        for i in 0..3 {
            calls.push(DrawCall::Graphic(glyph[j as usize * 3 + i]));
        }
    }
    if white {
        calls.push(DrawCall::Attribute(Attribute::EndLining));
    }
    calls
}

fn marker_calls(at: Square, color: Option<TermColor>) -> Vec<DrawCall> {
    let (x, y) = screen_origin(at);
    let mut calls = vec![
        DrawCall::MoveTo { x, y: y + 2 },
        DrawCall::GraphicMode,
        DrawCall::Attribute(Attribute::Background(square_color(at))),
    ];
    match color {
        Some(c) => calls.extend([DrawCall::Attribute(Attribute::Foreground(c)), DrawCall::Graphic(0b111111)]),
        None => calls.push(DrawCall::Graphic(0)),
    }
    calls
}

#[test]
fn completed_move_redraws_in_order() {
    let mut game = MiniChess::new(RecordingDisplay::new());
    game.start().unwrap();
    game.handle_intent(Intent::Move(Direction::Up)).unwrap();
    game.handle_intent(Intent::Confirm).unwrap();
    game.handle_intent(Intent::Move(Direction::Up)).unwrap();
    game.handle_intent(Intent::Move(Direction::Up)).unwrap();
    game.device_mut().clear();

    let outcome = game.handle_intent(Intent::Confirm).unwrap();
    assert!(matches!(outcome, Outcome::MoveCompleted(_)));

    let (from, to) = (sq("a2"), sq("a4"));
    let mut expected = piece_calls(from, CellValue::EMPTY);
    expected.extend(marker_calls(from, None));
    expected.extend(piece_calls(to, CellValue::new(Piece::Pawn, Color::White)));
    expected.extend(marker_calls(to, None));
    // black to move: cursor marker turns black
    expected.extend(marker_calls(to, Some(TermColor::Black)));
    expected.push(DrawCall::Flush);
    assert_eq!(game.device_mut().calls(), expected.as_slice());
}

#[test]
fn selection_marker_uses_the_other_color() {
    let mut game = MiniChess::new(RecordingDisplay::new());
    game.start().unwrap();
    game.device_mut().clear();
    game.handle_intent(Intent::Confirm).unwrap();
    let mut expected = marker_calls(sq("a1"), Some(TermColor::Black));
    expected.push(DrawCall::Flush);
    assert_eq!(game.device_mut().calls(), expected.as_slice());
}

#[test]
fn cursor_step_hides_then_shows() {
    let mut game = MiniChess::new(RecordingDisplay::new());
    game.start().unwrap();
    game.device_mut().clear();
    game.handle_intent(Intent::Move(Direction::Right)).unwrap();
    let mut expected = marker_calls(sq("a1"), None);
    expected.extend(marker_calls(sq("b1"), Some(TermColor::White)));
    expected.push(DrawCall::Flush);
    assert_eq!(game.device_mut().calls(), expected.as_slice());
}

#[test]
fn start_draws_board_then_every_piece_then_cursor() {
    let mut r = Renderer::new(RecordingDisplay::new());
    let board = Board::standard();
    let state = minitel_chess::game::GameState::with_board(board.clone());
    r.draw_all_pieces(&board, state.marker_context(), state.cursor());
    let mut expected = Vec::new();
    for (at, value) in board.occupied() {
        expected.extend(piece_calls(at, value));
    }
    expected.extend(marker_calls(sq("a1"), Some(TermColor::White)));
    assert_eq!(r.device().calls(), expected.as_slice());
}

#[test]
fn board_rows_end_with_a_return_to_the_left_edge() {
    let mut r = Renderer::new(RecordingDisplay::new());
    r.draw_board();
    let calls = r.device().calls();
    assert_eq!(calls[0], DrawCall::MoveTo { x: 5, y: 1 });
    let returns = calls.windows(2).filter(|w| *w == [DrawCall::MoveLeft(32), DrawCall::MoveDown(1)]).count();
    assert_eq!(returns, 24);
    let first_square = &calls[1..8];
    assert_eq!(
        first_square,
        &[
            DrawCall::TextMode,
            DrawCall::Attribute(Attribute::Foreground(TermColor::Green)),
            DrawCall::Attribute(Attribute::InverseBackground),
            DrawCall::Char(b'A'),
            DrawCall::GraphicMode,
            DrawCall::Attribute(Attribute::Background(TermColor::Green)),
            DrawCall::Graphic(0),
        ]
    );
    assert_eq!(calls[8], DrawCall::Repeat(2));
}
