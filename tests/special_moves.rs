use minitel_chess::board::{Board, CellValue, Color, Direction, Piece, Square};
use minitel_chess::display::RecordingDisplay;
use minitel_chess::game::{self, AcceptAll, GameState, Outcome, Special};
use minitel_chess::input::Intent;
use minitel_chess::render::Renderer;
use pretty_assertions::assert_eq;

fn sq(name: &str) -> Square { name.parse().unwrap() }

fn white(p: Piece) -> CellValue { CellValue::new(p, Color::White) }
fn black(p: Piece) -> CellValue { CellValue::new(p, Color::Black) }

fn board_with(pieces: &[(&str, CellValue)]) -> Board {
    let mut b = Board::empty();
    for (name, value) in pieces {
        b.set(sq(name), *value);
    }
    b
}

struct Table {
    state: GameState,
    renderer: Renderer<RecordingDisplay>,
}

impl Table {
    fn new(board: Board) -> Self { Self { state: GameState::with_board(board), renderer: Renderer::new(RecordingDisplay::new()) } }

    fn send(&mut self, intent: Intent) -> Outcome { game::handle_intent(&mut self.state, &mut self.renderer, &AcceptAll, intent) }

    fn walk(&mut self, dir: Direction, steps: usize) {
        for _ in 0..steps {
            self.send(Intent::Move(dir));
        }
    }

    /// Selects under the cursor, walks, and confirms the destination.
    fn play(&mut self, path: &[(Direction, usize)]) -> Outcome {
        assert!(matches!(self.send(Intent::Confirm), Outcome::Selected(_)));
        for &(dir, steps) in path {
            self.walk(dir, steps);
        }
        self.send(Intent::Confirm)
    }
}

fn castling_board() -> Board {
    board_with(&[
        ("e1", white(Piece::King)),
        ("a1", white(Piece::Rook)),
        ("h1", white(Piece::Rook)),
        ("e8", black(Piece::King)),
        ("a8", black(Piece::Rook)),
        ("h8", black(Piece::Rook)),
    ])
}

#[test]
fn white_castles_king_side() {
    let mut t = Table::new(castling_board());
    t.walk(Direction::Right, 4);
    let Outcome::MoveCompleted(record) = t.play(&[(Direction::Right, 2)]) else { panic!("castle refused") };
    assert_eq!(record.special, Some(Special::Castle { rook_from: sq("h1"), rook_to: sq("f1") }));
    let b = t.state.board();
    assert_eq!(b.get(sq("g1")), white(Piece::King));
    assert_eq!(b.get(sq("f1")), white(Piece::Rook));
    assert!(b.get(sq("e1")).is_empty());
    assert!(b.get(sq("h1")).is_empty());
    assert_eq!(b.get(sq("a1")), white(Piece::Rook));
    assert_eq!(t.state.cursor(), sq("g1"));
}

#[test]
fn white_castles_queen_side_to_b1() {
    let mut t = Table::new(castling_board());
    t.walk(Direction::Right, 4);
    let Outcome::MoveCompleted(record) = t.play(&[(Direction::Left, 3)]) else { panic!("castle refused") };
    assert_eq!(record.special, Some(Special::Castle { rook_from: sq("a1"), rook_to: sq("c1") }));
    assert_eq!(t.state.board().get(sq("b1")), white(Piece::King));
    assert_eq!(t.state.board().get(sq("c1")), white(Piece::Rook));
    assert!(t.state.board().get(sq("a1")).is_empty());
}

#[test]
fn black_castles_on_the_top_rank() {
    let mut t = Table::new(castling_board());
    game::change_player(&mut t.state, &mut t.renderer);
    t.walk(Direction::Right, 4);
    t.walk(Direction::Up, 7);
    assert_eq!(t.state.cursor(), sq("e8"));
    let Outcome::MoveCompleted(record) = t.play(&[(Direction::Right, 2)]) else { panic!("castle refused") };
    assert_eq!(record.special, Some(Special::Castle { rook_from: sq("h8"), rook_to: sq("f8") }));
    assert_eq!(t.state.board().get(sq("f8")), black(Piece::Rook));
}

#[test]
fn king_off_home_square_never_drags_a_rook() {
    let mut t = Table::new(board_with(&[("e2", white(Piece::King)), ("h2", white(Piece::Rook))]));
    t.walk(Direction::Right, 4);
    t.walk(Direction::Up, 1);
    let Outcome::MoveCompleted(record) = t.play(&[(Direction::Right, 2)]) else { panic!("move refused") };
    assert_eq!(record.special, None);
    assert_eq!(t.state.board().get(sq("h2")), white(Piece::Rook));
}

#[test]
fn white_pawn_promotes_on_the_eighth_rank() {
    let mut t = Table::new(board_with(&[("b7", white(Piece::Pawn)), ("c8", black(Piece::Knight))]));
    t.walk(Direction::Right, 1);
    t.walk(Direction::Up, 6);
    let Outcome::MoveCompleted(record) = t.play(&[(Direction::Up, 1), (Direction::Right, 1)]) else { panic!("move refused") };
    assert_eq!(record.piece, white(Piece::Pawn));
    assert_eq!(record.special, Some(Special::Promotion { square: sq("c8"), to: white(Piece::Queen) }));
    assert_eq!(t.state.board().get(sq("c8")), white(Piece::Queen));
    assert_eq!(t.state.board().count(Piece::Pawn, Color::White), 0);
}

#[test]
fn black_pawn_promotes_on_the_first_rank() {
    let mut t = Table::new(board_with(&[("h2", black(Piece::Pawn))]));
    game::change_player(&mut t.state, &mut t.renderer);
    t.walk(Direction::Right, 7);
    t.walk(Direction::Up, 1);
    let Outcome::MoveCompleted(record) = t.play(&[(Direction::Down, 1)]) else { panic!("move refused") };
    assert!(matches!(record.special, Some(Special::Promotion { .. })));
    assert_eq!(t.state.board().get(sq("h1")), black(Piece::Queen));
}

#[test]
fn pawn_short_of_the_last_rank_stays_a_pawn() {
    let mut t = Table::new(board_with(&[("a6", white(Piece::Pawn))]));
    t.walk(Direction::Up, 5);
    let Outcome::MoveCompleted(record) = t.play(&[(Direction::Up, 1)]) else { panic!("move refused") };
    assert_eq!(record.special, None);
    assert_eq!(t.state.board().get(sq("a7")), white(Piece::Pawn));
}

#[test]
fn castling_over_a_full_back_rank_on_a_fresh_board() {
    use minitel_chess::input::KeyCode;
    use minitel_chess::MiniChess;

    let mut game = MiniChess::new(RecordingDisplay::new());
    game.start().unwrap();
    let keys = [KeyCode::ARROW_RIGHT; 4].into_iter().chain([KeyCode::ENVOI, KeyCode::ARROW_RIGHT, KeyCode::ARROW_RIGHT, KeyCode::ENVOI]);
    for key in keys {
        game.handle_key(key).unwrap();
    }
    let b = game.state().board();
    assert!(b.get(sq("e1")).is_empty());
    assert!(b.get(sq("h1")).is_empty());
    assert_eq!(b.get(sq("g1")), white(Piece::King));
    assert_eq!(b.get(sq("f1")), white(Piece::Rook));
    assert_eq!(game.state().player(), Color::Black);
    assert_eq!(game.moves_played(), 1);
}
