use crate::board::Board;
use crate::display::{prepare_terminal, DisplayDevice};
use crate::error::Result;
use crate::game::{self, AcceptAll, GameState, MoveValidator, Outcome};
use crate::input::{Intent, KeyCode, KeySource};
use crate::render::Renderer;

/// A local two-player game on one terminal.
///
/// Owns the game state, the renderer and the move validator, and drives
/// them from a key source: one key is handled to completion (state change,
/// redraws, flush) before the next one is read.
pub struct MiniChess<D: DisplayDevice, V: MoveValidator = AcceptAll> {
    state: GameState,
    renderer: Renderer<D>,
    validator: V,
    moves_played: usize,
}

impl<D: DisplayDevice> MiniChess<D> {
    pub fn new(device: D) -> Self { Self::with_validator(device, AcceptAll) }
}

impl<D: DisplayDevice, V: MoveValidator> MiniChess<D, V> {
    pub fn with_validator(device: D, validator: V) -> Self {
        Self { state: GameState::new(), renderer: Renderer::new(device), validator, moves_played: 0 }
    }

    pub fn state(&self) -> &GameState { &self.state }
    pub fn renderer(&self) -> &Renderer<D> { &self.renderer }
    pub fn device_mut(&mut self) -> &mut D { self.renderer.device_mut() }
    pub fn moves_played(&self) -> usize { self.moves_played }

    pub fn prepare_terminal(&mut self) -> Result<()> { prepare_terminal(self.renderer.device_mut()) }

    /// Starts a new game from the standard layout and draws it.
    pub fn start(&mut self) -> Result<()> { self.start_with(Board::standard()) }

    pub fn start_with(&mut self, board: Board) -> Result<()> {
        self.state = GameState::with_board(board);
        self.moves_played = 0;
        self.renderer.draw_board();
        self.renderer.draw_all_pieces(&self.state.board, self.state.marker_context(), self.state.cursor());
        self.renderer.device_mut().flush()
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Result<Outcome> { self.handle_intent(Intent::from_key(key)) }

    /// Runs one intent; a completed move passes the turn to the other side.
    pub fn handle_intent(&mut self, intent: Intent) -> Result<Outcome> {
        let outcome = game::handle_intent(&mut self.state, &mut self.renderer, &self.validator, intent);
        if let Outcome::MoveCompleted(record) = outcome {
            self.moves_played += 1;
            log::info!("move {}: {} {} -> {}", self.moves_played, self.state.player(), record.from, record.to);
            game::change_player(&mut self.state, &mut self.renderer);
            log::debug!("position after move {}:\n{}", self.moves_played, self.state.board());
        }
        self.renderer.device_mut().flush()?;
        Ok(outcome)
    }

    /// Plays until the key source runs dry.
    pub fn run<K: KeySource>(&mut self, keys: &mut K) -> Result<()> {
        while let Some(key) = keys.next_key()? {
            self.handle_key(key)?;
        }
        log::info!("input closed after {} moves", self.moves_played);
        Ok(())
    }

    pub fn into_device(self) -> D { self.renderer.into_device() }
}
