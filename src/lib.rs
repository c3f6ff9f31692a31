// Minitel chess: board model, game state machine, Videotex rendering, and
// a Telnet or SSH relay for the same terminal.
pub mod board;
pub mod config;
pub mod display;
pub mod error;
pub mod game;
pub mod input;
pub mod net;
pub mod render;
pub mod serial;
pub mod session;

pub use error::{Error, Result};
pub use session::MiniChess;
