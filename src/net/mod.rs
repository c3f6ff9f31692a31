//! Remote sessions tunnelled through the terminal, over Telnet or SSH.

mod relay;
mod ssh;
mod tcp;

pub use relay::{run_relay, spawn_key_reader, RelayStats};
pub use ssh::{ShellChannel, SshTransport, PTY_TERM};
pub use tcp::TcpTransport;

use crate::error::Result;
use crate::input::KeyCode;

const CR: u8 = 0x0D;
const NAK: u8 = 0x15;
const DEL: u8 = 0x7F;

/// Byte pipe to a remote host.
pub trait Transport {
    /// Open and not at end of stream.
    fn is_open(&self) -> bool;
    fn send(&mut self, bytes: &[u8]) -> Result<usize>;
    /// Reads what is available; `Ok(0)` when nothing arrived in time.
    fn receive(&mut self, buf: &mut [u8]) -> Result<usize>;

    fn write_line(&mut self, line: &str) -> Result<()> {
        let mut bytes = Vec::with_capacity(line.len() + 1);
        bytes.extend_from_slice(line.as_bytes());
        bytes.push(b'\n');
        let mut sent = 0;
        while sent < bytes.len() {
            sent += self.send(&bytes[sent..])?;
        }
        Ok(())
    }
}

/// Bytes a remote shell expects for a terminal key.
///
/// Envoi, Correction and Annulation become CR, DEL and NAK; every other
/// key is sent as its own bytes, so the cursor keys arrive as VT100
/// `ESC [ A`..`D` sequences.
pub fn translate_key(key: KeyCode) -> Vec<u8> {
    match key {
        KeyCode(0) => Vec::new(),
        KeyCode::ENVOI => vec![CR],
        KeyCode::CORRECTION => vec![DEL],
        KeyCode::ANNULATION => vec![NAK],
        other => other.bytes(),
    }
}
