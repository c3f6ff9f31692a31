use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use super::{translate_key, Transport};
use crate::display::DisplayDevice;
use crate::error::Result;
use crate::input::{KeyCode, KeySource};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RelayStats {
    pub bytes_in: usize,
    pub bytes_out: usize,
    pub keys: usize,
}

/// Reads keys on a separate thread; the channel closes when the source
/// ends or fails.
pub fn spawn_key_reader<K>(mut keys: K) -> Receiver<KeyCode>
where
    K: KeySource + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || loop {
        match keys.next_key() {
            Ok(Some(key)) => {
                if tx.send(key).is_err() {
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                log::warn!("keyboard read failed: {e}");
                break;
            }
        }
    });
    rx
}

/// Shuttles bytes between the remote host and the terminal until either
/// side goes away.
///
/// Each round checks the connection, forwards whatever the host sent
/// straight to the display, then forwards at most one pending key. Any
/// transport error ends the session.
pub fn run_relay<T, D>(transport: &mut T, display: &mut D, keys: &Receiver<KeyCode>) -> Result<RelayStats>
where
    T: Transport + ?Sized,
    D: DisplayDevice + ?Sized,
{
    let mut stats = RelayStats::default();
    let mut buf = [0u8; 256];
    loop {
        if !transport.is_open() {
            log::info!("remote side closed");
            break;
        }
        let n = transport.receive(&mut buf)?;
        if n > 0 {
            display.raw(&buf[..n]);
            display.flush()?;
            stats.bytes_in += n;
        }
        match keys.try_recv() {
            Ok(key) => {
                stats.keys += 1;
                let bytes = translate_key(key);
                if bytes.is_empty() {
                    continue;
                }
                if !transport.is_open() {
                    log::info!("remote side closed");
                    break;
                }
                stats.bytes_out += transport.send(&bytes)?;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                log::info!("terminal input closed");
                break;
            }
        }
    }
    log::info!("relay ended: {} bytes in, {} bytes out, {} keys", stats.bytes_in, stats.bytes_out, stats.keys);
    Ok(stats)
}
