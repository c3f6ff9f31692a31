use std::io::{BufReader, ErrorKind, Read};

use super::{KeyCode, KeySource};
use crate::error::Result;

const SEP: u8 = 0x13;
const SS2: u8 = 0x19;
const ESC: u8 = 0x1B;

/// Splits the terminal's keyboard byte stream into key codes.
///
/// Sequence lengths follow the Minitel keyboard: `SEP x` and `SS2 x` are
/// two bytes, `ESC [ x` three, and `ESC [ 2 x` / `ESC [ 4 x` four.
///
/// The reader is expected to time out (`TimedOut` or `WouldBlock`) when the
/// line stays quiet, as a serial port opened with a read timeout does. Only
/// the byte after an ESC gets a single timeout to show up; if none does,
/// the ESC key itself is reported. Every other read keeps waiting. A byte
/// after ESC that does not start a CSI sequence is decoded on the
/// following call.
pub struct KeyboardDecoder<R: Read> {
    reader: BufReader<R>,
    pending: Option<u8>,
}

impl<R: Read> KeyboardDecoder<R> {
    pub fn new(reader: R) -> Self { Self { reader: BufReader::new(reader), pending: None } }

    /// Next byte, or `None` at end of input. When `patient` is false a
    /// single read timeout also gives `None`.
    fn next_byte(&mut self, patient: bool) -> Result<Option<u8>> {
        if let Some(b) = self.pending.take() {
            return Ok(Some(b));
        }
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                // 7E1 frames read through an 8-bit port keep parity in the top bit
                Ok(_) => return Ok(Some(byte[0] & 0x7F)),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => {
                    if !patient {
                        return Ok(None);
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn decode(&mut self, first: u8) -> Result<KeyCode> {
        let lead = first as u32;
        match first {
            SEP | SS2 => Ok(match self.next_byte(true)? {
                Some(b) => KeyCode(lead << 8 | b as u32),
                None => KeyCode(lead),
            }),
            ESC => {
                let second = match self.next_byte(false)? {
                    Some(b'[') => b'[' as u32,
                    Some(other) => {
                        self.pending = Some(other);
                        return Ok(KeyCode::ESC);
                    }
                    None => return Ok(KeyCode::ESC),
                };
                let csi = lead << 8 | second;
                let Some(third) = self.next_byte(true)? else { return Ok(KeyCode(csi)) };
                if third == 0x32 || third == 0x34 {
                    if let Some(fourth) = self.next_byte(true)? {
                        return Ok(KeyCode(csi << 16 | (third as u32) << 8 | fourth as u32));
                    }
                }
                Ok(KeyCode(csi << 8 | third as u32))
            }
            _ => Ok(KeyCode(lead)),
        }
    }
}

impl<R: Read> KeySource for KeyboardDecoder<R> {
    fn next_key(&mut self) -> Result<Option<KeyCode>> {
        match self.next_byte(true)? {
            Some(first) => {
                let key = self.decode(first)?;
                log::trace!("key {key}");
                Ok(Some(key))
            }
            None => Ok(None),
        }
    }
}
