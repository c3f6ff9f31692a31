use std::io::Write;

use super::{Attribute, Baud, DisplayDevice};
use crate::error::Result;

const SO: u8 = 0x0E;
const SI: u8 = 0x0F;
const FF: u8 = 0x0C;
const REP: u8 = 0x12;
const COF: u8 = 0x14;
const ESC: u8 = 0x1B;
const US: u8 = 0x1F;
const CSI: [u8; 2] = [ESC, b'['];

const PRO2: [u8; 2] = [ESC, 0x3A];
const PRO3: [u8; 2] = [ESC, 0x3B];
const PROG: u8 = 0x6B;
const START: u8 = 0x69;
const AIGUILLAGE_OFF: u8 = 0x60;
const AIGUILLAGE_ON: u8 = 0x61;
const RCPT_MODEM: u8 = 0x5A;
const RCPT_CLAVIER: u8 = 0x59;
const EMET_CLAVIER: u8 = 0x51;
const ETEN: u8 = 0x41;

/// G1 character for a 6-bit mosaic pattern given in reading order.
///
/// Pattern bit 5 is the top-left block and bit 0 the bottom-right one.
/// The full block lands on 0x7F (DEL), which the terminal ignores, so it is
/// sent as its 0x5F alias.
pub const fn graphic_byte(pattern: u8) -> u8 {
    let p = pattern & 0x3F;
    let b = 0x20
        | ((p >> 5) & 1)
        | (((p >> 4) & 1) << 1)
        | (((p >> 3) & 1) << 2)
        | (((p >> 2) & 1) << 3)
        | (((p >> 1) & 1) << 4)
        | ((p & 1) << 6);
    if b == 0x7F { 0x5F } else { b }
}

const fn baud_code(baud: Baud) -> u8 {
    match baud {
        Baud::B300 => 0x52,
        Baud::B1200 => 0x64,
        Baud::B4800 => 0x76,
        Baud::B9600 => 0x7F,
    }
}

/// Encodes display commands as Videotex bytes, buffered until `flush`.
pub struct VideotexEncoder<W: Write> {
    out: W,
    buf: Vec<u8>,
}

impl<W: Write> VideotexEncoder<W> {
    pub fn new(out: W) -> Self { Self { out, buf: Vec::with_capacity(256) } }

    /// Bytes encoded since the last flush.
    pub fn pending(&self) -> &[u8] { &self.buf }

    pub fn get_ref(&self) -> &W { &self.out }

    /// The sink, for settings that live outside the byte stream.
    pub fn get_mut(&mut self) -> &mut W { &mut self.out }

    /// Returns the sink; unflushed bytes are dropped.
    pub fn into_inner(self) -> W { self.out }

    fn put(&mut self, bytes: &[u8]) { self.buf.extend_from_slice(bytes); }

    fn csi_count(&mut self, n: u8, cmd: u8) {
        self.put(&CSI);
        self.put(n.to_string().as_bytes());
        self.buf.push(cmd);
    }
}

impl<W: Write> DisplayDevice for VideotexEncoder<W> {
    fn clear_screen(&mut self) { self.buf.push(FF) }

    fn move_to(&mut self, x: u8, y: u8) { self.put(&[US, 0x40 + (y & 0x3F), 0x40 + (x & 0x3F)]) }

    fn move_left(&mut self, n: u8) { self.csi_count(n, b'D') }

    fn move_down(&mut self, n: u8) { self.csi_count(n, b'B') }

    fn text_mode(&mut self) { self.buf.push(SI) }

    fn graphic_mode(&mut self) { self.buf.push(SO) }

    fn attribute(&mut self, attr: Attribute) { self.put(&[ESC, attr.code()]) }

    fn graphic(&mut self, pattern: u8) {
        if pattern > 0x3F {
            log::warn!("ignoring mosaic pattern {pattern:#04x} wider than 6 bits");
            return;
        }
        self.buf.push(graphic_byte(pattern));
    }

    fn print_char(&mut self, c: u8) { self.buf.push(c & 0x7F) }

    fn repeat(&mut self, n: u8) {
        if n == 0 {
            return;
        }
        self.put(&[REP, 0x40 + n.min(0x3F)]);
    }

    fn hide_cursor(&mut self) { self.buf.push(COF) }

    fn set_baud(&mut self, baud: Baud) {
        self.put(&PRO2);
        self.put(&[PROG, baud_code(baud)]);
    }

    fn echo(&mut self, on: bool) {
        let switch = if on { AIGUILLAGE_ON } else { AIGUILLAGE_OFF };
        self.put(&PRO3);
        self.put(&[switch, RCPT_MODEM, EMET_CLAVIER]);
    }

    fn extended_keyboard(&mut self) {
        self.put(&PRO3);
        self.put(&[START, RCPT_CLAVIER, ETEN]);
    }

    fn raw(&mut self, bytes: &[u8]) { self.put(bytes) }

    fn flush(&mut self) -> Result<()> {
        if !self.buf.is_empty() {
            self.out.write_all(&self.buf)?;
            log::trace!("flushed {} videotex bytes", self.buf.len());
            self.buf.clear();
        }
        self.out.flush()?;
        Ok(())
    }
}
