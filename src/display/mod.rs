//! The terminal as a display capability.
//!
//! Rendering code only talks to [`DisplayDevice`]; [`VideotexEncoder`]
//! turns the calls into Minitel bytes and [`RecordingDisplay`] keeps them
//! as a list for inspection.

mod recorder;
mod videotex;

pub use recorder::{DrawCall, RecordingDisplay};
pub use videotex::{graphic_byte, VideotexEncoder};

use crate::error::{Error, Result};

/// The eight Videotex colors, in protocol order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TermColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl TermColor {
    pub const fn code(self) -> u8 {
        match self {
            TermColor::Black => 0,
            TermColor::Red => 1,
            TermColor::Green => 2,
            TermColor::Yellow => 3,
            TermColor::Blue => 4,
            TermColor::Magenta => 5,
            TermColor::Cyan => 6,
            TermColor::White => 7,
        }
    }
}

/// Serial attributes that apply to the characters written next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Attribute {
    Foreground(TermColor),
    Background(TermColor),
    Blink,
    Steady,
    /// Start of underline in text mode, lining (separated mosaics) in graphic mode.
    StartLining,
    EndLining,
    InverseBackground,
    NormalBackground,
}

impl Attribute {
    /// Byte sent after ESC.
    pub const fn code(self) -> u8 {
        match self {
            Attribute::Foreground(c) => 0x40 + c.code(),
            Attribute::Background(c) => 0x50 + c.code(),
            Attribute::Blink => 0x48,
            Attribute::Steady => 0x49,
            Attribute::EndLining => 0x59,
            Attribute::StartLining => 0x5A,
            Attribute::NormalBackground => 0x5C,
            Attribute::InverseBackground => 0x5D,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Baud {
    B300,
    B1200,
    B4800,
    B9600,
}

impl Baud {
    pub const fn bits_per_second(self) -> u32 {
        match self {
            Baud::B300 => 300,
            Baud::B1200 => 1200,
            Baud::B4800 => 4800,
            Baud::B9600 => 9600,
        }
    }
}

impl TryFrom<u32> for Baud {
    type Error = Error;

    fn try_from(bps: u32) -> Result<Self> {
        match bps {
            300 => Ok(Baud::B300),
            1200 => Ok(Baud::B1200),
            4800 => Ok(Baud::B4800),
            9600 => Ok(Baud::B9600),
            other => Err(Error::UnsupportedBaud(other)),
        }
    }
}

/// Command set of the terminal. Screen coordinates are 1-based columns
/// (x) and rows (y); row 0 is the status line.
pub trait DisplayDevice {
    fn clear_screen(&mut self);
    fn move_to(&mut self, x: u8, y: u8);
    fn move_left(&mut self, n: u8);
    fn move_down(&mut self, n: u8);
    fn text_mode(&mut self);
    fn graphic_mode(&mut self);
    fn attribute(&mut self, attr: Attribute);
    /// One semi-graphic cell from a 6-bit pattern in reading order (bit 5 top-left).
    fn graphic(&mut self, pattern: u8);
    fn print_char(&mut self, c: u8);
    /// Repeats the last written character `n` more times.
    fn repeat(&mut self, n: u8);
    fn hide_cursor(&mut self);
    fn set_baud(&mut self, baud: Baud);
    fn echo(&mut self, on: bool);
    fn extended_keyboard(&mut self);
    /// Bytes passed through untouched (remote host output).
    fn raw(&mut self, bytes: &[u8]);
    fn flush(&mut self) -> Result<()>;
}

impl<D: DisplayDevice + ?Sized> DisplayDevice for &mut D {
    fn clear_screen(&mut self) { (**self).clear_screen() }
    fn move_to(&mut self, x: u8, y: u8) { (**self).move_to(x, y) }
    fn move_left(&mut self, n: u8) { (**self).move_left(n) }
    fn move_down(&mut self, n: u8) { (**self).move_down(n) }
    fn text_mode(&mut self) { (**self).text_mode() }
    fn graphic_mode(&mut self) { (**self).graphic_mode() }
    fn attribute(&mut self, attr: Attribute) { (**self).attribute(attr) }
    fn graphic(&mut self, pattern: u8) { (**self).graphic(pattern) }
    fn print_char(&mut self, c: u8) { (**self).print_char(c) }
    fn repeat(&mut self, n: u8) { (**self).repeat(n) }
    fn hide_cursor(&mut self) { (**self).hide_cursor() }
    fn set_baud(&mut self, baud: Baud) { (**self).set_baud(baud) }
    fn echo(&mut self, on: bool) { (**self).echo(on) }
    fn extended_keyboard(&mut self) { (**self).extended_keyboard() }
    fn raw(&mut self, bytes: &[u8]) { (**self).raw(bytes) }
    fn flush(&mut self) -> Result<()> { (**self).flush() }
}

/// Puts a freshly connected terminal into the state the UI expects:
/// no local echo, cursor keys enabled, blank screen, hidden cursor, steady
/// characters. Line speed is changed separately, see
/// [`crate::serial::change_speed`].
pub fn prepare_terminal<D: DisplayDevice>(device: &mut D) -> Result<()> {
    device.echo(false);
    device.extended_keyboard();
    device.clear_screen();
    device.hide_cursor();
    device.attribute(Attribute::Steady);
    device.flush()
}
