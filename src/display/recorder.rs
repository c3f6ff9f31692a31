use super::{Attribute, Baud, DisplayDevice};
use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawCall {
    ClearScreen,
    MoveTo { x: u8, y: u8 },
    MoveLeft(u8),
    MoveDown(u8),
    TextMode,
    GraphicMode,
    Attribute(Attribute),
    Graphic(u8),
    Char(u8),
    Repeat(u8),
    HideCursor,
    SetBaud(Baud),
    Echo(bool),
    ExtendedKeyboard,
    Raw(Vec<u8>),
    Flush,
}

/// Display double that keeps every call instead of driving hardware.
#[derive(Clone, Debug, Default)]
pub struct RecordingDisplay {
    calls: Vec<DrawCall>,
}

impl RecordingDisplay {
    pub fn new() -> Self { Self::default() }

    pub fn calls(&self) -> &[DrawCall] { &self.calls }

    /// Returns the calls recorded so far and starts a fresh list.
    pub fn take(&mut self) -> Vec<DrawCall> { std::mem::take(&mut self.calls) }

    pub fn clear(&mut self) { self.calls.clear(); }

    /// Positions visited with `MoveTo`, in order.
    pub fn positions(&self) -> Vec<(u8, u8)> {
        self.calls
            .iter()
            .filter_map(|c| match c { DrawCall::MoveTo { x, y } => Some((*x, *y)), _ => None })
            .collect()
    }

    fn push(&mut self, call: DrawCall) { self.calls.push(call); }
}

impl DisplayDevice for RecordingDisplay {
    fn clear_screen(&mut self) { self.push(DrawCall::ClearScreen) }
    fn move_to(&mut self, x: u8, y: u8) { self.push(DrawCall::MoveTo { x, y }) }
    fn move_left(&mut self, n: u8) { self.push(DrawCall::MoveLeft(n)) }
    fn move_down(&mut self, n: u8) { self.push(DrawCall::MoveDown(n)) }
    fn text_mode(&mut self) { self.push(DrawCall::TextMode) }
    fn graphic_mode(&mut self) { self.push(DrawCall::GraphicMode) }
    fn attribute(&mut self, attr: Attribute) { self.push(DrawCall::Attribute(attr)) }
    fn graphic(&mut self, pattern: u8) { self.push(DrawCall::Graphic(pattern)) }
    fn print_char(&mut self, c: u8) { self.push(DrawCall::Char(c)) }
    fn repeat(&mut self, n: u8) { self.push(DrawCall::Repeat(n)) }
    fn hide_cursor(&mut self) { self.push(DrawCall::HideCursor) }
    fn set_baud(&mut self, baud: Baud) { self.push(DrawCall::SetBaud(baud)) }
    fn echo(&mut self, on: bool) { self.push(DrawCall::Echo(on)) }
    fn extended_keyboard(&mut self) { self.push(DrawCall::ExtendedKeyboard) }
    fn raw(&mut self, bytes: &[u8]) { self.push(DrawCall::Raw(bytes.to_vec())) }
    fn flush(&mut self) -> Result<()> {
        self.push(DrawCall::Flush);
        Ok(())
    }
}
