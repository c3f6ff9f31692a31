//! Keyboard side of the terminal: key codes, their meaning for the chess
//! UI, and decoding from the serial byte stream.

mod decoder;
mod keys;

use std::collections::VecDeque;

pub use decoder::KeyboardDecoder;
pub use keys::{Intent, KeyCode};

use crate::error::Result;

/// Anything that yields keys, one per poll. `None` means the input ended.
pub trait KeySource {
    fn next_key(&mut self) -> Result<Option<KeyCode>>;
}

/// Fixed list of keys, handy for replays and tests.
#[derive(Clone, Debug, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<KeyCode>,
}

impl ScriptedKeys {
    pub fn new<I: IntoIterator<Item = KeyCode>>(keys: I) -> Self { Self { keys: keys.into_iter().collect() } }

    pub fn remaining(&self) -> usize { self.keys.len() }
}

impl KeySource for ScriptedKeys {
    fn next_key(&mut self) -> Result<Option<KeyCode>> { Ok(self.keys.pop_front()) }
}
