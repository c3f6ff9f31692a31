use std::fmt;

use crate::board::Direction;

/// A key as reported by the terminal keyboard.
///
/// Multi-byte sequences are packed big-endian: `SEP A` (Envoi) is
/// `0x1341`, the up arrow `ESC [ A` is `0x1B5B41`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const CR: KeyCode = KeyCode(0x0D);
    pub const ESC: KeyCode = KeyCode(0x1B);
    pub const SPACE: KeyCode = KeyCode(0x20);
    pub const DEL: KeyCode = KeyCode(0x7F);

    pub const ENVOI: KeyCode = KeyCode(0x1341);
    pub const RETOUR: KeyCode = KeyCode(0x1342);
    pub const REPETITION: KeyCode = KeyCode(0x1343);
    pub const GUIDE: KeyCode = KeyCode(0x1344);
    pub const ANNULATION: KeyCode = KeyCode(0x1345);
    pub const SOMMAIRE: KeyCode = KeyCode(0x1346);
    pub const CORRECTION: KeyCode = KeyCode(0x1347);
    pub const SUITE: KeyCode = KeyCode(0x1348);
    pub const CONNEXION_FIN: KeyCode = KeyCode(0x1359);

    pub const ARROW_UP: KeyCode = KeyCode(0x1B5B41);
    pub const ARROW_DOWN: KeyCode = KeyCode(0x1B5B42);
    pub const ARROW_RIGHT: KeyCode = KeyCode(0x1B5B43);
    pub const ARROW_LEFT: KeyCode = KeyCode(0x1B5B44);

    /// Significant bytes, most significant first (at least one).
    pub fn bytes(self) -> Vec<u8> {
        let raw = self.0.to_be_bytes();
        // At most three leading zeros are skipped, so the last byte always stays.
        let skip = raw.iter().take(3).take_while(|b| **b == 0).count();
        raw[skip..].to_vec()
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{:#x}", self.0) }
}

/// What a key means to the chess UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    Move(Direction),
    Confirm,
    Cancel,
    Ignored,
}

const KEY_INTENTS: [(KeyCode, Intent); 16] = [
    (KeyCode::ARROW_UP, Intent::Move(Direction::Up)),
    (KeyCode::ARROW_DOWN, Intent::Move(Direction::Down)),
    (KeyCode::ARROW_LEFT, Intent::Move(Direction::Left)),
    (KeyCode::ARROW_RIGHT, Intent::Move(Direction::Right)),
    (KeyCode::ENVOI, Intent::Confirm),
    (KeyCode::SPACE, Intent::Confirm),
    (KeyCode::CORRECTION, Intent::Cancel),
    (KeyCode::ANNULATION, Intent::Cancel),
    (KeyCode::RETOUR, Intent::Cancel),
    (KeyCode::ESC, Intent::Cancel),
    (KeyCode::DEL, Intent::Cancel),
    // function keys with no meaning on the board
    (KeyCode::CONNEXION_FIN, Intent::Ignored),
    (KeyCode::SOMMAIRE, Intent::Ignored),
    (KeyCode::REPETITION, Intent::Ignored),
    (KeyCode::GUIDE, Intent::Ignored),
    (KeyCode::SUITE, Intent::Ignored),
];

impl Intent {
    pub fn from_key(key: KeyCode) -> Intent {
        KEY_INTENTS.iter().find(|(k, _)| *k == key).map(|(_, intent)| *intent).unwrap_or(Intent::Ignored)
    }
}
