use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Keys shown on the on-screen keyboard, row by row.
pub const KEYBOARD_LAYOUT: [&str; 42] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "0", //
    "Q", "W", "E", "R", "T", "Y", "U", "I", "O", "P", //
    "A", "S", "D", "F", "G", "H", "J", "K", "L", "@", //
    "Z", "X", "C", "V", "B", "N", "M", ".", "-", "_", //
    "Space", "⌫",
];

/// Which session field the keyboard is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextTarget {
    PartyName,
    /// Zero-based email slot.
    Email(usize),
}

impl fmt::Display for TextTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextTarget::PartyName => f.write_str("party_name"),
            TextTarget::Email(index) => write!(f, "email:{}", index),
        }
    }
}

impl FromStr for TextTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "party_name" || s == "party-name" {
            return Ok(TextTarget::PartyName);
        }
        s.strip_prefix("email:")
            .or_else(|| s.strip_prefix("email-"))
            .and_then(|index| index.trim().parse().ok())
            .map(TextTarget::Email)
            .ok_or_else(|| format!("unknown text field '{}'", s))
    }
}

/// Modal single-field editor.
///
/// At most one target is open at a time; everything typed goes into a
/// pending buffer until it is committed or the overlay is force-closed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextEntry {
    active: Option<TextTarget>,
    buffer: String,
}

impl TextEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the overlay on `target`, seeding the buffer with the field's
    /// current value. Opening an already open target just reseeds it.
    pub fn open(&mut self, target: TextTarget, initial: &str) {
        self.active = Some(target);
        self.buffer = initial.to_string();
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn target(&self) -> Option<TextTarget> {
        self.active
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn append_character(&mut self, ch: char) {
        self.buffer.push(ch);
    }

    pub fn append_space(&mut self) {
        self.buffer.push(' ');
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Closes the overlay and hands back the trimmed value for the target.
    ///
    /// With no open target this only closes.
    pub fn commit(&mut self) -> Option<(TextTarget, String)> {
        let value = self.buffer.trim().to_string();
        self.active.take().map(|target| {
            self.buffer.clear();
            (target, value)
        })
    }

    /// Closes without writing anything back.
    pub fn close(&mut self) {
        self.active = None;
        self.buffer.clear();
    }
}
