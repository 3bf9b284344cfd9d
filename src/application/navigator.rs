use crate::domain::screen::{SCREEN_ORDER, Screen};

/// Position in the fixed wizard order. Moves are clamped to the ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Navigator {
    index: usize,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Screen {
        SCREEN_ORDER[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn go_to(&mut self, screen: Screen) {
        self.index = screen.position();
    }

    /// The screen one step forward, or the last screen when already there.
    pub fn next_target(&self) -> Screen {
        SCREEN_ORDER[(self.index + 1).min(SCREEN_ORDER.len() - 1)]
    }

    /// The screen one step back, or the first screen when already there.
    pub fn previous_target(&self) -> Screen {
        SCREEN_ORDER[self.index.saturating_sub(1)]
    }
}
