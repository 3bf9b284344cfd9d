use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Welcome,
    Background,
    Party,
    Delivery,
    Payment,
    Review,
    Receipt,
}

/// The happy-path wizard order. The keyboard overlay is not a screen.
pub const SCREEN_ORDER: [Screen; 7] = [
    Screen::Welcome,
    Screen::Background,
    Screen::Party,
    Screen::Delivery,
    Screen::Payment,
    Screen::Review,
    Screen::Receipt,
];

/// Screens that count towards "Step n of m".
pub const PROGRESS_SCREENS: [Screen; 5] = [
    Screen::Background,
    Screen::Party,
    Screen::Delivery,
    Screen::Payment,
    Screen::Review,
];

impl Screen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Welcome => "welcome",
            Screen::Background => "background",
            Screen::Party => "party",
            Screen::Delivery => "delivery",
            Screen::Payment => "payment",
            Screen::Review => "review",
            Screen::Receipt => "receipt",
        }
    }

    pub fn position(&self) -> usize {
        SCREEN_ORDER
            .iter()
            .position(|s| s == self)
            .unwrap_or_default()
    }

    /// Text for the progress indicator, if this screen shows one.
    pub fn progress_label(&self) -> Option<String> {
        let total = PROGRESS_SCREENS.len();
        if let Some(index) = PROGRESS_SCREENS.iter().position(|s| s == self) {
            return Some(format!("Step {} of {}", index + 1, total));
        }
        match self {
            Screen::Welcome => Some(format!("Step 1 of {}", total)),
            Screen::Receipt => Some("Receipt Ready".to_string()),
            _ => None,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Screen {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let name = name.strip_prefix("screen-").unwrap_or(&name);
        SCREEN_ORDER
            .iter()
            .copied()
            .find(|screen| screen.as_str() == name)
            .ok_or_else(|| format!("unknown screen '{}'", s))
    }
}
