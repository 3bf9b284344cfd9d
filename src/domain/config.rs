use crate::domain::money::{Price, format_currency, price_label};
use crate::error::{KioskError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Built-in gradients for the stock backgrounds. Any id listed here renders
/// as a gradient and ignores its `file`.
const BACKGROUND_GRADIENTS: &[(&str, &str)] = &[
    (
        "fsu-garnet",
        "linear-gradient(135deg, #782F40, #9b4a54 55%, #CEB888)",
    ),
    ("fsu-gold", "linear-gradient(135deg, #CEB888, #fff1c1)"),
    (
        "fsu-spear",
        "linear-gradient(140deg, #782F40 15%, #CEB888 85%)",
    ),
    ("fsu-campus", "linear-gradient(160deg, #1c2b4a, #782F40)"),
    (
        "fsu-stadium",
        "linear-gradient(135deg, #0f1a30, #782F40 65%, #CEB888)",
    ),
    ("neon", "linear-gradient(135deg, #2d1b69, #f72585)"),
    ("cosmic", "linear-gradient(135deg, #120078, #9d0191)"),
    ("beach", "linear-gradient(135deg, #ffb347, #ffcc33)"),
    ("stage", "linear-gradient(135deg, #414141, #000000)"),
];

const BACKGROUND_ASSET_DIR: &str = "./assets/backgrounds/";

#[derive(Debug, Deserialize, PartialEq, Eq, Clone)]
pub struct BackgroundOption {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub file: Option<String>,
}

impl BackgroundOption {
    /// Resolves the CSS-style image reference shown behind the preview.
    pub fn image_reference(&self) -> String {
        if let Some((_, gradient)) = BACKGROUND_GRADIENTS
            .iter()
            .find(|(id, _)| *id == self.id)
        {
            return (*gradient).to_string();
        }
        match self.file.as_deref().map(str::trim) {
            Some(file) if file.starts_with("http") => format!("url({})", file),
            Some(file) if !file.is_empty() => format!("url({}{})", BACKGROUND_ASSET_DIR, file),
            _ => String::new(),
        }
    }
}

/// How receipt identifiers are produced.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum PhotoIdStrategy {
    /// A random 4-digit display number; collisions are tolerated.
    #[default]
    Random,
    /// One past the highest identifier already in the transaction log.
    Sequential,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_max_people() -> u8 {
    8
}

/// Static event configuration, loaded once before any screen is shown.
#[derive(Debug, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct KioskConfig {
    pub event_name: String,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub backgrounds: Vec<BackgroundOption>,
    pub delivery_methods: Vec<String>,
    pub payment_methods: Vec<String>,
    pub max_prints: u32,
    pub max_emails: usize,
    #[serde(default = "default_max_people")]
    pub max_people: u8,
    pub support_email: String,
    pub hotline: String,
    #[serde(default)]
    pub photo_ids: PhotoIdStrategy,
}

impl KioskConfig {
    /// Reads and validates a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            KioskError::ConfigError(format!("unable to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: KioskConfig = serde_json::from_str(raw)
            .map_err(|e| KioskError::ConfigError(format!("malformed configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.backgrounds.is_empty() {
            return Err(KioskError::ConfigError(
                "at least one background is required".to_string(),
            ));
        }
        let mut ids = HashSet::new();
        for background in &self.backgrounds {
            if !ids.insert(background.id.as_str()) {
                return Err(KioskError::ConfigError(format!(
                    "duplicate background id '{}'",
                    background.id
                )));
            }
        }
        if self.delivery_methods.is_empty() {
            return Err(KioskError::ConfigError(
                "at least one delivery method is required".to_string(),
            ));
        }
        if self.payment_methods.is_empty() {
            return Err(KioskError::ConfigError(
                "at least one payment method is required".to_string(),
            ));
        }
        if self.max_people == 0 {
            return Err(KioskError::ConfigError(
                "maxPeople must be at least 1".to_string(),
            ));
        }
        let currency = self.currency.trim();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(KioskError::ConfigError(format!(
                "currency '{}' is not a three-letter code",
                self.currency
            )));
        }
        Ok(())
    }

    pub fn background(&self, id: &str) -> Option<&BackgroundOption> {
        self.backgrounds.iter().find(|b| b.id == id)
    }

    pub fn is_free(&self) -> bool {
        self.price.is_none_or(|p| p.is_free())
    }

    /// Total due, already formatted, or "Free".
    pub fn total_label(&self) -> String {
        price_label(self.price, &self.currency)
    }

    pub fn event_banner(&self) -> EventBanner {
        match self.price.filter(|p| !p.is_free()) {
            Some(price) => {
                let formatted = format_currency(price.value(), &self.currency);
                EventBanner {
                    event_name: self.event_name.clone(),
                    tagline: TAGLINE.to_string(),
                    price_info: format!("Package Price: {}", formatted),
                    header_price: format!("Only {}", formatted),
                    payment_note: format!(
                        "Total due: {}. Tap a method to continue.",
                        formatted
                    ),
                }
            }
            None => EventBanner {
                event_name: self.event_name.clone(),
                tagline: TAGLINE.to_string(),
                price_info: "Today only: Free photo session!".to_string(),
                header_price: "Free Event".to_string(),
                payment_note: "No payment needed today. Tap a method to confirm delivery."
                    .to_string(),
            },
        }
    }
}

const TAGLINE: &str = "Tap to begin your photo experience";

/// Fixed texts on the welcome, header and payment areas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventBanner {
    pub event_name: String,
    pub tagline: String,
    pub price_info: String,
    pub header_price: String,
    pub payment_note: String,
}
