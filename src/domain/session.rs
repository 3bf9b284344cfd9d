use crate::error::KioskError;
use serde::{Deserialize, Serialize};

pub const CUSTOM_BACKGROUND_ID: &str = "custom";
pub const CUSTOM_BACKGROUND_NAME: &str = "Custom Background";

/// Raw image bytes as handed over by the camera or the upload reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl ImagePayload {
    pub fn new(media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            media_type: media_type.into(),
            bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundChoice {
    pub id: String,
    pub display_name: String,
    pub image_reference: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundSource {
    #[default]
    None,
    Preset,
    Custom,
}

/// Email slots whose length always equals the requested email count.
///
/// Changing the count reallocates every slot; previously typed addresses are
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmailSlots(Vec<String>);

impl EmailSlots {
    pub fn with_len(count: usize) -> Self {
        Self(vec![String::new(); count])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn set(&mut self, index: usize, value: String) -> Result<(), KioskError> {
        let len = self.0.len();
        let slot = self.0.get_mut(index).ok_or_else(|| {
            KioskError::InvalidSelection(format!(
                "email slot {} does not exist ({} requested)",
                index + 1,
                len
            ))
        })?;
        *slot = value;
        Ok(())
    }

    /// Trimmed, non-empty entries in slot order.
    pub fn filled(&self) -> Vec<&str> {
        self.0
            .iter()
            .map(|email| email.trim())
            .filter(|email| !email.is_empty())
            .collect()
    }
}

/// Everything known about the customer currently at the kiosk.
///
/// `Default` is the empty session a new customer starts from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    preset: Option<BackgroundChoice>,
    custom_upload: Option<ImagePayload>,
    background_source: BackgroundSource,
    pub party_name: String,
    pub people_count: Option<u8>,
    pub delivery_method: Option<String>,
    pub print_count: u32,
    emails: EmailSlots,
    pub payment_method: Option<String>,
    pub selfie: Option<ImagePayload>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole session with the initial one.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn background_source(&self) -> BackgroundSource {
        self.background_source
    }

    /// Makes a preset the active background. A cached upload stays cached.
    pub fn select_preset(&mut self, choice: BackgroundChoice) {
        self.preset = Some(choice);
        self.background_source = BackgroundSource::Preset;
    }

    pub fn cache_custom_upload(&mut self, payload: ImagePayload) {
        self.custom_upload = Some(payload);
    }

    /// Forgets a cached upload unless it is the active background.
    pub fn discard_custom_upload(&mut self) {
        if self.background_source != BackgroundSource::Custom {
            self.custom_upload = None;
        }
    }

    pub fn custom_upload(&self) -> Option<&ImagePayload> {
        self.custom_upload.as_ref()
    }

    /// Activates the cached upload. Returns `false` when nothing was uploaded.
    pub fn use_custom_background(&mut self) -> bool {
        if self.custom_upload.is_none() {
            return false;
        }
        self.background_source = BackgroundSource::Custom;
        true
    }

    /// The background that is currently active, if any.
    pub fn background(&self) -> Option<BackgroundChoice> {
        match self.background_source {
            BackgroundSource::None => None,
            BackgroundSource::Preset => self.preset.clone(),
            BackgroundSource::Custom => self.custom_upload.as_ref().map(|_| BackgroundChoice {
                id: CUSTOM_BACKGROUND_ID.to_string(),
                display_name: CUSTOM_BACKGROUND_NAME.to_string(),
                image_reference: "url(custom-upload)".to_string(),
            }),
        }
    }

    pub fn has_background(&self) -> bool {
        self.background().is_some()
    }

    pub fn email_count(&self) -> usize {
        self.emails.len()
    }

    pub fn set_email_count(&mut self, count: usize) {
        self.emails = EmailSlots::with_len(count);
    }

    pub fn emails(&self) -> &EmailSlots {
        &self.emails
    }

    pub fn set_email(&mut self, index: usize, value: String) -> Result<(), KioskError> {
        self.emails.set(index, value)
    }
}
