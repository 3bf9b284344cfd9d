use crate::application::kiosk::Kiosk;
use crate::domain::receipt::{PendingReceipt, Receipt};
use crate::domain::screen::Screen;
use crate::domain::text_entry::TextTarget;
use crate::error::{KioskError, Result};
use std::path::PathBuf;

/// One customer or attendant action, as delivered by a UI adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KioskCommand {
    Start,
    Next,
    Back,
    GoTo(Screen),
    SelectBackground(String),
    /// `None` when the file picker was dismissed without a file.
    UploadBackground(Option<PathBuf>),
    UseCustomBackground,
    SetPeople(u8),
    SetDelivery(String),
    SetPrints(u32),
    SetEmails(usize),
    SetPayment(String),
    OpenKeyboard(TextTarget),
    Key(char),
    Type(String),
    Space,
    Backspace,
    Clear,
    Done,
    CameraStart,
    CameraCapture,
    CameraRetake,
    CameraStop,
    Confirm,
    Cancel,
    Continue,
    Finish,
}

impl KioskCommand {
    /// Builds a command from an action name and its optional argument.
    pub fn parse(action: &str, value: Option<&str>) -> Result<Self> {
        let action = action.trim().to_ascii_lowercase();
        let value = value.map(str::trim).filter(|v| !v.is_empty());
        let required = |what: &str| {
            value.map(str::to_string).ok_or_else(|| {
                KioskError::CommandError(format!("'{}' needs a {}", action, what))
            })
        };
        let number = |what: &str| -> Result<u32> {
            required(what)?.parse().map_err(|_| {
                KioskError::CommandError(format!("'{}' expects a number", action))
            })
        };

        let command = match action.as_str() {
            "start" => KioskCommand::Start,
            "next" => KioskCommand::Next,
            "back" => KioskCommand::Back,
            "goto" => KioskCommand::GoTo(
                required("screen")?
                    .parse()
                    .map_err(KioskError::CommandError)?,
            ),
            "select_background" => KioskCommand::SelectBackground(required("background id")?),
            "upload_background" => KioskCommand::UploadBackground(value.map(PathBuf::from)),
            "use_custom_background" => KioskCommand::UseCustomBackground,
            "set_people" => KioskCommand::SetPeople(
                u8::try_from(number("count")?)
                    .map_err(|_| KioskError::CommandError("people count too large".to_string()))?,
            ),
            "set_delivery" => KioskCommand::SetDelivery(required("delivery method")?),
            "set_prints" => KioskCommand::SetPrints(number("count")?),
            "set_emails" => KioskCommand::SetEmails(number("count")? as usize),
            "set_payment" => KioskCommand::SetPayment(required("payment method")?),
            "open_keyboard" => KioskCommand::OpenKeyboard(
                required("field")?
                    .parse()
                    .map_err(KioskError::CommandError)?,
            ),
            "key" => match required("key")?.as_str() {
                "Space" | "space" => KioskCommand::Space,
                "⌫" | "backspace" => KioskCommand::Backspace,
                key => {
                    let mut chars = key.chars();
                    match (chars.next(), chars.next()) {
                        (Some(ch), None) => KioskCommand::Key(ch),
                        _ => {
                            return Err(KioskError::CommandError(format!(
                                "'{}' is not a single key",
                                key
                            )));
                        }
                    }
                }
            },
            "type" => KioskCommand::Type(required("text")?),
            "space" => KioskCommand::Space,
            "backspace" => KioskCommand::Backspace,
            "clear" => KioskCommand::Clear,
            "done" => KioskCommand::Done,
            "camera_start" => KioskCommand::CameraStart,
            "camera_capture" => KioskCommand::CameraCapture,
            "camera_retake" => KioskCommand::CameraRetake,
            "camera_stop" => KioskCommand::CameraStop,
            "confirm" => KioskCommand::Confirm,
            "cancel" => KioskCommand::Cancel,
            "continue" => KioskCommand::Continue,
            "finish" => KioskCommand::Finish,
            other => {
                return Err(KioskError::CommandError(format!(
                    "unknown action '{}'",
                    other
                )));
            }
        };
        Ok(command)
    }
}

/// What a command produced that the adapter may need to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Done,
    /// The action was accepted but had no effect (e.g. capture with no stream).
    Ignored,
    ConfirmationRequested(PendingReceipt),
    Finalized(Receipt),
}

impl Kiosk {
    pub async fn execute(&mut self, command: KioskCommand) -> Result<CommandOutcome> {
        let applied = |done: bool| {
            if done {
                CommandOutcome::Done
            } else {
                CommandOutcome::Ignored
            }
        };

        let outcome = match command {
            KioskCommand::Start => {
                self.start()?;
                CommandOutcome::Done
            }
            KioskCommand::Next => {
                self.advance()?;
                CommandOutcome::Done
            }
            KioskCommand::Back => {
                self.retreat()?;
                CommandOutcome::Done
            }
            KioskCommand::GoTo(screen) => {
                self.go_to(screen);
                CommandOutcome::Done
            }
            KioskCommand::SelectBackground(id) => {
                self.select_background(&id)?;
                CommandOutcome::Done
            }
            KioskCommand::UploadBackground(path) => {
                applied(self.load_custom_upload(path.as_deref()).await?)
            }
            KioskCommand::UseCustomBackground => applied(self.use_custom_background()?),
            KioskCommand::SetPeople(count) => {
                self.set_people_count(count)?;
                CommandOutcome::Done
            }
            KioskCommand::SetDelivery(method) => {
                self.set_delivery_method(&method)?;
                CommandOutcome::Done
            }
            KioskCommand::SetPrints(count) => {
                self.set_print_count(count)?;
                CommandOutcome::Done
            }
            KioskCommand::SetEmails(count) => {
                self.set_email_count(count)?;
                CommandOutcome::Done
            }
            KioskCommand::SetPayment(method) => {
                self.set_payment_method(&method)?;
                CommandOutcome::Done
            }
            KioskCommand::OpenKeyboard(target) => {
                self.open_text_entry(target)?;
                CommandOutcome::Done
            }
            KioskCommand::Key(ch) => {
                self.type_character(ch);
                CommandOutcome::Done
            }
            KioskCommand::Type(text) => {
                text.chars().for_each(|ch| self.type_character(ch));
                CommandOutcome::Done
            }
            KioskCommand::Space => {
                self.type_space();
                CommandOutcome::Done
            }
            KioskCommand::Backspace => {
                self.backspace();
                CommandOutcome::Done
            }
            KioskCommand::Clear => {
                self.clear_text();
                CommandOutcome::Done
            }
            KioskCommand::Done => {
                self.commit_text()?;
                CommandOutcome::Done
            }
            KioskCommand::CameraStart => {
                self.start_camera().await?;
                CommandOutcome::Done
            }
            KioskCommand::CameraCapture => applied(self.capture_selfie()?),
            KioskCommand::CameraRetake => applied(self.retake_selfie()?),
            KioskCommand::CameraStop => {
                self.stop_camera();
                CommandOutcome::Done
            }
            KioskCommand::Confirm => CommandOutcome::ConfirmationRequested(self.confirm()?),
            KioskCommand::Cancel => applied(self.cancel_confirm()),
            KioskCommand::Continue => CommandOutcome::Finalized(self.finalize().await?),
            KioskCommand::Finish => {
                self.reset();
                CommandOutcome::Done
            }
        };
        Ok(outcome)
    }
}
