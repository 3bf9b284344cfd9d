use crate::application::navigator::Navigator;
use crate::application::selfie::{CaptureState, SelfieStation};
use crate::domain::config::{EventBanner, KioskConfig};
use crate::domain::ports::{
    ClockBox, KioskPorts, NotifierBox, PhotoIdSourceBox, TransactionLogBox, UploadSourceBox,
};
use crate::domain::receipt::{
    OrderSummary, PendingReceipt, Receipt, TransactionRecord, project_receipt_details,
    project_summary,
};
use crate::domain::screen::Screen;
use crate::domain::session::{BackgroundChoice, SessionState};
use crate::domain::text_entry::{TextEntry, TextTarget};
use crate::domain::validation::{ValidationError, validate_screen};
use crate::error::{KioskError, Result};
use std::path::Path;
use tracing::{debug, info, warn};

/// Where the customer is in the final confirmation step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CheckoutPhase {
    #[default]
    Reviewing,
    /// The confirmation prompt is open for this receipt.
    ConfirmPending(PendingReceipt),
    /// The last order was logged; the kiosk shows its receipt.
    Finalized,
}

/// One kiosk serving one customer at a time.
///
/// `Kiosk` owns the session and every port. All operations run to completion
/// in the order they are called; the only suspension points are the camera,
/// the upload reader, the transaction log and notification dispatch.
pub struct Kiosk {
    config: KioskConfig,
    session: SessionState,
    navigator: Navigator,
    text_entry: TextEntry,
    selfie: SelfieStation,
    phase: CheckoutPhase,
    log: TransactionLogBox,
    notifier: NotifierBox,
    uploads: UploadSourceBox,
    photo_ids: PhotoIdSourceBox,
    clock: ClockBox,
}

impl Kiosk {
    /// Creates a kiosk on the welcome screen with an empty session.
    ///
    /// # Arguments
    ///
    /// * `config` - Validated event configuration.
    /// * `ports` - Transaction log, notifier, camera, upload reader, photo id
    ///   source and clock.
    pub fn new(config: KioskConfig, ports: KioskPorts) -> Self {
        Self {
            config,
            session: SessionState::new(),
            navigator: Navigator::new(),
            text_entry: TextEntry::new(),
            selfie: SelfieStation::new(ports.camera),
            phase: CheckoutPhase::Reviewing,
            log: ports.log,
            notifier: ports.notifier,
            uploads: ports.uploads,
            photo_ids: ports.photo_ids,
            clock: ports.clock,
        }
    }

    pub fn config(&self) -> &KioskConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn current_screen(&self) -> Screen {
        self.navigator.current()
    }

    pub fn current_index(&self) -> usize {
        self.navigator.index()
    }

    pub fn progress_label(&self) -> Option<String> {
        self.navigator.current().progress_label()
    }

    pub fn text_entry(&self) -> &TextEntry {
        &self.text_entry
    }

    pub fn phase(&self) -> &CheckoutPhase {
        &self.phase
    }

    pub fn capture_state(&self) -> CaptureState {
        self.selfie.state()
    }

    pub fn banner(&self) -> EventBanner {
        self.config.event_banner()
    }

    /// Whether a custom upload is cached and "use" may be pressed.
    pub fn custom_upload_ready(&self) -> bool {
        self.session.custom_upload().is_some()
    }

    // --- navigation -------------------------------------------------------

    /// Jumps straight to `screen`. Closes the keyboard overlay without
    /// committing and drops any open confirmation prompt.
    ///
    /// Leaving the party screen by any route releases the camera. Leaving the
    /// receipt screen starts a new checkout.
    pub fn go_to(&mut self, screen: Screen) {
        let leaving = self.navigator.current();
        self.text_entry.close();
        if leaving == Screen::Party && screen != Screen::Party {
            self.selfie.stop();
        }
        match self.phase {
            CheckoutPhase::ConfirmPending(_) => self.phase = CheckoutPhase::Reviewing,
            CheckoutPhase::Finalized if screen != Screen::Receipt => {
                self.phase = CheckoutPhase::Reviewing
            }
            _ => {}
        }
        self.navigator.go_to(screen);
        debug!(screen = %screen, progress = ?screen.progress_label(), "showing screen");
    }

    /// Entry point from the welcome screen.
    pub fn start(&mut self) -> Result<()> {
        self.ensure_editable()?;
        self.go_to(Screen::Background);
        Ok(())
    }

    /// Moves one screen forward if the screen being left validates.
    ///
    /// A failed validation changes nothing and returns the message to show.
    pub fn advance(&mut self) -> Result<Screen> {
        self.ensure_editable()?;
        let leaving = self.navigator.current();
        let target = self.navigator.next_target();
        if let Err(reason) = validate_screen(leaving, &self.session) {
            warn!(screen = %leaving, %reason, "validation failed");
            return Err(reason.into());
        }
        self.go_to(target);
        Ok(target)
    }

    /// Moves one screen back. Never blocked by validation.
    pub fn retreat(&mut self) -> Result<Screen> {
        self.ensure_editable()?;
        let target = self.navigator.previous_target();
        self.go_to(target);
        Ok(target)
    }

    pub fn validate(&self, screen: Screen) -> std::result::Result<(), ValidationError> {
        validate_screen(screen, &self.session)
    }

    // --- selections -------------------------------------------------------

    pub fn select_background(&mut self, id: &str) -> Result<()> {
        self.ensure_editable()?;
        let option = self.config.background(id).ok_or_else(|| {
            KioskError::InvalidSelection(format!("unknown background '{}'", id))
        })?;
        let choice = BackgroundChoice {
            id: option.id.clone(),
            display_name: option.name.clone(),
            image_reference: option.image_reference(),
        };
        self.session.select_preset(choice);
        Ok(())
    }

    /// Reads an uploaded background. Missing or unreadable files disable the
    /// "use" action instead of raising an error.
    pub async fn load_custom_upload(&mut self, path: Option<&Path>) -> Result<bool> {
        self.ensure_editable()?;
        let Some(path) = path else {
            self.session.discard_custom_upload();
            return Ok(false);
        };
        match self.uploads.read(path).await {
            Ok(payload) if !payload.bytes.is_empty() => {
                debug!(path = %path.display(), size = payload.bytes.len(), "custom background loaded");
                self.session.cache_custom_upload(payload);
                Ok(true)
            }
            Ok(_) => {
                debug!(path = %path.display(), "custom background is empty");
                self.session.discard_custom_upload();
                Ok(false)
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "custom background unreadable");
                self.session.discard_custom_upload();
                Ok(false)
            }
        }
    }

    pub fn use_custom_background(&mut self) -> Result<bool> {
        self.ensure_editable()?;
        Ok(self.session.use_custom_background())
    }

    pub fn set_people_count(&mut self, count: u8) -> Result<()> {
        self.ensure_editable()?;
        if count == 0 || count > self.config.max_people {
            return Err(KioskError::InvalidSelection(format!(
                "people count must be between 1 and {}",
                self.config.max_people
            )));
        }
        self.session.people_count = Some(count);
        Ok(())
    }

    pub fn set_delivery_method(&mut self, method: &str) -> Result<()> {
        self.ensure_editable()?;
        let method = Self::configured(&self.config.delivery_methods, method, "delivery method")?;
        self.session.delivery_method = Some(method);
        Ok(())
    }

    pub fn set_print_count(&mut self, count: u32) -> Result<()> {
        self.ensure_editable()?;
        if count > self.config.max_prints {
            return Err(KioskError::InvalidSelection(format!(
                "print count must be between 0 and {}",
                self.config.max_prints
            )));
        }
        self.session.print_count = count;
        Ok(())
    }

    /// Changes how many emails are requested. Every slot is reallocated empty.
    pub fn set_email_count(&mut self, count: usize) -> Result<()> {
        self.ensure_editable()?;
        if count > self.config.max_emails {
            return Err(KioskError::InvalidSelection(format!(
                "email count must be between 0 and {}",
                self.config.max_emails
            )));
        }
        if matches!(self.text_entry.target(), Some(TextTarget::Email(_))) {
            self.text_entry.close();
        }
        self.session.set_email_count(count);
        Ok(())
    }

    pub fn set_payment_method(&mut self, method: &str) -> Result<()> {
        self.ensure_editable()?;
        let method = Self::configured(&self.config.payment_methods, method, "payment method")?;
        self.session.payment_method = Some(method);
        Ok(())
    }

    fn configured(options: &[String], wanted: &str, what: &str) -> Result<String> {
        options
            .iter()
            .find(|option| option.eq_ignore_ascii_case(wanted.trim()))
            .cloned()
            .ok_or_else(|| KioskError::InvalidSelection(format!("unknown {} '{}'", what, wanted)))
    }

    // --- text entry -------------------------------------------------------

    pub fn open_text_entry(&mut self, target: TextTarget) -> Result<()> {
        self.ensure_editable()?;
        let initial = match target {
            TextTarget::PartyName => self.session.party_name.clone(),
            TextTarget::Email(index) => self
                .session
                .emails()
                .get(index)
                .map(str::to_string)
                .ok_or_else(|| {
                    KioskError::InvalidSelection(format!(
                        "email slot {} does not exist",
                        index + 1
                    ))
                })?,
        };
        self.text_entry.open(target, &initial);
        Ok(())
    }

    pub fn type_character(&mut self, ch: char) {
        self.text_entry.append_character(ch);
    }

    pub fn type_space(&mut self) {
        self.text_entry.append_space();
    }

    pub fn backspace(&mut self) {
        self.text_entry.backspace();
    }

    pub fn clear_text(&mut self) {
        self.text_entry.clear();
    }

    /// Writes the trimmed buffer into its field and closes the overlay.
    pub fn commit_text(&mut self) -> Result<()> {
        match self.text_entry.commit() {
            Some((TextTarget::PartyName, value)) => {
                self.session.party_name = value;
                Ok(())
            }
            Some((TextTarget::Email(index), value)) => self.session.set_email(index, value),
            None => Ok(()),
        }
    }

    // --- selfie -----------------------------------------------------------

    pub async fn start_camera(&mut self) -> Result<()> {
        self.ensure_editable()?;
        self.selfie.start().await
    }

    /// Takes the selfie. Returns `false` when no live stream was open.
    pub fn capture_selfie(&mut self) -> Result<bool> {
        self.ensure_editable()?;
        match self.selfie.capture()? {
            Some(frame) => {
                self.session.selfie = Some(frame);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn retake_selfie(&mut self) -> Result<bool> {
        self.ensure_editable()?;
        if self.selfie.retake() {
            self.session.selfie = None;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn stop_camera(&mut self) {
        self.selfie.stop();
    }

    // --- projections ------------------------------------------------------

    pub fn summary(&self) -> OrderSummary {
        project_summary(&self.session, &self.config)
    }

    /// Builds a receipt for the current session under a fresh identifier.
    pub fn project_receipt(&self) -> PendingReceipt {
        PendingReceipt::new(
            self.photo_ids.next_id(),
            project_receipt_details(&self.session, &self.config),
        )
    }

    // --- checkout ---------------------------------------------------------

    /// Opens the confirmation prompt after re-checking delivery and payment.
    pub fn confirm(&mut self) -> Result<PendingReceipt> {
        self.ensure_editable()?;
        if self.navigator.current() != Screen::Review {
            return Err(KioskError::InvalidTransition(
                "orders can only be confirmed from the review screen".to_string(),
            ));
        }
        validate_screen(Screen::Delivery, &self.session)?;
        validate_screen(Screen::Payment, &self.session)?;

        self.selfie.stop();
        let pending = self.project_receipt();
        info!(photo_id = %pending.photo_id, party = %pending.details.party_name, "awaiting confirmation");
        self.phase = CheckoutPhase::ConfirmPending(pending.clone());
        Ok(pending)
    }

    /// Closes the confirmation prompt. The session is left as it was.
    pub fn cancel_confirm(&mut self) -> bool {
        if matches!(self.phase, CheckoutPhase::ConfirmPending(_)) {
            self.phase = CheckoutPhase::Reviewing;
            debug!("confirmation cancelled");
            return true;
        }
        false
    }

    /// Logs the confirmed order, notifies every requested address and starts
    /// over with an empty session on the receipt screen.
    ///
    /// If the log cannot be written the prompt stays open and nothing is reset.
    pub async fn finalize(&mut self) -> Result<Receipt> {
        let pending = match std::mem::take(&mut self.phase) {
            CheckoutPhase::ConfirmPending(pending) => pending,
            other => {
                self.phase = other;
                return Err(KioskError::InvalidTransition(
                    "there is no confirmed order to finalize".to_string(),
                ));
            }
        };

        let receipt = pending
            .clone()
            .finalize(self.clock.now(), self.session.selfie.is_some());
        if let Err(e) = self.log.append(TransactionRecord::from(&receipt)).await {
            self.phase = CheckoutPhase::ConfirmPending(pending);
            return Err(e);
        }
        for address in &receipt.details.emails {
            self.notifier.dispatch(address, &receipt).await;
        }

        self.selfie.stop();
        self.go_to(Screen::Receipt);
        self.session.reset();
        self.phase = CheckoutPhase::Finalized;
        info!(photo_id = %receipt.photo_id, emails = receipt.details.emails.len(), "transaction finalized");
        Ok(receipt)
    }

    /// Every transaction logged so far, including earlier runs for persistent logs.
    pub async fn transactions(&self) -> Result<Vec<TransactionRecord>> {
        self.log.load_all().await
    }

    /// Abandons whatever is in progress and returns to the welcome screen.
    pub fn reset(&mut self) {
        self.selfie.stop();
        self.session.reset();
        self.phase = CheckoutPhase::Reviewing;
        self.go_to(Screen::Welcome);
        info!("kiosk reset");
    }

    fn ensure_editable(&self) -> Result<()> {
        if matches!(self.phase, CheckoutPhase::ConfirmPending(_)) {
            return Err(KioskError::InvalidTransition(
                "finish or cancel the confirmation first".to_string(),
            ));
        }
        Ok(())
    }
}
