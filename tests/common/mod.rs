#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use photo_kiosk::application::kiosk::Kiosk;
use photo_kiosk::domain::config::KioskConfig;
use photo_kiosk::domain::ports::{Camera, Clock, KioskPorts, PhotoIdSource, TransactionLog};
use photo_kiosk::domain::receipt::{PhotoId, TransactionRecord};
use photo_kiosk::domain::session::ImagePayload;
use photo_kiosk::domain::text_entry::TextTarget;
use photo_kiosk::error::{KioskError, Result};
use photo_kiosk::infrastructure::devices::FsUploadSource;
use photo_kiosk::infrastructure::in_memory::{InMemoryTransactionLog, RecordingNotifier};

pub fn config_json(price: Option<&str>) -> String {
    let price = price
        .map(|p| format!("\"price\": {},", p))
        .unwrap_or_default();
    format!(
        r#"{{
            "eventName": "Booth Night",
            {}
            "currency": "USD",
            "backgrounds": [
                {{"id": "X", "name": "Ex Marks"}},
                {{"id": "fsu-gold", "name": "Gold"}}
            ],
            "deliveryMethods": ["print", "email"],
            "paymentMethods": ["cash", "card"],
            "maxPrints": 4,
            "maxEmails": 3,
            "supportEmail": "support@booth.test",
            "hotline": "555-0199"
        }}"#,
        price
    )
}

pub fn config(price: Option<&str>) -> KioskConfig {
    KioskConfig::from_json(&config_json(price)).expect("valid test config")
}

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 21, 15, 0).unwrap()
}

pub struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        fixed_time()
    }
}

pub struct FixedIds(pub u32);

impl PhotoIdSource for FixedIds {
    fn next_id(&self) -> PhotoId {
        PhotoId(self.0)
    }
}

/// Camera that always works and returns a one-byte frame.
pub struct WorkingCamera;

#[async_trait]
impl Camera for WorkingCamera {
    async fn start(&mut self) -> Result<()> {
        Ok(())
    }

    fn capture(&mut self) -> Result<ImagePayload> {
        Ok(ImagePayload::new("image/png", vec![7]))
    }

    fn stop(&mut self) {}
}

/// Log whose writes always fail.
pub struct BrokenLog;

#[async_trait]
impl TransactionLog for BrokenLog {
    async fn load_all(&self) -> Result<Vec<TransactionRecord>> {
        Ok(Vec::new())
    }

    async fn append(&self, _record: TransactionRecord) -> Result<()> {
        Err(KioskError::IoError(std::io::Error::other("disk full")))
    }
}

pub struct Harness {
    pub kiosk: Kiosk,
    pub log: InMemoryTransactionLog,
    pub notifier: RecordingNotifier,
}

pub fn harness(price: Option<&str>) -> Harness {
    let log = InMemoryTransactionLog::new();
    let notifier = RecordingNotifier::new();
    let ports = KioskPorts {
        log: Box::new(log.clone()),
        notifier: Box::new(notifier.clone()),
        camera: Box::new(WorkingCamera),
        uploads: Box::new(FsUploadSource),
        photo_ids: Box::new(FixedIds(4242)),
        clock: Box::new(FixedClock),
    };
    let kiosk = Kiosk::new(config(price), ports);
    Harness {
        kiosk,
        log,
        notifier,
    }
}

/// Types `text` through the on-screen keyboard and commits it.
pub fn enter_text(kiosk: &mut Kiosk, target: TextTarget, text: &str) {
    kiosk.open_text_entry(target).expect("field can be edited");
    kiosk.clear_text();
    for ch in text.chars() {
        kiosk.type_character(ch);
    }
    kiosk.commit_text().expect("commit succeeds");
}

/// Walks the happy path up to the review screen.
pub fn complete_to_review(kiosk: &mut Kiosk, emails: &[&str]) {
    kiosk.start().unwrap();
    kiosk.select_background("X").unwrap();
    kiosk.advance().unwrap();

    enter_text(kiosk, TextTarget::PartyName, "Smith");
    kiosk.set_people_count(4).unwrap();
    kiosk.advance().unwrap();

    kiosk.set_delivery_method("email").unwrap();
    kiosk.set_email_count(emails.len()).unwrap();
    for (i, email) in emails.iter().enumerate() {
        enter_text(kiosk, TextTarget::Email(i), email);
    }
    kiosk.advance().unwrap();

    kiosk.set_payment_method("cash").unwrap();
    kiosk.advance().unwrap();
}
