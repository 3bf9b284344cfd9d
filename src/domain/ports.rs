use super::receipt::{PhotoId, Receipt, TransactionRecord};
use super::session::ImagePayload;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::Path;

/// Append-only store of finalized transactions.
#[async_trait]
pub trait TransactionLog: Send + Sync {
    /// Every record logged so far, oldest first. Empty when nothing exists yet.
    async fn load_all(&self) -> Result<Vec<TransactionRecord>>;
    async fn append(&self, record: TransactionRecord) -> Result<()>;
}

/// Outbound receipt notification. Best effort: the kiosk never learns
/// whether delivery worked.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn dispatch(&self, address: &str, receipt: &Receipt);
}

#[async_trait]
pub trait Camera: Send + Sync {
    /// Acquires the live stream.
    async fn start(&mut self) -> Result<()>;
    /// Freezes the current frame.
    fn capture(&mut self) -> Result<ImagePayload>;
    /// Releases the stream. Safe to call when nothing is open.
    fn stop(&mut self);
}

#[async_trait]
pub trait UploadSource: Send + Sync {
    async fn read(&self, path: &Path) -> Result<ImagePayload>;
}

pub trait PhotoIdSource: Send + Sync {
    fn next_id(&self) -> PhotoId;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub type TransactionLogBox = Box<dyn TransactionLog>;
pub type NotifierBox = Box<dyn Notifier>;
pub type CameraBox = Box<dyn Camera>;
pub type UploadSourceBox = Box<dyn UploadSource>;
pub type PhotoIdSourceBox = Box<dyn PhotoIdSource>;
pub type ClockBox = Box<dyn Clock>;

/// Every adapter one kiosk talks to.
pub struct KioskPorts {
    pub log: TransactionLogBox,
    pub notifier: NotifierBox,
    pub camera: CameraBox,
    pub uploads: UploadSourceBox,
    pub photo_ids: PhotoIdSourceBox,
    pub clock: ClockBox,
}
