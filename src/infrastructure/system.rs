use crate::domain::ports::{Clock, KioskPorts, NotifierBox, PhotoIdSource, TransactionLogBox};
use crate::domain::receipt::{PhotoId, TransactionRecord};
use crate::infrastructure::devices::{FsUploadSource, UnavailableCamera};
use chrono::{DateTime, Utc};
use rand::Rng;
use std::sync::atomic::{AtomicU32, Ordering};

pub const MIN_PHOTO_ID: u32 = 1000;
pub const MAX_RANDOM_PHOTO_ID: u32 = 9999;

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Random 4-digit display numbers. Two customers may share one.
pub struct RandomPhotoIds;

impl PhotoIdSource for RandomPhotoIds {
    fn next_id(&self) -> PhotoId {
        PhotoId(rand::thread_rng().gen_range(MIN_PHOTO_ID..=MAX_RANDOM_PHOTO_ID))
    }
}

/// Monotonic identifiers continuing from what is already in the log.
pub struct SequentialPhotoIds {
    next: AtomicU32,
}

impl SequentialPhotoIds {
    pub fn starting_at(first: u32) -> Self {
        Self {
            next: AtomicU32::new(first.max(MIN_PHOTO_ID)),
        }
    }

    pub fn resume_after(records: &[TransactionRecord]) -> Self {
        let first = records
            .iter()
            .map(|r| r.identifier.0.saturating_add(1))
            .max()
            .unwrap_or(MIN_PHOTO_ID);
        Self::starting_at(first)
    }
}

impl PhotoIdSource for SequentialPhotoIds {
    fn next_id(&self) -> PhotoId {
        PhotoId(self.next.fetch_add(1, Ordering::SeqCst))
    }
}

/// Ports for a kiosk with no camera attached: filesystem uploads, random
/// photo ids and the system clock.
pub fn standard_ports(log: TransactionLogBox, notifier: NotifierBox) -> KioskPorts {
    KioskPorts {
        log,
        notifier,
        camera: Box::new(UnavailableCamera),
        uploads: Box::new(FsUploadSource),
        photo_ids: Box::new(RandomPhotoIds),
        clock: Box::new(SystemClock),
    }
}
