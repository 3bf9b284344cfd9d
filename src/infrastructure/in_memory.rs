use crate::domain::ports::{Notifier, TransactionLog};
use crate::domain::receipt::{Receipt, TransactionRecord};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A transaction log that lives only as long as the process.
///
/// `Clone` shares the underlying `Arc<RwLock<Vec<_>>>`, so a handle kept by
/// the caller observes everything the kiosk appends.
#[derive(Default, Clone)]
pub struct InMemoryTransactionLog {
    records: Arc<RwLock<Vec<TransactionRecord>>>,
}

impl InMemoryTransactionLog {
    /// Creates a new, empty in-memory log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from records that already exist elsewhere.
    pub fn with_records(records: Vec<TransactionRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    pub async fn snapshot(&self) -> Vec<TransactionRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl TransactionLog for InMemoryTransactionLog {
    async fn load_all(&self) -> Result<Vec<TransactionRecord>> {
        Ok(self.snapshot().await)
    }

    async fn append(&self, record: TransactionRecord) -> Result<()> {
        self.records.write().await.push(record);
        Ok(())
    }
}

/// Notifier that remembers every address it was asked to reach.
#[derive(Default, Clone)]
pub struct RecordingNotifier {
    sent: Arc<RwLock<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<String> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn dispatch(&self, address: &str, _receipt: &Receipt) {
        self.sent.write().await.push(address.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::receipt::{PhotoId, StatusFlags};
    use chrono::Utc;

    fn record(id: u32) -> TransactionRecord {
        TransactionRecord {
            identifier: PhotoId(id),
            name: "Lee".to_string(),
            payment_method: "card".to_string(),
            email_count: 0,
            print_count: 0,
            photo_id: PhotoId(id),
            status_flags: StatusFlags::default(),
            delivery_method: "print".to_string(),
            emails: vec![],
            total: "$5.00".to_string(),
            created_at: Utc::now(),
            people_count: Some(1),
        }
    }

    #[tokio::test]
    async fn test_in_memory_log_appends() {
        let log = InMemoryTransactionLog::new();
        assert!(log.load_all().await.unwrap().is_empty());

        log.append(record(1001)).await.unwrap();
        log.append(record(1002)).await.unwrap();

        let records = log.load_all().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].identifier, PhotoId(1002));
    }

    #[tokio::test]
    async fn test_clones_share_records() {
        let log = InMemoryTransactionLog::with_records(vec![record(1)]);
        let handle = log.clone();
        log.append(record(2)).await.unwrap();
        assert_eq!(handle.snapshot().await.len(), 2);
    }
}
