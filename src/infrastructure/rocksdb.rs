use crate::domain::ports::TransactionLog;
use crate::domain::receipt::TransactionRecord;
use crate::error::{KioskError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, IteratorMode, Options};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Column Family holding one entry per finalized transaction.
pub const CF_TRANSACTIONS: &str = "transactions";

/// A persistent transaction log backed by RocksDB.
///
/// Records are keyed by a big-endian sequence number, so iterating the column
/// family from the start yields them in append order.
///
/// `Clone` shares the underlying `Arc<DB>` and sequence counter.
#[derive(Clone)]
pub struct RocksDBTransactionLog {
    db: Arc<DB>,
    next_seq: Arc<AtomicU64>,
}

impl RocksDBTransactionLog {
    /// Opens or creates a RocksDB instance at the specified path and resumes
    /// the sequence after the last stored record.
    ///
    /// # Arguments
    ///
    /// * `path` - The filesystem path where the database will be stored.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_transactions = ColumnFamilyDescriptor::new(CF_TRANSACTIONS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_transactions])?;

        let next_seq = {
            let cf = db.cf_handle(CF_TRANSACTIONS).ok_or_else(missing_cf)?;
            match db.iterator_cf(&cf, IteratorMode::End).next() {
                Some(item) => {
                    let (key, _) = item?;
                    decode_seq(&key)? + 1
                }
                None => 0,
            }
        };

        Ok(Self {
            db: Arc::new(db),
            next_seq: Arc::new(AtomicU64::new(next_seq)),
        })
    }
}

fn missing_cf() -> KioskError {
    KioskError::InternalError(Box::new(std::io::Error::other(
        "Transactions column family not found",
    )))
}

fn decode_seq(key: &[u8]) -> Result<u64> {
    let bytes: [u8; 8] = key.try_into().map_err(|_| {
        KioskError::InternalError(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("unexpected key length {}", key.len()),
        )))
    })?;
    Ok(u64::from_be_bytes(bytes))
}

#[async_trait]
impl TransactionLog for RocksDBTransactionLog {
    async fn load_all(&self) -> Result<Vec<TransactionRecord>> {
        let cf = self.db.cf_handle(CF_TRANSACTIONS).ok_or_else(missing_cf)?;

        let mut records = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (_key, value) = item?;
            let record: TransactionRecord = serde_json::from_slice(&value).map_err(|e| {
                KioskError::InternalError(Box::new(std::io::Error::other(format!(
                    "Failed to deserialize transaction record: {}",
                    e
                ))))
            })?;
            records.push(record);
        }
        Ok(records)
    }

    async fn append(&self, record: TransactionRecord) -> Result<()> {
        let cf = self.db.cf_handle(CF_TRANSACTIONS).ok_or_else(missing_cf)?;

        let value = serde_json::to_vec(&record).map_err(|e| {
            KioskError::InternalError(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization error: {}", e),
            )))
        })?;
        let key = self.next_seq.fetch_add(1, Ordering::SeqCst).to_be_bytes();
        self.db.put_cf(&cf, key, value)?;
        Ok(())
    }
}
