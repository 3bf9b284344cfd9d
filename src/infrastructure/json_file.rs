use crate::domain::ports::TransactionLog;
use crate::domain::receipt::TransactionRecord;
use crate::error::{KioskError, Result};
use async_trait::async_trait;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tokio::sync::Mutex;

/// Transaction log kept as a single pretty-printed JSON array on disk.
///
/// Appending reads the existing array (or starts empty), pushes the record
/// and writes the whole array back through a temporary file renamed over
/// the previous one.
#[derive(Clone)]
pub struct JsonFileTransactionLog {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonFileTransactionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_records(&self) -> Result<Vec<TransactionRecord>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

fn write_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| KioskError::IoError(e.error))?;
    Ok(())
}

#[async_trait]
impl TransactionLog for JsonFileTransactionLog {
    async fn load_all(&self) -> Result<Vec<TransactionRecord>> {
        self.read_records().await
    }

    async fn append(&self, record: TransactionRecord) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_records().await?;
        records.push(record);
        let contents = serde_json::to_vec_pretty(&records)?;

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&path, &contents))
            .await
            .map_err(|e| KioskError::InternalError(Box::new(e)))?
    }
}
