use crate::application::command::KioskCommand;
use crate::error::{KioskError, Result};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct CommandRecord {
    action: String,
    value: Option<String>,
}

/// Reads a scripted sequence of kiosk actions from CSV (`action,value`).
///
/// Whitespace is trimmed, the `value` column may be omitted, and lines
/// starting with `#` are skipped.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .comment(Some(b'#'))
            .from_reader(source);
        Self { reader }
    }

    /// Lazily yields one command per row. A malformed row yields an error and
    /// the rows after it are still read.
    pub fn commands(self) -> impl Iterator<Item = Result<KioskCommand>> {
        self.reader
            .into_deserialize::<CommandRecord>()
            .map(|record| {
                let record = record.map_err(KioskError::from)?;
                KioskCommand::parse(&record.action, record.value.as_deref())
            })
    }
}
