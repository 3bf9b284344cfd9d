use crate::domain::receipt::TransactionRecord;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// Flat CSV row for one logged transaction.
#[derive(Debug, Serialize)]
struct RecordRow<'a> {
    identifier: String,
    name: &'a str,
    payment_method: &'a str,
    delivery_method: &'a str,
    people_count: Option<u8>,
    print_count: u32,
    email_count: usize,
    emails: String,
    total: &'a str,
    paid: bool,
    emailed: bool,
    printed: bool,
    picked_up: bool,
    photo_taken: bool,
    created_at: String,
}

impl<'a> From<&'a TransactionRecord> for RecordRow<'a> {
    fn from(record: &'a TransactionRecord) -> Self {
        Self {
            identifier: record.identifier.to_string(),
            name: &record.name,
            payment_method: &record.payment_method,
            delivery_method: &record.delivery_method,
            people_count: record.people_count,
            print_count: record.print_count,
            email_count: record.email_count,
            emails: record.emails.join(";"),
            total: &record.total,
            paid: record.status_flags.paid,
            emailed: record.status_flags.emailed,
            printed: record.status_flags.printed,
            picked_up: record.status_flags.picked_up,
            photo_taken: record.status_flags.photo_taken,
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

/// Exports the transaction log as CSV for the attendant's spreadsheet.
pub struct RecordWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_records<'a, I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a TransactionRecord>,
    {
        for record in records {
            self.writer.serialize(RecordRow::from(record))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::receipt::{PhotoId, StatusFlags};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_write_flat_rows() {
        let record = TransactionRecord {
            identifier: PhotoId(42),
            name: "Smith".to_string(),
            payment_method: "cash".to_string(),
            email_count: 2,
            print_count: 1,
            photo_id: PhotoId(42),
            status_flags: StatusFlags {
                photo_taken: true,
                ..StatusFlags::default()
            },
            delivery_method: "email".to_string(),
            emails: vec!["a@b.com".to_string(), "c@d.org".to_string()],
            total: "$12.50".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
            people_count: Some(4),
        };

        let mut out = Vec::new();
        RecordWriter::new(&mut out)
            .write_records([&record])
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "identifier,name,payment_method,delivery_method,people_count,print_count,email_count,emails,total,paid,emailed,printed,picked_up,photo_taken,created_at"
        );
        assert_eq!(
            lines.next().unwrap(),
            "0042,Smith,cash,email,4,1,2,a@b.com;c@d.org,$12.50,false,false,false,false,true,2026-01-02T03:04:05+00:00"
        );
    }
}
