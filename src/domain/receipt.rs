use crate::domain::config::KioskConfig;
use crate::domain::session::{CUSTOM_BACKGROUND_ID, SessionState};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const NOT_SELECTED: &str = "Not selected";

/// Display number printed on both receipt copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoId(pub u32);

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// What the review screen shows before the customer confirms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub party_name: String,
    pub background: String,
    pub people_count: Option<u8>,
    pub delivery_method: Option<String>,
    pub print_count: u32,
    pub email_count: usize,
    pub payment_method: Option<String>,
    pub total: String,
}

impl fmt::Display for OrderSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn or_missing<T: ToString>(value: &Option<T>) -> String {
            value
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| NOT_SELECTED.to_string())
        }

        writeln!(f, "You're all set!")?;
        writeln!(f, "Party: {}", self.party_name)?;
        writeln!(f, "Background: {}", self.background)?;
        writeln!(f, "People in photo: {}", or_missing(&self.people_count))?;
        writeln!(f, "Delivery: {}", or_missing(&self.delivery_method))?;
        writeln!(f, "Prints: {}", self.print_count)?;
        writeln!(f, "Email count: {}", self.email_count)?;
        writeln!(f, "Payment: {}", or_missing(&self.payment_method))?;
        write!(f, "Total: {}", self.total)
    }
}

pub fn project_summary(session: &SessionState, config: &KioskConfig) -> OrderSummary {
    OrderSummary {
        party_name: session.party_name.clone(),
        background: session
            .background()
            .map(|b| b.display_name)
            .unwrap_or_else(|| NOT_SELECTED.to_string()),
        people_count: session.people_count,
        delivery_method: session.delivery_method.clone(),
        print_count: session.print_count,
        email_count: session.email_count(),
        payment_method: session.payment_method.clone(),
        total: config.total_label(),
    }
}

/// Order fields echoed on the receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptDetails {
    pub event_name: String,
    pub party_name: String,
    pub background: String,
    pub background_id: String,
    pub background_image: String,
    pub delivery_method: String,
    pub prints: u32,
    pub email_count: usize,
    pub emails: Vec<String>,
    pub payment_method: String,
    pub total: String,
    pub hotline: String,
    pub support_email: String,
    pub people_count: Option<u8>,
}

pub fn project_receipt_details(session: &SessionState, config: &KioskConfig) -> ReceiptDetails {
    let background = session.background();
    ReceiptDetails {
        event_name: config.event_name.clone(),
        party_name: session.party_name.clone(),
        background: background
            .as_ref()
            .map(|b| b.display_name.clone())
            .unwrap_or_else(|| "Custom Upload".to_string()),
        background_id: background
            .as_ref()
            .map(|b| b.id.clone())
            .unwrap_or_else(|| CUSTOM_BACKGROUND_ID.to_string()),
        background_image: background
            .map(|b| b.image_reference)
            .unwrap_or_default(),
        delivery_method: session.delivery_method.clone().unwrap_or_default(),
        prints: session.print_count,
        email_count: session.email_count(),
        emails: session
            .emails()
            .filled()
            .into_iter()
            .map(str::to_string)
            .collect(),
        payment_method: session.payment_method.clone().unwrap_or_default(),
        total: config.total_label(),
        hotline: config.hotline.clone(),
        support_email: config.support_email.clone(),
        people_count: session.people_count,
    }
}

/// Receipt computed at confirmation, waiting for the customer to continue.
/// It carries no timestamp yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReceipt {
    pub photo_id: PhotoId,
    pub details: ReceiptDetails,
}

impl PendingReceipt {
    pub fn new(photo_id: PhotoId, details: ReceiptDetails) -> Self {
        Self { photo_id, details }
    }

    /// Stamps the receipt with the finalization time.
    pub fn finalize(self, created_at: DateTime<Utc>, photo_taken: bool) -> Receipt {
        Receipt {
            photo_id: self.photo_id,
            created_at,
            photo_taken,
            details: self.details,
        }
    }
}

/// A completed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub photo_id: PhotoId,
    pub created_at: DateTime<Utc>,
    pub photo_taken: bool,
    #[serde(flatten)]
    pub details: ReceiptDetails,
}

impl Receipt {
    pub fn date_label(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format("%-m/%-d/%Y")
            .to_string()
    }

    pub fn time_label(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format("%-I:%M %p")
            .to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusFlags {
    pub paid: bool,
    pub emailed: bool,
    pub printed: bool,
    pub picked_up: bool,
    pub photo_taken: bool,
}

/// Lightweight projection of a receipt kept in the transaction log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub identifier: PhotoId,
    pub name: String,
    pub payment_method: String,
    pub email_count: usize,
    pub print_count: u32,
    pub photo_id: PhotoId,
    pub status_flags: StatusFlags,
    pub delivery_method: String,
    pub emails: Vec<String>,
    pub total: String,
    pub created_at: DateTime<Utc>,
    pub people_count: Option<u8>,
}

impl From<&Receipt> for TransactionRecord {
    fn from(receipt: &Receipt) -> Self {
        let details = &receipt.details;
        Self {
            identifier: receipt.photo_id,
            name: details.party_name.clone(),
            payment_method: details.payment_method.clone(),
            email_count: details.email_count,
            print_count: details.prints,
            photo_id: receipt.photo_id,
            status_flags: StatusFlags {
                photo_taken: receipt.photo_taken,
                ..StatusFlags::default()
            },
            delivery_method: details.delivery_method.clone(),
            emails: details.emails.clone(),
            total: details.total.clone(),
            created_at: receipt.created_at,
            people_count: details.people_count,
        }
    }
}
