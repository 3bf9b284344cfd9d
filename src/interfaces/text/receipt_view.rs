use crate::domain::receipt::Receipt;
use std::fmt::{self, Write};

const STAMPS: [&str; 5] = ["Paid", "Email Sent", "Printed", "Picked Up", "Photo Taken"];
const NOTES_LINE: &str = "Notes: ____________________________";

/// Renders the printable receipt: a customer copy and an operator copy.
pub fn render_receipt(receipt: &Receipt) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_receipt(&mut out, receipt);
    out
}

pub fn write_receipt(out: &mut impl Write, receipt: &Receipt) -> fmt::Result {
    let details = &receipt.details;
    let date = receipt.date_label();
    let time = receipt.time_label();
    let people = details
        .people_count
        .map(|count| count.to_string())
        .unwrap_or_default();

    writeln!(out, "=== Customer Copy ===")?;
    writeln!(out, "Name: {}", details.party_name)?;
    writeln!(out, "Event: {}", details.event_name)?;
    writeln!(out, "Date: {}", date)?;
    writeln!(out, "Time: {}", time)?;
    writeln!(out, "Prints: {}", details.prints)?;
    writeln!(out, "Emails: {}", details.email_count)?;
    writeln!(out, "Delivery: {}", details.delivery_method)?;
    writeln!(out, "Payment Method: {}", details.payment_method)?;
    writeln!(out, "Total: {}", details.total)?;
    writeln!(out, "Photo ID: {}", receipt.photo_id)?;
    writeln!(out, "{}", STAMPS.map(|s| format!("[ {} ]", s)).join(" "))?;
    writeln!(out, "{}", NOTES_LINE)?;
    writeln!(
        out,
        "Come back at the end of the night to pick up your prints. If you do not receive your email within 2 business days, contact {}. Questions? Call {}.",
        details.support_email, details.hotline
    )?;
    writeln!(out)?;

    writeln!(out, "=== Operator Copy ===")?;
    writeln!(out, "Name: {}", details.party_name)?;
    writeln!(out, "Delivery: {}", details.delivery_method)?;
    writeln!(out, "Date: {}", date)?;
    writeln!(out, "Time: {}", time)?;
    writeln!(out, "People: {}", people)?;
    writeln!(out, "Background: {}", details.background)?;
    writeln!(out, "Background ID: {}", details.background_id)?;
    writeln!(out, "Emails:")?;
    if details.emails.is_empty() {
        writeln!(out, "  - No emails requested")?;
    }
    for email in &details.emails {
        writeln!(out, "  - {}", email)?;
    }
    writeln!(out, "Email Count: {}", details.email_count)?;
    writeln!(out, "Prints: {}", details.prints)?;
    writeln!(out, "Total: {}", details.total)?;
    writeln!(out, "Photo ID: {}", receipt.photo_id)?;
    writeln!(out, "{}", NOTES_LINE)?;
    if receipt.photo_taken {
        writeln!(out, "Selfie: on file")?;
    }
    Ok(())
}
