mod common;

use common::{enter_text, harness};
use photo_kiosk::domain::screen::Screen;
use photo_kiosk::domain::text_entry::TextTarget;
use photo_kiosk::domain::validation::{ValidationError, is_valid_email};
use photo_kiosk::error::KioskError;

fn at_delivery(emails: &[&str]) -> common::Harness {
    let mut h = harness(None);
    h.kiosk.go_to(Screen::Delivery);
    h.kiosk.set_delivery_method("email").unwrap();
    h.kiosk.set_email_count(emails.len()).unwrap();
    for (i, email) in emails.iter().enumerate() {
        enter_text(&mut h.kiosk, TextTarget::Email(i), email);
    }
    h
}

#[test]
fn test_one_bad_address_blocks_delivery() {
    let mut h = at_delivery(&["a@b.com", "bad-email"]);
    let before = h.kiosk.session().clone();

    let err = h.kiosk.advance().unwrap_err();
    assert!(matches!(
        err,
        KioskError::Validation(ValidationError::InvalidEmail)
    ));
    assert_eq!(
        err.to_string(),
        "One or more email addresses look incorrect."
    );
    assert_eq!(h.kiosk.current_screen(), Screen::Delivery);
    assert_eq!(h.kiosk.session(), &before);
}

#[test]
fn test_blank_slot_blocks_delivery() {
    let mut h = at_delivery(&["a@b.com", "   "]);
    assert!(matches!(
        h.kiosk.advance(),
        Err(KioskError::Validation(ValidationError::IncompleteEmails))
    ));
}

#[test]
fn test_missing_method_blocks_delivery() {
    let mut h = harness(None);
    h.kiosk.go_to(Screen::Delivery);
    assert!(matches!(
        h.kiosk.advance(),
        Err(KioskError::Validation(ValidationError::MissingDeliveryMethod))
    ));
}

#[test]
fn test_valid_addresses_pass() {
    let mut h = at_delivery(&["a@b.com", "c@d.org"]);
    assert_eq!(h.kiosk.advance().unwrap(), Screen::Payment);
}

#[test]
fn test_zero_emails_pass() {
    let mut h = at_delivery(&[]);
    assert_eq!(h.kiosk.advance().unwrap(), Screen::Payment);
}

#[test]
fn test_delivery_passes_iff_every_slot_is_valid() {
    let candidates = ["a@b.com", "", "bad-email", "x@y.io", "  ", "p@q"];
    for count in 0..=3usize {
        for start in 0..candidates.len() {
            let emails: Vec<&str> = (0..count)
                .map(|i| candidates[(start + i) % candidates.len()])
                .collect();

            let mut h = harness(None);
            h.kiosk.go_to(Screen::Delivery);
            h.kiosk.set_delivery_method("print").unwrap();
            h.kiosk.set_email_count(count).unwrap();
            for (i, email) in emails.iter().enumerate() {
                enter_text(&mut h.kiosk, TextTarget::Email(i), email);
            }

            let expected = emails
                .iter()
                .all(|e| !e.trim().is_empty() && is_valid_email(e.trim()));
            assert_eq!(
                h.kiosk.validate(Screen::Delivery).is_ok(),
                expected,
                "emails: {:?}",
                emails
            );
            assert_eq!(h.kiosk.session().emails().len(), count);
        }
    }
}

#[test]
fn test_changing_count_clears_slots() {
    let mut h = at_delivery(&["a@b.com"]);
    h.kiosk.set_email_count(2).unwrap();
    assert_eq!(h.kiosk.session().email_count(), 2);
    assert!(h.kiosk.session().emails().filled().is_empty());
}
