mod common;

use common::{complete_to_review, harness};
use photo_kiosk::domain::money::FREE_LABEL;

#[tokio::test]
async fn test_zero_price_is_free_everywhere() {
    let mut h = harness(Some("0"));
    complete_to_review(&mut h.kiosk, &[]);

    assert_eq!(h.kiosk.summary().total, FREE_LABEL);
    let banner = h.kiosk.banner();
    assert_eq!(banner.header_price, "Free Event");
    assert_eq!(banner.price_info, "Today only: Free photo session!");

    h.kiosk.confirm().unwrap();
    let receipt = h.kiosk.finalize().await.unwrap();
    assert_eq!(receipt.details.total, "Free");
    assert_eq!(h.log.snapshot().await[0].total, "Free");
}

#[test]
fn test_missing_price_is_free() {
    let mut h = harness(None);
    complete_to_review(&mut h.kiosk, &[]);
    assert_eq!(h.kiosk.summary().total, "Free");
    assert!(h.kiosk.config().is_free());
}

#[tokio::test]
async fn test_priced_event_formats_currency() {
    let mut h = harness(Some("12.50"));
    complete_to_review(&mut h.kiosk, &["a@b.com"]);

    assert_eq!(h.kiosk.summary().total, "$12.50");
    let banner = h.kiosk.banner();
    assert_eq!(banner.header_price, "Only $12.50");
    assert_eq!(banner.price_info, "Package Price: $12.50");

    h.kiosk.confirm().unwrap();
    let receipt = h.kiosk.finalize().await.unwrap();
    assert_eq!(receipt.details.total, "$12.50");
}

#[test]
fn test_summary_is_stable_and_readable() {
    let mut h = harness(Some("1250"));
    complete_to_review(&mut h.kiosk, &[]);
    let summary = h.kiosk.summary();
    assert_eq!(summary, h.kiosk.summary());
    assert_eq!(summary.total, "$1,250.00");

    let text = summary.to_string();
    assert!(text.starts_with("You're all set!"));
    assert!(text.contains("Party: Smith"));
    assert!(text.contains("Background: Ex Marks"));
}
