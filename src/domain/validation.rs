use crate::domain::screen::Screen;
use crate::domain::session::SessionState;
use thiserror::Error;

/// Why a screen cannot be left yet. `Display` is the message shown to the customer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select a background to continue.")]
    MissingBackground,
    #[error("Please enter a party name.")]
    MissingPartyName,
    #[error("Please choose how many people are in the photo.")]
    MissingPeopleCount,
    #[error("Please select a delivery method.")]
    MissingDeliveryMethod,
    #[error("Please fill in all email addresses.")]
    IncompleteEmails,
    #[error("One or more email addresses look incorrect.")]
    InvalidEmail,
    #[error("Please pick a payment method.")]
    MissingPaymentMethod,
}

/// Checks whether `screen` may be left going forward.
///
/// Screens without rules always pass.
pub fn validate_screen(screen: Screen, session: &SessionState) -> Result<(), ValidationError> {
    match screen {
        Screen::Background => {
            if !session.has_background() {
                return Err(ValidationError::MissingBackground);
            }
        }
        Screen::Party => {
            if session.party_name.trim().is_empty() {
                return Err(ValidationError::MissingPartyName);
            }
            if session.people_count.is_none() {
                return Err(ValidationError::MissingPeopleCount);
            }
        }
        Screen::Delivery => {
            if session.delivery_method.is_none() {
                return Err(ValidationError::MissingDeliveryMethod);
            }
            let filled = session.emails().filled();
            if filled.len() != session.email_count() {
                return Err(ValidationError::IncompleteEmails);
            }
            if filled.iter().any(|email| !is_valid_email(email)) {
                return Err(ValidationError::InvalidEmail);
            }
        }
        Screen::Payment => {
            if session.payment_method.is_none() {
                return Err(ValidationError::MissingPaymentMethod);
            }
        }
        Screen::Welcome | Screen::Review | Screen::Receipt => {}
    }
    Ok(())
}

/// Permissive address check: something, `@`, something, `.`, something.
///
/// The parts must sit on one line; line terminators never count as
/// "something".
pub fn is_valid_email(email: &str) -> bool {
    email.split(is_line_terminator).any(line_has_address)
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn line_has_address(line: &str) -> bool {
    let chars: Vec<char> = line.chars().collect();
    chars.iter().enumerate().any(|(at, &c)| {
        c == '@'
            && at > 0
            && chars
                .iter()
                .enumerate()
                .skip(at + 2)
                .any(|(dot, &d)| d == '.' && dot + 1 < chars.len())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::BackgroundChoice;

    fn session_with_delivery(emails: &[&str]) -> SessionState {
        let mut session = SessionState::new();
        session.delivery_method = Some("email".to_string());
        session.set_email_count(emails.len());
        for (i, email) in emails.iter().enumerate() {
            session.set_email(i, email.to_string()).unwrap();
        }
        session
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("c@d.org"));
        assert!(is_valid_email("first.last@sub.domain.edu"));
        assert!(is_valid_email("a@b.c.d"));
        assert!(!is_valid_email("bad-email"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a@bcom"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_email_parts_must_share_a_line() {
        assert!(!is_valid_email("a\n@b.com"));
        assert!(!is_valid_email("a@b\r.com"));
        assert!(!is_valid_email("a@\u{2028}b.com"));
        assert!(!is_valid_email("a@b.\u{2029}com"));
        assert!(is_valid_email("junk\na@b.com"));
        assert!(is_valid_email("a@b.com\r\n"));
    }

    #[test]
    fn test_background_required() {
        let mut session = SessionState::new();
        assert_eq!(
            validate_screen(Screen::Background, &session),
            Err(ValidationError::MissingBackground)
        );
        session.select_preset(BackgroundChoice {
            id: "X".to_string(),
            display_name: "X".to_string(),
            image_reference: String::new(),
        });
        assert!(validate_screen(Screen::Background, &session).is_ok());
    }

    #[test]
    fn test_party_requires_trimmed_name_and_people() {
        let mut session = SessionState::new();
        session.party_name = "   ".to_string();
        session.people_count = Some(2);
        assert_eq!(
            validate_screen(Screen::Party, &session),
            Err(ValidationError::MissingPartyName)
        );
        session.party_name = "Smith".to_string();
        session.people_count = None;
        assert_eq!(
            validate_screen(Screen::Party, &session),
            Err(ValidationError::MissingPeopleCount)
        );
        session.people_count = Some(2);
        assert!(validate_screen(Screen::Party, &session).is_ok());
    }

    #[test]
    fn test_delivery_rules() {
        let mut session = SessionState::new();
        assert_eq!(
            validate_screen(Screen::Delivery, &session),
            Err(ValidationError::MissingDeliveryMethod)
        );
        session.delivery_method = Some("print".to_string());
        assert!(validate_screen(Screen::Delivery, &session).is_ok());

        let session = session_with_delivery(&["a@b.com", ""]);
        assert_eq!(
            validate_screen(Screen::Delivery, &session),
            Err(ValidationError::IncompleteEmails)
        );
        let session = session_with_delivery(&["a@b.com", "bad-email"]);
        assert_eq!(
            validate_screen(Screen::Delivery, &session),
            Err(ValidationError::InvalidEmail)
        );
        let session = session_with_delivery(&["a@b.com", "c@d.org"]);
        assert!(validate_screen(Screen::Delivery, &session).is_ok());
    }

    #[test]
    fn test_delivery_passes_iff_all_slots_valid() {
        for count in 0..=5 {
            let valid: Vec<String> = (0..count).map(|i| format!("guest{}@booth.com", i)).collect();
            let refs: Vec<&str> = valid.iter().map(String::as_str).collect();
            assert!(validate_screen(Screen::Delivery, &session_with_delivery(&refs)).is_ok());

            for hole in 0..count {
                let mut broken = refs.clone();
                broken[hole] = " ";
                assert!(validate_screen(Screen::Delivery, &session_with_delivery(&broken)).is_err());
                broken[hole] = "nope";
                assert!(validate_screen(Screen::Delivery, &session_with_delivery(&broken)).is_err());
            }
        }
    }

    #[test]
    fn test_payment_and_passthrough_screens() {
        let session = SessionState::new();
        assert_eq!(
            validate_screen(Screen::Payment, &session),
            Err(ValidationError::MissingPaymentMethod)
        );
        for screen in [Screen::Welcome, Screen::Review, Screen::Receipt] {
            assert!(validate_screen(screen, &session).is_ok());
        }
    }

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(
            ValidationError::IncompleteEmails.to_string(),
            "Please fill in all email addresses."
        );
    }
}
