//! Per-field syntactic validation.
//!
//! Checks are deliberately shallow: enough to catch an obviously wrong
//! answer and re-prompt, not full RFC validation.

use thiserror::Error;

use super::field::FieldName;

/// A rejected field value, with the message shown to the candidate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FieldViolation {
    pub field: FieldName,
    pub message: String,
}

impl FieldViolation {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validates a candidate value for a field.
///
/// `None` means the field is absent; absent and blank values fail with the
/// same "cannot be empty" message regardless of field.
pub fn validate(field: FieldName, value: Option<&str>) -> Result<(), FieldViolation> {
    let value = match value {
        Some(v) if !v.trim().is_empty() => v.trim(),
        _ => return Err(FieldViolation::new(field, "Input cannot be empty.")),
    };

    match field {
        FieldName::Email if !looks_like_email(value) => Err(FieldViolation::new(
            field,
            "That doesn't look like a valid email address. Please try again.",
        )),
        FieldName::PhoneNumber if !has_digit_run(value, 7) => Err(FieldViolation::new(
            field,
            "That doesn't look like a valid phone number. \
             Please enter a number with at least 7 digits.",
        )),
        FieldName::YearsExperience if !mentions_experience_level(value) => {
            Err(FieldViolation::new(
                field,
                "Please describe your experience level (e.g., 'Junior', '5 years', 'Senior').",
            ))
        }
        _ => Ok(()),
    }
}

/// `local@domain.tld` shape: one '@' with non-empty '@'-free sides, and a
/// '.' followed by at least one character in the domain.
fn looks_like_email(value: &str) -> bool {
    let mut parts = value.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = match parts.next() {
        Some(d) => d,
        None => return false,
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rfind('.') {
        Some(dot) => dot + 1 < domain.len(),
        None => false,
    }
}

/// True if the value contains at least `min` consecutive ASCII digits.
fn has_digit_run(value: &str, min: usize) -> bool {
    let mut run = 0;
    for c in value.chars() {
        if c.is_ascii_digit() {
            run += 1;
            if run >= min {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

fn mentions_experience_level(value: &str) -> bool {
    let lower = value.to_lowercase();
    ["junior", "mid", "senior", "years"]
        .iter()
        .any(|level| lower.contains(level))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    mod presence {
        use super::*;

        #[test]
        fn absent_value_cannot_be_empty() {
            let err = validate(FieldName::FullName, None).unwrap_err();
            assert_eq!(err.message, "Input cannot be empty.");
        }

        #[test]
        fn whitespace_only_value_is_empty() {
            assert!(validate(FieldName::FullName, Some("   \t")).is_err());
        }

        #[test]
        fn any_nonblank_text_passes_presence_only_fields() {
            for field in [
                FieldName::FullName,
                FieldName::DesiredPositions,
                FieldName::CurrentLocation,
                FieldName::TechStack,
            ] {
                assert!(validate(field, Some("anything at all")).is_ok());
            }
        }
    }

    mod email {
        use super::*;

        #[test]
        fn plain_address_passes() {
            assert!(validate(FieldName::Email, Some("ada@example.com")).is_ok());
        }

        #[test]
        fn missing_at_sign_fails() {
            assert!(validate(FieldName::Email, Some("not-an-email")).is_err());
        }

        #[test]
        fn missing_domain_dot_fails() {
            assert!(validate(FieldName::Email, Some("ada@example")).is_err());
        }

        #[test]
        fn trailing_dot_fails() {
            assert!(validate(FieldName::Email, Some("ada@example.")).is_err());
        }

        #[test]
        fn double_at_fails() {
            assert!(validate(FieldName::Email, Some("ada@@example.com")).is_err());
        }

        #[test]
        fn surrounding_whitespace_is_trimmed_before_checking() {
            assert!(validate(FieldName::Email, Some("  ada@example.com  ")).is_ok());
        }
    }

    mod phone {
        use super::*;

        #[test]
        fn seven_consecutive_digits_pass() {
            assert!(validate(FieldName::PhoneNumber, Some("call 1234567")).is_ok());
        }

        #[test]
        fn formatted_number_with_long_run_passes() {
            assert!(validate(FieldName::PhoneNumber, Some("+1 (555) 0192837")).is_ok());
        }

        #[test]
        fn digits_broken_by_separators_fail() {
            // Six is the longest run here
            assert!(validate(FieldName::PhoneNumber, Some("123-456-12")).is_err());
        }

        #[test]
        fn words_fail() {
            assert!(validate(FieldName::PhoneNumber, Some("you have my number")).is_err());
        }
    }

    mod experience {
        use super::*;

        #[test]
        fn level_keywords_pass() {
            for answer in ["Junior", "mid-level", "SENIOR engineer", "5 years"] {
                assert!(validate(FieldName::YearsExperience, Some(answer)).is_ok());
            }
        }

        #[test]
        fn bare_number_fails() {
            assert!(validate(FieldName::YearsExperience, Some("5")).is_err());
        }
    }

    proptest! {
        #[test]
        fn any_string_with_seven_digit_run_is_a_valid_phone(
            prefix in "[a-z +()-]{0,8}",
            digits in "[0-9]{7,12}",
            suffix in "[a-z +()-]{0,8}",
        ) {
            let value = format!("{prefix}{digits}{suffix}");
            prop_assert!(validate(FieldName::PhoneNumber, Some(&value)).is_ok());
        }

        #[test]
        fn digit_free_strings_are_never_valid_phones(value in "[a-zA-Z ,.-]+") {
            prop_assert!(validate(FieldName::PhoneNumber, Some(&value)).is_err());
        }

        #[test]
        fn local_at_domain_tld_shapes_pass_email(
            local in "[a-z0-9.+-]{1,12}",
            domain in "[a-z0-9-]{1,10}",
            tld in "[a-z]{2,6}",
        ) {
            let value = format!("{local}@{domain}.{tld}");
            prop_assert!(validate(FieldName::Email, Some(&value)).is_ok());
        }
    }
}
