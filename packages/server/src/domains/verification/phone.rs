//! Phone number normalization (E.164) and code extraction.

use lazy_static::lazy_static;
use regex::Regex;
use sha2::{Digest, Sha256};
use thiserror::Error;

lazy_static! {
    // ASCII digits only; `\d` in the regex crate is Unicode-aware.
    static ref E164_REGEX: Regex = Regex::new(r"^\+[1-9][0-9]{1,14}$").unwrap();

    static ref DIGIT_RUN_REGEX: Regex = Regex::new(r"[0-9]+").unwrap();
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    #[error("expected 10 digits for a national number, found {digits}")]
    NotTenDigits { digits: usize },

    #[error("not a valid E.164 phone number")]
    NotE164,
}

/// Normalize loosely formatted input into E.164.
///
/// Input without a leading `+` is reduced to its digits and must be a
/// 10-digit (North American) number, which gets a `+1` prefix. Input with a
/// leading `+` is taken as-is. Either way the result must match E.164.
pub fn normalize_phone(input: &str) -> Result<String, PhoneError> {
    let candidate = if input.starts_with('+') {
        input.to_string()
    } else {
        let digits: String = input.chars().filter(char::is_ascii_digit).collect();
        if digits.len() != 10 {
            return Err(PhoneError::NotTenDigits {
                digits: digits.len(),
            });
        }
        format!("+1{}", digits)
    };

    if E164_REGEX.is_match(&candidate) {
        Ok(candidate)
    } else {
        Err(PhoneError::NotE164)
    }
}

/// First run of exactly six digits in an inbound text message.
///
/// Longer digit runs (order numbers, phone numbers) are skipped.
pub fn extract_code(text: &str) -> Option<String> {
    DIGIT_RUN_REGEX
        .find_iter(text)
        .map(|m| m.as_str())
        .find(|run| run.len() == 6)
        .map(str::to_string)
}

/// SHA-256 of a phone number, for log fields.
pub fn hash_phone_number(phone_number: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(phone_number.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Mask `phone_number` (with or without its `+`) in free text such as
/// provider error messages before they are logged.
pub fn redact_phone(text: &str, phone_number: &str) -> String {
    let bare = phone_number.trim_start_matches('+');
    if bare.is_empty() {
        return text.to_string();
    }
    text.replace(phone_number, "[phone]").replace(bare, "[phone]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_digits_get_us_prefix() {
        assert_eq!(normalize_phone("5555550100").unwrap(), "+15555550100");
        assert_eq!(normalize_phone("(555) 555-0100").unwrap(), "+15555550100");
        assert_eq!(normalize_phone("555.555.0100").unwrap(), "+15555550100");
        assert_eq!(normalize_phone(" 555 555 0100 ").unwrap(), "+15555550100");
    }

    #[test]
    fn test_every_ten_digit_input_is_prefixed() {
        for start in ["0000000000", "1234567890", "9999999999", "0123456789"] {
            assert_eq!(normalize_phone(start).unwrap(), format!("+1{}", start));
        }
    }

    #[test]
    fn test_valid_e164_passes_through_unchanged() {
        for phone in ["+15555550100", "+447911123456", "+12", "+123456789012345"] {
            assert_eq!(normalize_phone(phone).unwrap(), phone);
        }
    }

    #[test]
    fn test_plus_prefixed_input_is_not_cleaned() {
        assert_eq!(normalize_phone("+1 555 555 0100"), Err(PhoneError::NotE164));
        assert_eq!(normalize_phone("+1-555-555-0100"), Err(PhoneError::NotE164));
    }

    #[test]
    fn test_rejects_invalid_e164() {
        assert_eq!(normalize_phone("+0123456789"), Err(PhoneError::NotE164));
        assert_eq!(normalize_phone("+1"), Err(PhoneError::NotE164));
        assert_eq!(normalize_phone("+1234567890123456"), Err(PhoneError::NotE164));
        assert_eq!(normalize_phone("+"), Err(PhoneError::NotE164));
    }

    #[test]
    fn test_rejects_wrong_digit_counts() {
        assert_eq!(
            normalize_phone("15555550100"),
            Err(PhoneError::NotTenDigits { digits: 11 })
        );
        assert_eq!(
            normalize_phone("555-0100"),
            Err(PhoneError::NotTenDigits { digits: 7 })
        );
        assert_eq!(
            normalize_phone("not a phone"),
            Err(PhoneError::NotTenDigits { digits: 0 })
        );
    }

    #[test]
    fn test_non_ascii_digits_are_stripped() {
        // Arabic-Indic digits are not phone digits
        assert!(normalize_phone("٥٥٥٥٥٥٠١٠٠").is_err());
        assert_eq!(normalize_phone("+١٥٥٥٥٥٥٠١٠٠"), Err(PhoneError::NotE164));
    }

    #[test]
    fn test_extract_code() {
        assert_eq!(
            extract_code("Your verification code is: 123456").as_deref(),
            Some("123456")
        );
        assert_eq!(extract_code("123456").as_deref(), Some("123456"));
        assert_eq!(extract_code("code 654321, expires in 10 minutes").as_deref(), Some("654321"));
    }

    #[test]
    fn test_extract_code_skips_longer_runs() {
        assert_eq!(
            extract_code("Order 1234567890 confirmed. Code 246810").as_deref(),
            Some("246810")
        );
        assert_eq!(extract_code("call 5555550100"), None);
        assert_eq!(extract_code("code 12345"), None);
        assert_eq!(extract_code(""), None);
    }

    #[test]
    fn test_phone_hash_format() {
        let hash = hash_phone_number("+15555550100");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(hash, hash_phone_number("+15555550100"));
        assert_ne!(hash, hash_phone_number("+15555550101"));
    }

    #[test]
    fn test_redact_phone() {
        let message = "Invalid parameter `To`: +15555550100";
        assert_eq!(
            redact_phone(message, "+15555550100"),
            "Invalid parameter `To`: [phone]"
        );
        assert_eq!(
            redact_phone("number 15555550100 is blocked", "+15555550100"),
            "number [phone] is blocked"
        );
        assert_eq!(
            redact_phone("Max send attempts reached", "+15555550100"),
            "Max send attempts reached"
        );
    }
}
