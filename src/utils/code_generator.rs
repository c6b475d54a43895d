//! Short code generation and validation utilities.

use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;

/// Random bytes per code; 6 bytes encode to exactly 8 URL-safe characters.
const CODE_LENGTH_BYTES: usize = 6;

/// Shortest and longest accepted custom codes.
pub const MIN_CODE_LENGTH: usize = 2;
pub const MAX_CODE_LENGTH: usize = 25;

/// Codes that would shadow system routes.
const RESERVED_CODES: &[&str] = &["api", "admin", "health"];

/// Generates a random 8-character short code.
///
/// Uses `getrandom` for entropy and URL-safe base64 without padding, so the
/// output alphabet is `[A-Za-z0-9_-]`. Uniqueness is not guaranteed here;
/// collisions are handled by the service retry loop against the storage
/// unique constraint.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_code() -> String {
    let mut buffer = [0u8; CODE_LENGTH_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 2-25 characters
/// - Allowed characters: letters, digits, underscores, hyphens
/// - Cannot be a reserved system code
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.len() < MIN_CODE_LENGTH || code.len() > MAX_CODE_LENGTH {
        return Err(AppError::bad_request(
            format!(
                "Custom code must be {}-{} characters",
                MIN_CODE_LENGTH, MAX_CODE_LENGTH
            ),
            json!({ "provided_length": code.len() }),
        ));
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(AppError::bad_request(
            "Custom code can only contain letters, digits, underscores, and hyphens",
            json!({ "code": code }),
        ));
    }

    if RESERVED_CODES.contains(&code) {
        return Err(AppError::bad_request(
            "This code is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        let code = generate_code();
        assert_eq!(code.len(), 8);
    }

    #[test]
    fn test_generate_code_url_safe_characters() {
        let code = generate_code();
        assert!(
            code.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_generate_code_no_padding() {
        let code = generate_code();
        assert!(!code.contains('='));
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let mut codes = HashSet::new();

        for _ in 0..1000 {
            codes.insert(generate_code());
        }

        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_generated_codes_pass_custom_validation() {
        for _ in 0..100 {
            assert!(validate_custom_code(&generate_code()).is_ok());
        }
    }

    #[test]
    fn test_validate_minimum_length() {
        assert!(validate_custom_code("ab").is_ok());
    }

    #[test]
    fn test_validate_maximum_length() {
        assert!(validate_custom_code(&"a".repeat(25)).is_ok());
    }

    #[test]
    fn test_validate_single_character_too_short() {
        assert!(validate_custom_code("a").is_err());
    }

    #[test]
    fn test_validate_empty_string() {
        assert!(validate_custom_code("").is_err());
    }

    #[test]
    fn test_validate_too_long() {
        assert!(validate_custom_code(&"a".repeat(26)).is_err());
    }

    #[test]
    fn test_validate_mixed_case_allowed() {
        assert!(validate_custom_code("MyLink2024").is_ok());
    }

    #[test]
    fn test_validate_underscores_and_hyphens() {
        assert!(validate_custom_code("my_cool-link").is_ok());
    }

    #[test]
    fn test_validate_spaces_not_allowed() {
        assert!(validate_custom_code("my code").is_err());
    }

    #[test]
    fn test_validate_special_characters() {
        assert!(validate_custom_code("my@code").is_err());
        assert!(validate_custom_code("code/123").is_err());
        assert!(validate_custom_code("cöde").is_err());
    }

    #[test]
    fn test_validate_all_reserved_codes() {
        for &reserved in RESERVED_CODES {
            assert!(
                validate_custom_code(reserved).is_err(),
                "Reserved code '{}' should be invalid",
                reserved
            );
        }
    }

    #[test]
    fn test_validate_reserved_prefix_is_allowed() {
        // only exact matches are reserved
        assert!(validate_custom_code("api2").is_ok());
        assert!(validate_custom_code("administrator").is_ok());
    }
}
