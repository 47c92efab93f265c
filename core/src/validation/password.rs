//! Password strength checks.
//!
//! Rules are applied in a fixed order and the first failure wins: length,
//! uppercase, lowercase, digit. Confirmation is only compared once the
//! password itself is valid.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordRules {
    pub min_length: usize,
}

impl Default for PasswordRules {
    fn default() -> Self {
        Self { min_length: 8 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordValidationResult {
    Valid,
    TooShort,
    MissingUppercase,
    MissingLowercase,
    MissingNumber,
    PasswordsDoNotMatch,
}

impl PasswordValidationResult {
    pub fn is_valid(self) -> bool {
        self == Self::Valid
    }

    /// User-facing message; empty for `Valid`.
    pub fn message(self) -> &'static str {
        match self {
            Self::Valid => "",
            Self::TooShort => "Password must be at least 8 characters",
            Self::MissingUppercase => "Password must contain at least one uppercase letter",
            Self::MissingLowercase => "Password must contain at least one lowercase letter",
            Self::MissingNumber => "Password must contain at least one number",
            Self::PasswordsDoNotMatch => "Passwords do not match",
        }
    }
}

impl fmt::Display for PasswordValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordValidator {
    rules: PasswordRules,
}

impl PasswordValidator {
    pub fn new(rules: PasswordRules) -> Self {
        Self { rules }
    }

    pub fn validate(&self, password: &str) -> PasswordValidationResult {
        if password.chars().count() < self.rules.min_length {
            return PasswordValidationResult::TooShort;
        }
        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            return PasswordValidationResult::MissingUppercase;
        }
        if !password.chars().any(|c| c.is_ascii_lowercase()) {
            return PasswordValidationResult::MissingLowercase;
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            return PasswordValidationResult::MissingNumber;
        }
        PasswordValidationResult::Valid
    }

    pub fn validate_confirmed(&self, password: &str, confirm_password: &str) -> PasswordValidationResult {
        let result = self.validate(password);
        if !result.is_valid() {
            return result;
        }
        if password != confirm_password {
            return PasswordValidationResult::PasswordsDoNotMatch;
        }
        PasswordValidationResult::Valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PasswordValidationResult::*;

    fn validator() -> PasswordValidator {
        PasswordValidator::default()
    }

    #[test]
    fn rules_apply_in_order() {
        assert_eq!(validator().validate("Ab1"), TooShort);
        assert_eq!(validator().validate("abcdefgh"), MissingUppercase);
        assert_eq!(validator().validate("ABCDEFG1"), MissingLowercase);
        assert_eq!(validator().validate("Abcdefgh"), MissingNumber);
        assert_eq!(validator().validate("Abcdefg1"), Valid);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 7 characters, 10 bytes
        assert_eq!(validator().validate("Äbcdéf1"), TooShort);
    }

    #[test]
    fn combining_marks_count_toward_length() {
        // "e" + U+0301 renders as one glyph but is two scalar values: 8 total
        assert_eq!(validator().validate("Abcde\u{301}f1"), Valid);
    }

    #[test]
    fn custom_minimum_length() {
        let v = PasswordValidator::new(PasswordRules { min_length: 12 });
        assert_eq!(v.validate("Abcdefg1"), TooShort);
        assert_eq!(v.validate("Abcdefghijk1"), Valid);
    }

    #[test]
    fn confirmation_mismatch() {
        assert_eq!(validator().validate_confirmed("Abcdefg1", "Abcdefg2"), PasswordsDoNotMatch);
        assert_eq!(validator().validate_confirmed("Abcdefg1", "Abcdefg1"), Valid);
    }

    #[test]
    fn weak_password_reported_before_mismatch() {
        assert_eq!(validator().validate_confirmed("abc", "xyz"), TooShort);
    }

    #[test]
    fn messages() {
        assert_eq!(Valid.message(), "");
        assert_eq!(TooShort.to_string(), "Password must be at least 8 characters");
        assert_eq!(PasswordsDoNotMatch.to_string(), "Passwords do not match");
    }
}
