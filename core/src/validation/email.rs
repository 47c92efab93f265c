use std::sync::LazyLock;

use regex::Regex;

// Practical subset of RFC 5322: local part, `@`, dotted domain, alphabetic
// TLD of at least two letters.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z0-9a-z._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email pattern compiles")
});

#[derive(Debug, Clone, Copy, Default)]
pub struct EmailValidator;

impl EmailValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn is_valid(&self, email: &str) -> bool {
        EMAIL.is_match(email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        let v = EmailValidator::new();
        assert!(v.is_valid("a@b.co"));
        assert!(v.is_valid("a.b@c.d.com"));
        assert!(v.is_valid("first+tag_1%x@mail-server.example.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        let v = EmailValidator::new();
        assert!(!v.is_valid(""));
        assert!(!v.is_valid("a@b"));
        assert!(!v.is_valid("a@b.c"));
        assert!(!v.is_valid("@b.co"));
        assert!(!v.is_valid("a b@c.co"));
        assert!(!v.is_valid("a@b.co "));
        assert!(!v.is_valid("a@b.c0m"));
    }
}
