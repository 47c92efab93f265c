//! Form input validators.

pub mod email;
pub mod password;

pub use email::EmailValidator;
pub use password::{PasswordRules, PasswordValidationResult, PasswordValidator};
