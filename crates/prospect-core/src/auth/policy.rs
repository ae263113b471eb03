//! Strength policy for new secrets.

use thiserror::Error;

/// A single rule the candidate secret broke.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyViolation {
    #[error("the secret must be at least {0} characters long")]
    TooShort(usize),
    #[error("the secret must contain an upper-case letter")]
    MissingUppercase,
    #[error("the secret must contain a lower-case letter")]
    MissingLowercase,
    #[error("the secret must contain a digit")]
    MissingDigit,
    #[error("the secret must contain a special character")]
    MissingSpecial,
}

/// Local policy checked before a rotation request is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretPolicy {
    pub min_length: usize,
}

impl Default for SecretPolicy {
    fn default() -> Self {
        Self { min_length: 8 }
    }
}

impl SecretPolicy {
    /// Checks `candidate`, reporting the first rule it breaks.
    pub fn check(&self, candidate: &str) -> Result<(), PolicyViolation> {
        if candidate.chars().count() < self.min_length {
            return Err(PolicyViolation::TooShort(self.min_length));
        }
        if !candidate.chars().any(char::is_uppercase) {
            return Err(PolicyViolation::MissingUppercase);
        }
        if !candidate.chars().any(char::is_lowercase) {
            return Err(PolicyViolation::MissingLowercase);
        }
        if !candidate.chars().any(|c| c.is_ascii_digit()) {
            return Err(PolicyViolation::MissingDigit);
        }
        if !candidate.chars().any(|c| !c.is_alphanumeric()) {
            return Err(PolicyViolation::MissingSpecial);
        }
        Ok(())
    }
}
