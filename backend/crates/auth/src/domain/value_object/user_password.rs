//! User Password Value Object
//!
//! Domain wrapper over `platform::password` mapping its errors into
//! the shared error taxonomy.

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};
use std::fmt;

/// Raw password from user input, zeroized on drop
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooLong { max, .. } => {
                AppError::validation(format!("password must be at most {} characters", max))
            }
            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::validation("password must not be empty")
            }
            PasswordPolicyError::InvalidCharacter => {
                AppError::validation("password contains invalid characters")
            }
        })?;

        Ok(Self(clear_text))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// Argon2id hash in PHC format, safe to store
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        raw.0
            .hash(pepper)
            .map(Self)
            .map_err(|e| AppError::internal("password hashing failed").with_source(e))
    }

    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        HashedPassword::from_phc_string(phc_string)
            .map(Self)
            .map_err(|e| AppError::internal("invalid password hash in database").with_source(e))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(&raw.0, pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::error::kind::ErrorKind;

    #[test]
    fn test_empty_password_is_validation_error() {
        let err = RawPassword::new("  ".to_string()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.message(), "password must not be empty");
    }

    #[test]
    fn test_hash_verify() {
        let raw = RawPassword::new("correct horse".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();

        let restored = UserPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&raw, None));

        let wrong = RawPassword::new("battery staple".to_string()).unwrap();
        assert!(!restored.verify(&wrong, None));
    }

    #[test]
    fn test_corrupt_hash_is_internal() {
        let err = UserPassword::from_phc_string("plaintext").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }
}
