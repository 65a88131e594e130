//! Password Digest Value Object
//!
//! Wraps the platform Argon2id hash. The domain never sees plaintext
//! after construction and never exposes the digest in Debug/Display.

use std::fmt;

use platform::password::{ClearTextPassword, HashedPassword, PasswordHashError};

/// Hashed password credential stored on the user record
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(HashedPassword);

impl PasswordDigest {
    /// Hash a validated clear-text password
    pub fn from_clear_text(
        password: &ClearTextPassword,
        pepper: Option<&[u8]>,
    ) -> Result<Self, PasswordHashError> {
        Ok(Self(password.hash(pepper)?))
    }

    /// Restore from a stored PHC string
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        Ok(Self(HashedPassword::from_phc_string(s)?))
    }

    /// Verify a clear-text candidate against this digest
    ///
    /// Returns false on mismatch, never errors.
    pub fn verify(&self, candidate: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(candidate, pepper)
    }

    /// PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PasswordDigest").field(&"[HASH]").finish()
    }
}

impl fmt::Display for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[HASH]")
    }
}
