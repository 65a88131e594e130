//! Token Version Value Object
//!
//! A monotonically increasing counter on the user record. Session
//! tokens embed the version they were minted at; bumping the stored
//! version invalidates every outstanding token at once.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Token version counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenVersion(i32);

impl TokenVersion {
    /// Version assigned at registration
    pub fn initial() -> Self {
        Self(0)
    }

    /// The next version (after a password change)
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Raw value for storage / claims
    pub fn value(self) -> i32 {
        self.0
    }

    /// Create from a stored value
    pub fn from_value(value: i32) -> Self {
        Self(value)
    }
}

impl Default for TokenVersion {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for TokenVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
