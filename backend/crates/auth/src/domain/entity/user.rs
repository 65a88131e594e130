//! User Entity
//!
//! The single account record: profile fields plus credential state.
//! The password hash and token version always move together through
//! `change_password`; there is no way to touch one without the other.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, password_digest::PasswordDigest, token_version::TokenVersion, user_id::UserId,
    user_name::UserName,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier, immutable after creation
    pub user_id: UserId,
    /// Display name
    pub username: UserName,
    /// Login identifier (unique)
    pub email: Email,
    /// Argon2id digest, never plaintext
    pub password_hash: PasswordDigest,
    /// Bumped exactly once per password change
    pub token_version: TokenVersion,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with the initial token version
    pub fn new(username: UserName, email: Email, password_hash: PasswordDigest) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            username,
            email,
            password_hash,
            token_version: TokenVersion::initial(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Update display name
    pub fn set_username(&mut self, username: UserName) {
        self.username = username;
        self.updated_at = Utc::now();
    }

    /// Update email
    pub fn set_email(&mut self, email: Email) {
        self.email = email;
        self.updated_at = Utc::now();
    }

    /// Replace the password hash
    ///
    /// The only way to change the hash. Bumps the token version in the
    /// same call so every outstanding session token becomes stale.
    pub fn change_password(&mut self, new_hash: PasswordDigest) {
        self.password_hash = new_hash;
        self.token_version = self.token_version.next();
        self.updated_at = Utc::now();
    }
}
