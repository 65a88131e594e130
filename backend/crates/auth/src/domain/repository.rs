//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::user::User;
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::AuthResult;

/// User repository trait
///
/// The store enforces email uniqueness; `create` and `update` surface
/// a constraint violation as `AuthError::DuplicateEmail`. `update`
/// writes every mutable column in one statement, so hash and token
/// version can never be persisted separately.
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if email exists
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Update user (all mutable fields, single statement)
    async fn update(&self, user: &User) -> AuthResult<()>;
}

/// Login attempt repository trait
///
/// Backs the sliding-window login rate limiter. One row per attempt,
/// keyed by an opaque caller key (SHA-256 of the client IP).
#[trait_variant::make(LoginAttemptRepository: Send)]
pub trait LocalLoginAttemptRepository {
    /// Record an attempt and return how many attempts this caller has
    /// made inside the window ending now
    async fn record_and_count(&self, caller_key: &[u8], window_ms: i64) -> AuthResult<u32>;

    /// Delete attempts older than the cutoff (startup housekeeping)
    async fn prune_before(&self, cutoff_ms: i64) -> AuthResult<u64>;
}
