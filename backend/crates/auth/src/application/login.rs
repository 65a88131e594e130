//! Login Use Case
//!
//! Rate-limits, authenticates, and mints a session token at the user's
//! current stored token version.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::domain::entity::user::User;
use crate::domain::repository::{LoginAttemptRepository, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
    /// Opaque caller key for the rate limiter (SHA-256 of client IP)
    pub caller_key: [u8; 32],
}

/// Login output
pub struct LoginOutput {
    pub user: User,
    /// Session token for the cookie
    pub token: String,
}

/// Login use case
pub struct LoginUseCase<U, L>
where
    U: UserRepository,
    L: LoginAttemptRepository,
{
    user_repo: Arc<U>,
    attempt_repo: Arc<L>,
    config: Arc<AuthConfig>,
}

impl<U, L> LoginUseCase<U, L>
where
    U: UserRepository,
    L: LoginAttemptRepository,
{
    pub fn new(user_repo: Arc<U>, attempt_repo: Arc<L>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            attempt_repo,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        // Throttle first. Every attempt counts, whatever its outcome,
        // so hammering with bad passwords burns the budget too.
        let attempts = self
            .attempt_repo
            .record_and_count(&input.caller_key, self.config.login_rate_limit.window_ms())
            .await?;

        if attempts > self.config.login_rate_limit.max_requests {
            return Err(AuthError::RateLimited);
        }

        // Unknown email and wrong password must be indistinguishable
        let email = Email::new(input.email.as_str()).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let candidate = ClearTextPassword::for_verification(input.password);
        if !user.password_hash.verify(&candidate, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        // Mint at the CURRENT stored version, not a remembered one
        let token = TokenIssuer::new(&self.config.token_secret).issue(
            &user.user_id,
            user.token_version,
            self.config.token_ttl,
        );

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(LoginOutput { user, token })
    }
}
