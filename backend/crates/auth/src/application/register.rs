//! Register Use Case
//!
//! Creates an account and mints the first session token.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, password_digest::PasswordDigest, user_name::UserName,
};
use crate::error::{AuthError, AuthResult, FieldError};

/// Register input
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Register output
#[derive(Debug)]
pub struct RegisterOutput {
    pub user: User,
    /// Session token for the cookie
    pub token: String,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        // Validate every field, reporting all violations together
        let mut errors = Vec::new();

        let username = match UserName::new(&input.username) {
            Ok(name) => Some(name),
            Err(e) => {
                errors.push(FieldError::new("username", e.to_string()));
                None
            }
        };

        let email = match Email::new(input.email.as_str()) {
            Ok(email) => Some(email),
            Err(e) => {
                errors.push(FieldError::new("email", e.to_string()));
                None
            }
        };

        let password = match ClearTextPassword::new(input.password) {
            Ok(password) => Some(password),
            Err(e) => {
                errors.push(FieldError::new("password", e.to_string()));
                None
            }
        };

        if !errors.is_empty() {
            return Err(AuthError::Validation(errors));
        }

        let (Some(username), Some(email), Some(password)) = (username, email, password) else {
            return Err(AuthError::Internal(
                "field validation produced no errors but no values".to_string(),
            ));
        };

        // Pre-check keeps the common case friendly; the unique index
        // catches the concurrent race in create()
        if self.repo.exists_by_email(&email).await? {
            return Err(AuthError::DuplicateEmail);
        }

        let digest = PasswordDigest::from_clear_text(&password, self.config.pepper())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let user = User::new(username, email, digest);
        self.repo.create(&user).await?;

        let token = TokenIssuer::new(&self.config.token_secret).issue(
            &user.user_id,
            user.token_version,
            self.config.token_ttl,
        );

        tracing::info!(user_id = %user.user_id, "User registered");

        Ok(RegisterOutput { user, token })
    }
}
