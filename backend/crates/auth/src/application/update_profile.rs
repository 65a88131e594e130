//! Update Profile Use Case
//!
//! Applies independently optional field updates to the authenticated
//! user. A password change rotates the token version, which invalidates
//! every outstanding token, so the output says whether the caller needs
//! a replacement cookie.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, password_digest::PasswordDigest, user_id::UserId, user_name::UserName,
};
use crate::error::{AuthError, AuthResult, FieldError};

/// Update profile input - every field optional and independent
#[derive(Default)]
pub struct UpdateProfileInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Update profile output
pub struct UpdateProfileOutput {
    pub user: User,
    /// A replacement token at the extended TTL when the version
    /// rotated; None when the existing cookie is still valid
    pub rotated_token: Option<String>,
}

/// Update profile use case
pub struct UpdateProfileUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> UpdateProfileUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        input: UpdateProfileInput,
    ) -> AuthResult<UpdateProfileOutput> {
        // Same field rules as registration, all violations reported
        let mut errors = Vec::new();

        let username = match input.username {
            Some(raw) => match UserName::new(&raw) {
                Ok(name) => Some(name),
                Err(e) => {
                    errors.push(FieldError::new("username", e.to_string()));
                    None
                }
            },
            None => None,
        };

        let email = match input.email {
            Some(raw) => match Email::new(raw.as_str()) {
                Ok(email) => Some(email),
                Err(e) => {
                    errors.push(FieldError::new("email", e.to_string()));
                    None
                }
            },
            None => None,
        };

        let password = match input.password {
            Some(raw) => match ClearTextPassword::new(raw) {
                Ok(password) => Some(password),
                Err(e) => {
                    errors.push(FieldError::new("password", e.to_string()));
                    None
                }
            },
            None => None,
        };

        if !errors.is_empty() {
            return Err(AuthError::Validation(errors));
        }

        // The middleware authenticated this id moments ago; absence now
        // is a server-side inconsistency, not a client error
        let mut user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::InternalInconsistency)?;

        if let Some(email) = &email {
            if email != &user.email && self.repo.exists_by_email(email).await? {
                return Err(AuthError::DuplicateEmail);
            }
        }

        if let Some(username) = username {
            user.set_username(username);
        }
        if let Some(email) = email {
            user.set_email(email);
        }

        let mut rotated = false;
        if let Some(password) = password {
            let digest = PasswordDigest::from_clear_text(&password, self.config.pepper())
                .map_err(|e| AuthError::Internal(e.to_string()))?;
            user.change_password(digest);
            rotated = true;
        }

        // One statement writes hash and version together
        self.repo.update(&user).await?;

        let rotated_token = rotated.then(|| {
            TokenIssuer::new(&self.config.token_secret).issue(
                &user.user_id,
                user.token_version,
                self.config.token_ttl_extended,
            )
        });

        tracing::info!(
            user_id = %user.user_id,
            credential_rotated = rotated,
            "Profile updated"
        );

        Ok(UpdateProfileOutput {
            user,
            rotated_token,
        })
    }
}
