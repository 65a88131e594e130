//! Auth Middleware
//!
//! Gate for protected routes: cookie extract → token verify → store
//! lookup → version cross-check → identity into request extensions.
//! The handler runs exactly once, after every check has passed.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::application::token::{TokenError, TokenIssuer};
use crate::domain::repository::{LoginAttemptRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, token_version::TokenVersion, user_id::UserId, user_name::UserName,
};
use crate::error::AuthError;
use crate::presentation::handlers::AuthState;

/// Authenticated identity stored in request extensions
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub username: UserName,
    pub email: Email,
    pub token_version: TokenVersion,
}

/// Middleware that requires a valid session token
///
/// Each rejection is a distinct error, never conflated:
/// - no cookie: `TokenMissing` (403)
/// - malformed/bad signature: `TokenInvalid` (401)
/// - expired: `TokenExpired` (401)
/// - subject gone from the store: `UserNotFound` (401)
/// - claims version != stored version: `StaleVersion` (401)
pub async fn require_session<R>(
    State(state): State<AuthState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: UserRepository + LoginAttemptRepository + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(req.headers(), &state.config.cookie_name)
        .ok_or_else(|| AuthError::TokenMissing.into_response())?;

    let claims = TokenIssuer::new(&state.config.token_secret)
        .verify(&token)
        .map_err(|e| {
            match e {
                TokenError::Malformed => AuthError::TokenInvalid,
                TokenError::Expired => AuthError::TokenExpired,
            }
            .into_response()
        })?;

    let user = state
        .repo
        .find_by_id(&claims.user_id())
        .await
        .map_err(|e| e.into_response())?
        .ok_or_else(|| AuthError::UserNotFound.into_response())?;

    if claims.token_version() != user.token_version {
        return Err(AuthError::StaleVersion.into_response());
    }

    req.extensions_mut().insert(CurrentUser {
        user_id: user.user_id,
        username: user.username,
        email: user.email,
        token_version: user.token_version,
    });

    Ok(next.run(req).await)
}
