//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::Extension;
use std::sync::Arc;

use platform::client::extract_client_ip;
use platform::cookie::CookieConfig;
use platform::crypto::sha256;

use crate::application::config::AuthConfig;
use crate::application::{
    LoginInput, LoginUseCase, RegisterInput, RegisterUseCase, UpdateProfileInput,
    UpdateProfileUseCase,
};
use crate::domain::repository::{LoginAttemptRepository, UserRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{
    CurrentUserResponse, LoginRequest, RegisterRequest, UpdateProfileRequest, UserResponse,
};
use crate::presentation::middleware::CurrentUser;

/// Shared state for auth handlers and middleware
#[derive(Clone)]
pub struct AuthState<R>
where
    R: UserRepository + LoginAttemptRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + LoginAttemptRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(RegisterInput {
            username: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    let cookie = build_session_cookie(
        &state.config,
        &output.token,
        state.config.token_ttl.as_secs() as i64,
    );

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(UserResponse::from(&output.user)),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthState<R>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + LoginAttemptRepository + Clone + Send + Sync + 'static,
{
    let client_ip = extract_client_ip(&headers, Some(addr.ip())).unwrap_or(addr.ip());
    let caller_key = sha256(client_ip.to_string().as_bytes());

    let use_case = LoginUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
            caller_key,
        })
        .await?;

    let cookie = build_session_cookie(
        &state.config,
        &output.token,
        state.config.token_ttl.as_secs() as i64,
    );

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(UserResponse::from(&output.user)),
    ))
}

// ============================================================================
// Current User
// ============================================================================

/// GET /api/auth/me
///
/// The middleware already authenticated and loaded the identity; this
/// just echoes it, no second lookup.
pub async fn me(Extension(current): Extension<CurrentUser>) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse {
        user_id: current.user_id.to_string(),
        username: current.username.as_str().to_string(),
        email: current.email.as_str().to_string(),
    })
}

// ============================================================================
// Update Profile
// ============================================================================

/// PUT /api/auth/update
pub async fn update<R>(
    State(state): State<AuthState<R>>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<UpdateProfileRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + LoginAttemptRepository + Clone + Send + Sync + 'static,
{
    let use_case = UpdateProfileUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(
            &current.user_id,
            UpdateProfileInput {
                username: req.username,
                email: req.email,
                password: req.password,
            },
        )
        .await?;

    let body = Json(UserResponse::from(&output.user));

    // A rotated version stales the cookie the caller just used; hand
    // out a replacement at the extended TTL so they stay logged in
    match output.rotated_token {
        Some(token) => {
            let cookie = build_session_cookie(
                &state.config,
                &token,
                state.config.token_ttl_extended.as_secs() as i64,
            );
            Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)], body).into_response())
        }
        None => Ok((StatusCode::OK, body).into_response()),
    }
}

// ============================================================================
// Logout
// ============================================================================

/// DELETE /api/auth/logout
///
/// Tokens are self-contained, so there is nothing to revoke server
/// side; clearing the cookie is the whole operation.
pub async fn logout<R>(State(state): State<AuthState<R>>) -> impl IntoResponse
where
    R: UserRepository + LoginAttemptRepository + Clone + Send + Sync + 'static,
{
    let cookie = cookie_config(&state.config, None).build_delete_cookie();

    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(serde_json::json!({ "message": "Logged out" })),
    )
}

// ============================================================================
// Helper Functions
// ============================================================================

fn cookie_config(config: &AuthConfig, max_age_secs: Option<i64>) -> CookieConfig {
    CookieConfig {
        name: config.cookie_name.clone(),
        secure: config.cookie_secure,
        http_only: true,
        same_site: config.cookie_same_site,
        path: "/".to_string(),
        max_age_secs,
    }
}

fn build_session_cookie(config: &AuthConfig, token: &str, max_age_secs: i64) -> String {
    cookie_config(config, Some(max_age_secs)).build_set_cookie(token)
}
