//! Unit tests for the auth crate
//!
//! Exercises the full credential/session lifecycle against an
//! in-memory repository, plus the HTTP surface through the router.

use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::domain::entity::user::User;
use crate::domain::repository::{LoginAttemptRepository, UserRepository};
use crate::domain::value_object::email::Email;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

// ============================================================================
// In-memory repository
// ============================================================================

#[derive(Clone, Default)]
struct MemRepo {
    users: Arc<Mutex<Vec<User>>>,
    attempts: Arc<Mutex<Vec<(Vec<u8>, i64)>>>,
}

impl UserRepository for MemRepo {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::DuplicateEmail);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| &u.user_id == user_id)
            .cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| &u.email == email))
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.user_id == user.user_id) {
            Some(slot) => {
                *slot = user.clone();
                Ok(())
            }
            None => Err(AuthError::Internal("update of unknown user".to_string())),
        }
    }
}

impl LoginAttemptRepository for MemRepo {
    async fn record_and_count(&self, caller_key: &[u8], window_ms: i64) -> AuthResult<u32> {
        let now_ms = Utc::now().timestamp_millis();
        let mut attempts = self.attempts.lock().unwrap();
        attempts.push((caller_key.to_vec(), now_ms));
        let count = attempts
            .iter()
            .filter(|(key, at)| key == caller_key && *at > now_ms - window_ms)
            .count();
        Ok(count as u32)
    }

    async fn prune_before(&self, cutoff_ms: i64) -> AuthResult<u64> {
        let mut attempts = self.attempts.lock().unwrap();
        let before = attempts.len();
        attempts.retain(|(_, at)| *at >= cutoff_ms);
        Ok((before - attempts.len()) as u64)
    }
}

// ============================================================================
// Use case tests
// ============================================================================

mod use_case_tests {
    use super::*;
    use crate::application::config::AuthConfig;
    use crate::application::login::{LoginInput, LoginUseCase};
    use crate::application::register::{RegisterInput, RegisterUseCase};
    use crate::application::update_profile::{UpdateProfileInput, UpdateProfileUseCase};
    use crate::domain::value_object::token_version::TokenVersion;
    use platform::password::ClearTextPassword;
    use platform::rate_limit::RateLimitConfig;

    fn config() -> Arc<AuthConfig> {
        Arc::new(AuthConfig {
            cookie_secure: false,
            ..AuthConfig::with_random_secret()
        })
    }

    fn register_input() -> RegisterInput {
        RegisterInput {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "Sup3rSecret!".to_string(),
        }
    }

    async fn registered(repo: &MemRepo, config: Arc<AuthConfig>) -> User {
        RegisterUseCase::new(Arc::new(repo.clone()), config)
            .execute(register_input())
            .await
            .unwrap()
            .user
    }

    #[tokio::test]
    async fn register_stores_digest_not_plaintext() {
        let repo = MemRepo::default();
        let user = registered(&repo, config()).await;

        assert_ne!(user.password_hash.as_phc_string(), "Sup3rSecret!");
        assert!(user.password_hash.verify(
            &ClearTextPassword::new_unchecked("Sup3rSecret!".to_string()),
            None
        ));
        assert_eq!(user.token_version, TokenVersion::initial());
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let repo = MemRepo::default();
        let config = config();
        registered(&repo, config.clone()).await;

        let result = RegisterUseCase::new(Arc::new(repo), config)
            .execute(register_input())
            .await;
        assert!(matches!(result, Err(AuthError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn register_collects_all_field_errors() {
        let repo = MemRepo::default();
        let result = RegisterUseCase::new(Arc::new(repo), config())
            .execute(RegisterInput {
                username: "ab".to_string(),
                email: "not-an-email".to_string(),
                password: "weak".to_string(),
            })
            .await;

        match result {
            Err(AuthError::Validation(errors)) => {
                let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["username", "email", "password"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_are_indistinguishable() {
        let repo = MemRepo::default();
        let config = config();
        registered(&repo, config.clone()).await;

        let use_case = LoginUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            config.clone(),
        );

        let unknown = use_case
            .execute(LoginInput {
                email: "nobody@example.com".to_string(),
                password: "Sup3rSecret!".to_string(),
                caller_key: [1u8; 32],
            })
            .await;
        let wrong = use_case
            .execute(LoginInput {
                email: "alice@example.com".to_string(),
                password: "Wr0ngSecret!".to_string(),
                caller_key: [1u8; 32],
            })
            .await;

        assert!(matches!(unknown, Err(AuthError::InvalidCredentials)));
        assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn login_is_rate_limited_regardless_of_outcome() {
        let repo = MemRepo::default();
        let config = Arc::new(AuthConfig {
            login_rate_limit: RateLimitConfig::new(2, 900),
            ..AuthConfig::with_random_secret()
        });
        registered(&repo, config.clone()).await;

        let use_case = LoginUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            config.clone(),
        );

        let bad = LoginInput {
            email: "alice@example.com".to_string(),
            password: "Wr0ngSecret!".to_string(),
            caller_key: [2u8; 32],
        };
        assert!(matches!(
            use_case.execute(bad).await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            use_case
                .execute(LoginInput {
                    email: "alice@example.com".to_string(),
                    password: "Wr0ngSecret!".to_string(),
                    caller_key: [2u8; 32],
                })
                .await,
            Err(AuthError::InvalidCredentials)
        ));

        // Third attempt in the window trips the limit, even with the
        // correct password
        let result = use_case
            .execute(LoginInput {
                email: "alice@example.com".to_string(),
                password: "Sup3rSecret!".to_string(),
                caller_key: [2u8; 32],
            })
            .await;
        assert!(matches!(result, Err(AuthError::RateLimited)));

        // A different caller is unaffected
        let other = use_case
            .execute(LoginInput {
                email: "alice@example.com".to_string(),
                password: "Sup3rSecret!".to_string(),
                caller_key: [9u8; 32],
            })
            .await;
        assert!(other.is_ok());
    }

    #[tokio::test]
    async fn username_only_update_keeps_token_version() {
        let repo = MemRepo::default();
        let config = config();
        let user = registered(&repo, config.clone()).await;

        let output = UpdateProfileUseCase::new(Arc::new(repo), config)
            .execute(
                &user.user_id,
                UpdateProfileInput {
                    username: Some("alicia".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(output.user.token_version, TokenVersion::initial());
        assert_eq!(output.user.username.as_str(), "alicia");
        assert!(output.rotated_token.is_none());
    }

    #[tokio::test]
    async fn password_update_bumps_version_exactly_once() {
        let repo = MemRepo::default();
        let config = config();
        let user = registered(&repo, config.clone()).await;

        let output = UpdateProfileUseCase::new(Arc::new(repo.clone()), config.clone())
            .execute(
                &user.user_id,
                UpdateProfileInput {
                    password: Some("N3wSecret!!".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(output.user.token_version.value(), 1);
        assert!(output.rotated_token.is_some());

        // Stored state matches: version and hash changed together
        let stored = repo.find_by_id(&user.user_id).await.unwrap().unwrap();
        assert_eq!(stored.token_version.value(), 1);
        assert!(stored.password_hash.verify(
            &ClearTextPassword::new_unchecked("N3wSecret!!".to_string()),
            None
        ));
    }

    #[tokio::test]
    async fn update_of_vanished_user_is_internal_inconsistency() {
        let repo = MemRepo::default();
        let result = UpdateProfileUseCase::new(Arc::new(repo), config())
            .execute(
                &UserId::new(),
                UpdateProfileInput {
                    username: Some("ghost".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AuthError::InternalInconsistency)));
    }

    #[tokio::test]
    async fn update_rejects_taken_email() {
        let repo = MemRepo::default();
        let config = config();
        let alice = registered(&repo, config.clone()).await;

        RegisterUseCase::new(Arc::new(repo.clone()), config.clone())
            .execute(RegisterInput {
                username: "bob".to_string(),
                email: "bob@example.com".to_string(),
                password: "B0bsSecret!!".to_string(),
            })
            .await
            .unwrap();

        let result = UpdateProfileUseCase::new(Arc::new(repo), config)
            .execute(
                &alice.user_id,
                UpdateProfileInput {
                    email: Some("bob@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AuthError::DuplicateEmail)));
    }
}

// ============================================================================
// Router tests (HTTP surface, middleware included)
// ============================================================================

mod router_tests {
    use super::*;
    use crate::application::config::AuthConfig;
    use crate::application::token::{TokenClaims, TokenIssuer};
    use crate::presentation::router::auth_router_generic;
    use axum::Router;
    use axum::body::Body;
    use axum::extract::ConnectInfo;
    use axum::http::{Request, Response, StatusCode, header};
    use std::net::SocketAddr;
    use tower::ServiceExt;

    const SECRET: [u8; 32] = [42u8; 32];

    fn test_config() -> AuthConfig {
        AuthConfig {
            token_secret: SECRET,
            cookie_secure: false,
            ..AuthConfig::default()
        }
    }

    fn app() -> (Router, MemRepo) {
        let repo = MemRepo::default();
        let router = auth_router_generic(repo.clone(), test_config());
        (router, repo)
    }

    fn request(method: &str, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
        let addr: SocketAddr = "127.0.0.1:4000".parse().unwrap();
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .extension(ConnectInfo(addr));

        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&json).unwrap())
            }
            None => Body::empty(),
        };

        builder.body(body).unwrap()
    }

    fn set_cookie(response: &Response<Body>) -> String {
        response
            .headers()
            .get(header::SET_COOKIE)
            .expect("Set-Cookie header")
            .to_str()
            .unwrap()
            .to_string()
    }

    /// The `name=value` pair from a Set-Cookie header
    fn cookie_pair(set_cookie: &str) -> String {
        set_cookie.split(';').next().unwrap().to_string()
    }

    async fn register_alice(router: &Router) -> String {
        let response = router
            .clone()
            .oneshot(request(
                "POST",
                "/register",
                Some(serde_json::json!({
                    "username": "alice",
                    "email": "alice@example.com",
                    "password": "Sup3rSecret!"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        set_cookie(&response)
    }

    fn with_cookie(mut req: Request<Body>, cookie_pair: &str) -> Request<Body> {
        req.headers_mut()
            .insert(header::COOKIE, cookie_pair.parse().unwrap());
        req
    }

    #[tokio::test]
    async fn register_sets_http_only_auth_cookie() {
        let (router, _) = app();
        let cookie = register_alice(&router).await;

        assert!(cookie.starts_with("authToken="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Max-Age=3600"));
    }

    #[tokio::test]
    async fn me_without_cookie_is_forbidden() {
        let (router, _) = app();
        register_alice(&router).await;

        let response = router.oneshot(request("GET", "/me", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn me_with_valid_cookie_succeeds() {
        let (router, _) = app();
        let cookie = register_alice(&router).await;

        let response = router
            .oneshot(with_cookie(request("GET", "/me", None), &cookie_pair(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn tampered_token_is_unauthorized() {
        let (router, _) = app();
        let cookie = register_alice(&router).await;

        let pair = cookie_pair(&cookie);
        let truncated = &pair[..pair.len() - 6];

        let response = router
            .oneshot(with_cookie(request("GET", "/me", None), truncated))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn expired_token_is_unauthorized() {
        let (router, repo) = app();
        register_alice(&router).await;
        let user = repo.users.lock().unwrap()[0].clone();

        let claims = TokenClaims {
            sub: *user.user_id.as_uuid(),
            ver: 0,
            iat: Utc::now().timestamp_millis() - 10_000,
            exp: Utc::now().timestamp_millis() - 1_000,
        };
        let token = TokenIssuer::new(&SECRET).encode(&claims);

        let response = router
            .oneshot(with_cookie(
                request("GET", "/me", None),
                &format!("authToken={token}"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn token_for_unknown_user_is_unauthorized() {
        let (router, _) = app();
        register_alice(&router).await;

        let claims = TokenClaims {
            sub: uuid::Uuid::new_v4(),
            ver: 0,
            iat: Utc::now().timestamp_millis(),
            exp: Utc::now().timestamp_millis() + 60_000,
        };
        let token = TokenIssuer::new(&SECRET).encode(&claims);

        let response = router
            .oneshot(with_cookie(
                request("GET", "/me", None),
                &format!("authToken={token}"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn password_update_stales_the_old_token() {
        let (router, _) = app();
        let cookie = register_alice(&router).await;
        let old_pair = cookie_pair(&cookie);

        let response = router
            .clone()
            .oneshot(with_cookie(
                request(
                    "PUT",
                    "/update",
                    Some(serde_json::json!({ "password": "N3wSecret!!" })),
                ),
                &old_pair,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // The response hands out a replacement cookie at the extended TTL
        let new_cookie = set_cookie(&response);
        assert!(new_cookie.contains("Max-Age=7200"));

        // Old token now fails the version cross-check
        let response = router
            .clone()
            .oneshot(with_cookie(request("GET", "/me", None), &old_pair))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // New token passes
        let response = router
            .oneshot(with_cookie(
                request("GET", "/me", None),
                &cookie_pair(&new_cookie),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn username_update_keeps_the_cookie_valid() {
        let (router, _) = app();
        let cookie = register_alice(&router).await;
        let pair = cookie_pair(&cookie);

        let response = router
            .clone()
            .oneshot(with_cookie(
                request(
                    "PUT",
                    "/update",
                    Some(serde_json::json!({ "username": "alicia" })),
                ),
                &pair,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        // No replacement cookie when nothing rotated
        assert!(response.headers().get(header::SET_COOKIE).is_none());

        let response = router
            .oneshot(with_cookie(request("GET", "/me", None), &pair))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn login_with_invalid_credentials_is_forbidden() {
        let (router, _) = app();
        register_alice(&router).await;

        let response = router
            .oneshot(request(
                "POST",
                "/login",
                Some(serde_json::json!({
                    "email": "alice@example.com",
                    "password": "Wr0ngSecret!"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn login_sets_cookie_at_current_version() {
        let (router, _) = app();
        register_alice(&router).await;

        let response = router
            .clone()
            .oneshot(request(
                "POST",
                "/login",
                Some(serde_json::json!({
                    "email": "alice@example.com",
                    "password": "Sup3rSecret!"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let cookie = set_cookie(&response);
        let response = router
            .oneshot(with_cookie(request("GET", "/me", None), &cookie_pair(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn logout_clears_the_cookie() {
        let (router, _) = app();

        let response = router
            .oneshot(request("DELETE", "/logout", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let cookie = set_cookie(&response);
        assert!(cookie.starts_with("authToken="));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
    }

    #[tokio::test]
    async fn validation_failure_lists_every_field() {
        let (router, _) = app();

        let response = router
            .oneshot(request(
                "POST",
                "/register",
                Some(serde_json::json!({
                    "username": "ab",
                    "email": "nope",
                    "password": "weak"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
