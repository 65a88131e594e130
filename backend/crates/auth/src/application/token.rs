//! Session Token
//!
//! Self-contained HMAC-signed tokens. Nothing is persisted server-side;
//! validity is the signature, the expiry, and (at the middleware layer)
//! the token-version cross-check against the stored user.
//!
//! Wire form: `base64url(claims-json) "." base64url(hmac-sha256)`.
//! The signature is verified BEFORE expiry, so a forged token can never
//! read as merely "expired".

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::value_object::{token_version::TokenVersion, user_id::UserId};

type HmacSha256 = Hmac<Sha256>;

/// Token verification failure
///
/// Mutually exclusive: a token that fails the structural/signature
/// check is `Malformed` even when its embedded expiry has also passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Not parseable, or the signature does not verify
    #[error("Token is malformed or has an invalid signature")]
    Malformed,

    /// Signature is valid but the token has expired
    #[error("Token has expired")]
    Expired,
}

/// Claims carried inside a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: user id
    pub sub: Uuid,
    /// Token version the user had when this token was minted
    pub ver: i32,
    /// Issued-at, unix millis
    pub iat: i64,
    /// Expiry, unix millis
    pub exp: i64,
}

impl TokenClaims {
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.sub)
    }

    pub fn token_version(&self) -> TokenVersion {
        TokenVersion::from_value(self.ver)
    }
}

/// Issues and verifies session tokens with a process-wide secret
pub struct TokenIssuer<'a> {
    secret: &'a [u8; 32],
}

impl<'a> TokenIssuer<'a> {
    pub fn new(secret: &'a [u8; 32]) -> Self {
        Self { secret }
    }

    /// Mint a token for a user at the given version
    pub fn issue(&self, user_id: &UserId, version: TokenVersion, ttl: Duration) -> String {
        let now_ms = Utc::now().timestamp_millis();
        let claims = TokenClaims {
            sub: *user_id.as_uuid(),
            ver: version.value(),
            iat: now_ms,
            exp: now_ms + ttl.as_millis() as i64,
        };
        self.encode(&claims)
    }

    /// Verify a token and return its claims
    ///
    /// Order matters: constant-time signature check first, expiry
    /// second. A stale version is not this layer's business.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let (claims_b64, sig_b64) = token.split_once('.').ok_or(TokenError::Malformed)?;

        let claims_bytes = URL_SAFE_NO_PAD
            .decode(claims_b64)
            .map_err(|_| TokenError::Malformed)?;
        let signature = URL_SAFE_NO_PAD
            .decode(sig_b64)
            .map_err(|_| TokenError::Malformed)?;

        let mut mac = self.mac();
        mac.update(&claims_bytes);
        // verify_slice is constant-time
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::Malformed)?;

        let claims: TokenClaims =
            serde_json::from_slice(&claims_bytes).map_err(|_| TokenError::Malformed)?;

        if Utc::now().timestamp_millis() >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// Encode claims into the wire form (signing included)
    pub(crate) fn encode(&self, claims: &TokenClaims) -> String {
        let claims_json = serde_json::to_vec(claims).expect("claims serialize to JSON");

        let mut mac = self.mac();
        mac.update(&claims_json);
        let signature = mac.finalize().into_bytes();

        format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(&claims_json),
            URL_SAFE_NO_PAD.encode(signature)
        )
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(self.secret).expect("HMAC accepts any key size")
    }
}
