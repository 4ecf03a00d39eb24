//! Session tokens.
//!
//! An access token is an HS256 JWT issued by `leadtrack` that carries a
//! [`Session`]: the profile id and the role held at sign-in. Verification
//! rejects tokens whose role is not one this service knows, so an extractor
//! never hands a handler a role the policy functions cannot reason about.
//!
//! A refresh token is an opaque UUID; only its SHA-256 hex digest is stored.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use leadtrack_core::roles::validate_role;
use leadtrack_core::session::Session;
use leadtrack_core::types::{Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// `iss` claim of every token this service issues.
pub const ISSUER: &str = "leadtrack";

/// Payload of an access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: UserId,
    pub role: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: Uuid,
}

impl Claims {
    fn for_session(session: &Session, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: session.user_id,
            role: session.role.clone(),
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Uuid::new_v4(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token rejected: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("token carries unknown role '{0}'")]
    UnknownRole(String),
}

/// Signing secret and token lifetimes.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// Reads `JWT_SECRET` (required, non-empty), `JWT_ACCESS_EXPIRY_MINS`
    /// (default 15) and `JWT_REFRESH_EXPIRY_DAYS` (default 7).
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .expect("JWT_SECRET must be set to a non-empty value");

        Self {
            secret,
            access_token_expiry_mins: env_i64("JWT_ACCESS_EXPIRY_MINS", 15),
            refresh_token_expiry_days: env_i64("JWT_REFRESH_EXPIRY_DAYS", 7),
        }
    }

    pub fn access_ttl(&self) -> Duration {
        Duration::minutes(self.access_token_expiry_mins)
    }

    pub fn refresh_ttl(&self) -> Duration {
        Duration::days(self.refresh_token_expiry_days)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation
    }
}

fn env_i64(key: &str, default: i64) -> i64 {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{key} must be a whole number")),
        Err(_) => default,
    }
}

/// Sign an access token for `session`.
pub fn issue_access_token(session: &Session, config: &JwtConfig) -> Result<String, TokenError> {
    let claims = Claims::for_session(session, config.access_ttl());
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;
    Ok(token)
}

/// Check signature, issuer, and expiry, then rebuild the caller's session.
pub fn verify_access_token(token: &str, config: &JwtConfig) -> Result<Session, TokenError> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &config.validation(),
    )?
    .claims;

    if validate_role(&claims.role).is_err() {
        return Err(TokenError::UnknownRole(claims.role));
    }
    Ok(Session::new(claims.sub, claims.role))
}

/// A freshly issued refresh token and what gets persisted for it.
#[derive(Debug)]
pub struct RefreshToken {
    /// Returned to the client once, never stored.
    pub plaintext: String,
    pub hash: String,
    pub expires_at: Timestamp,
}

impl RefreshToken {
    pub fn issue(config: &JwtConfig) -> Self {
        let plaintext = Uuid::new_v4().to_string();
        Self {
            hash: hash_refresh_token(&plaintext),
            plaintext,
            expires_at: Utc::now() + config.refresh_ttl(),
        }
    }
}

/// SHA-256 hex digest of a refresh token.
pub fn hash_refresh_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
