//! Session tokens.
//!
//! Every successful register, login or refresh issues a [`TokenPair`]. The
//! access half is an HS256 JWT carrying [`Claims`]; handlers never look the
//! caller up in the database. The refresh half is opaque: the client keeps the
//! plaintext and `user_sessions.refresh_token_hash` keeps its SHA-256 digest,
//! so a refresh is a digest lookup followed by revoking that session row and
//! issuing a new pair.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use storefront_core::types::{DbId, Timestamp};
use uuid::Uuid;

use crate::config::JwtConfig;

pub type TokenResult<T> = Result<T, jsonwebtoken::errors::Error>;

/// Payload of an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: DbId,
    /// Sessions are filed under the phone, so logout can revoke by it
    /// without a user lookup.
    pub phone: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: Uuid,
}

impl Claims {
    /// Claims for `user_id` issued at `now`, valid for the configured access TTL.
    pub fn new(user_id: DbId, phone: &str, role: &str, now: Timestamp, config: &JwtConfig) -> Self {
        Self {
            sub: user_id,
            phone: phone.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + config.access_ttl).timestamp(),
            jti: Uuid::new_v4(),
        }
    }
}

/// What a client receives after authenticating, plus the digest to persist.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub refresh_token: String,
    pub refresh_token_hash: String,
    pub refresh_expires_at: Timestamp,
}

/// Issue a fresh access/refresh pair for a user.
pub fn issue(user_id: DbId, phone: &str, role: &str, config: &JwtConfig) -> TokenResult<TokenPair> {
    let now = Utc::now();
    let access_token = encode_access(&Claims::new(user_id, phone, role, now, config), config)?;
    let refresh_token = Uuid::new_v4().simple().to_string();

    Ok(TokenPair {
        access_token,
        expires_in: config.access_ttl.num_seconds(),
        refresh_token_hash: refresh_digest(&refresh_token),
        refresh_token,
        refresh_expires_at: now + config.refresh_ttl,
    })
}

pub fn encode_access(claims: &Claims, config: &JwtConfig) -> TokenResult<String> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature and expiry. No leeway: an expired token is expired.
pub fn decode_access(token: &str, config: &JwtConfig) -> TokenResult<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
}

/// Hex SHA-256 of a refresh token, as stored on the session row.
pub fn refresh_digest(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
