//! Session token claims.
//!
//! Tokens are compact JWS strings issued by the backend at login. The client
//! holds no verification key, so decoding checks structure only and the
//! claims are trusted on parse.

use jsonwebtoken::dangerous::insecure_decode;
use jsonwebtoken::errors::ErrorKind;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::debug;

/// Claims carried by a session token.
///
/// Only `exp` and `role` take part in access decisions. The informational
/// claims read as `None` when the backend sends them with an unexpected type.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(rename = "userId", default, deserialize_with = "lenient")]
    pub user_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub email: Option<String>,
    pub role: Option<String>,
    #[serde(deserialize_with = "whole_seconds")]
    pub exp: i64, // Expiration time (UNIX timestamp, seconds)
    #[serde(default, deserialize_with = "lenient")]
    pub iat: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub iss: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sub: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub aud: Option<Audience>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Accepts integral and fractional timestamps; fractions are floored.
#[allow(clippy::cast_possible_truncation)]
fn whole_seconds<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(secs) = number.as_i64() {
        return Ok(secs);
    }
    match number.as_f64() {
        Some(secs) if secs.is_finite() => Ok(secs.floor() as i64),
        _ => Err(de::Error::custom(format!("exp {number} is not a timestamp"))),
    }
}

/// The `aud` claim, which may be a single value or a list.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Many(Vec<String>),
}

/// Why a token string could not be read as claims.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Wrong number of segments or an unreadable header.
    #[error("malformed token: {0}")]
    Malformed(String),

    /// A segment is not valid base64url.
    #[error("invalid token encoding: {0}")]
    Encoding(String),

    /// The payload is not a JSON object of the expected shape.
    #[error("invalid token payload: {0}")]
    Payload(String),

    #[error("token decode failed: {0}")]
    Other(String),
}

impl From<jsonwebtoken::errors::Error> for DecodeError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        let message = err.to_string();
        match err.kind() {
            ErrorKind::InvalidToken
            | ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName => Self::Malformed(message),
            ErrorKind::Base64(_) => Self::Encoding(message),
            ErrorKind::Json(_) => Self::Payload(message),
            _ => Self::Other(message),
        }
    }
}

/// Parse a token string into its claims without verifying the signature.
///
/// The header's `alg` is not consulted and no registered claim is validated;
/// expiry is judged by [`is_expired_at`] alone.
pub fn decode_claims(token: &str) -> Result<TokenClaims, DecodeError> {
    let data = insecure_decode::<TokenClaims>(token)?;
    Ok(data.claims)
}

/// Current wall-clock time in seconds since the epoch.
pub fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Whether the token is expired at the current wall-clock time.
///
/// A token that does not decode counts as expired.
pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, now_secs())
}

/// Whether the token is expired at `now` (seconds since the epoch).
pub fn is_expired_at(token: &str, now: i64) -> bool {
    match decode_claims(token) {
        Ok(claims) => claims.exp < now,
        Err(err) => {
            debug!(name: "session.token.undecodable", error = %err, "Treating undecodable token as expired");
            true
        }
    }
}
