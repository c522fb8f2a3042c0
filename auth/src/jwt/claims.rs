use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Claims carried by an access token.
///
/// `sub` identifies the authenticated principal; `exp` and `iat` are Unix
/// timestamps in seconds (RFC 7519).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (principal identifier)
    pub sub: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Create claims for a subject expiring `ttl` from now.
    ///
    /// A negative `ttl` produces claims that are already expired.
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiration falls outside the representable range
    pub fn for_subject(subject: impl ToString, ttl: Duration) -> Result<Self, JwtError> {
        let now = Utc::now();
        let expiration = now.checked_add_signed(ttl).ok_or_else(|| {
            JwtError::EncodingFailed(format!("token lifetime {} is out of range", ttl))
        })?;

        Ok(Self {
            sub: subject.to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
        })
    }

    /// Expiration as a UTC timestamp.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}

/// Wire form used while decoding, so that an absent subject can be told apart
/// from a structurally broken token.
#[derive(Debug, Deserialize)]
pub(crate) struct RawClaims {
    #[serde(default)]
    pub sub: Option<String>,
    pub exp: i64,
    #[serde(default)]
    pub iat: i64,
}
