use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Serialize;

use super::claims::Claims;
use super::claims::RawClaims;
use super::errors::JwtError;

/// JWT token handler for issuing and verifying access tokens.
///
/// Signs with HS256 (HMAC with SHA-256) under a single secret fixed at
/// construction. The handler is immutable and safe to share across tasks.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a signed token for `subject` that expires `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed or `ttl` is out of range
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<String, JwtError> {
        self.encode(&Claims::for_subject(subject, ttl)?)
    }

    /// Encode arbitrary claims into a signed token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and extract its claims.
    ///
    /// The signature is checked before expiry, and expiry is enforced with
    /// zero leeway.
    ///
    /// # Errors
    /// * `MalformedToken` - Token structure or payload cannot be parsed, or `exp` is absent
    /// * `InvalidSignature` - Signature does not match the secret or algorithm
    /// * `Expired` - Current time is past `exp`
    /// * `MissingSubject` - Token is valid but carries no `sub`
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let token_data =
            decode::<RawClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::Expired,
                    ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                        JwtError::InvalidSignature
                    }
                    _ => JwtError::MalformedToken(e.to_string()),
                }
            })?;

        let RawClaims { sub, exp, iat } = token_data.claims;
        let sub = sub
            .filter(|s| !s.is_empty())
            .ok_or(JwtError::MissingSubject)?;

        Ok(Claims { sub, exp, iat })
    }
}
