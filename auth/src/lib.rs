//! Credential and token primitives shared by the blog services.
//!
//! [`PasswordHasher`] produces Argon2id PHC strings and checks plaintexts
//! against them. [`JwtHandler`] signs and verifies HS256 access tokens whose
//! subject names a user. [`Authenticator`] ties both together for login.
//!
//! User storage stays with the caller: nothing here knows what a user is.
//!
//! ```
//! use auth::Authenticator;
//! use auth::JwtError;
//! use chrono::Duration;
//!
//! let authenticator =
//!     Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::minutes(30));
//!
//! let stored_hash = authenticator.hash_password("secret123").unwrap();
//! let login = authenticator
//!     .authenticate("secret123", &stored_hash, "alice@example.com")
//!     .unwrap();
//!
//! let claims = authenticator.validate_token(&login.access_token).unwrap();
//! assert_eq!(claims.sub, "alice@example.com");
//!
//! let tampered = format!("{}x", login.access_token);
//! assert!(matches!(
//!     authenticator.validate_token(&tampered),
//!     Err(JwtError::InvalidSignature) | Err(JwtError::MalformedToken(_))
//! ));
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::Argon2Params;
pub use password::PasswordError;
pub use password::PasswordHasher;
