use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password hash is malformed or unsupported: {0}")]
    InvalidCredentialFormat(String),

    #[error("Invalid hashing parameters: {0}")]
    InvalidParameters(String),
}
