use thiserror::Error;

/// Error for login and identity resolution.
///
/// Every credential or token failure collapses into `Unauthenticated` so that
/// callers cannot tell a wrong password from an unknown account or a bad token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Could not validate credentials")]
    Unauthenticated,

    #[error("Token issuing failed: {0}")]
    TokenIssueFailed(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
