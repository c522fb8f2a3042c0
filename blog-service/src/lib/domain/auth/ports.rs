use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AccessToken;
use crate::domain::auth::models::LoginCommand;
use crate::domain::user::models::User;

/// Port for authentication operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Exchange email and password for a bearer token.
    ///
    /// # Arguments
    /// * `command` - Email and plaintext password
    ///
    /// # Returns
    /// Signed access token whose subject is the user's email
    ///
    /// # Errors
    /// * `Unauthenticated` - Unknown email, wrong password or unusable stored hash
    /// * `TokenIssueFailed` - Token could not be signed
    /// * `DatabaseError` - User lookup failed
    async fn login(&self, command: LoginCommand) -> Result<AccessToken, AuthError>;

    /// Resolve the user a bearer token was issued to.
    ///
    /// # Arguments
    /// * `token` - Raw token taken from the `Authorization` header
    ///
    /// # Returns
    /// The stored user matching the token's subject
    ///
    /// # Errors
    /// * `Unauthenticated` - Token is malformed, tampered, expired, lacks a
    ///   subject, or its subject no longer exists
    /// * `DatabaseError` - User lookup failed
    async fn resolve_identity(&self, token: &str) -> Result<User, AuthError>;
}
