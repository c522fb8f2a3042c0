use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AccessToken;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

/// Login and per-request identity resolution.
///
/// Tokens are stateless: a token is accepted while its signature holds and
/// it has not expired, and it names its user by email.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn find_user(&self, email: &EmailAddress) -> Result<Option<User>, AuthError> {
        self.repository
            .find_by_email(email)
            .await
            .map_err(|e: UserError| AuthError::DatabaseError(e.to_string()))
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<AccessToken, AuthError> {
        let Some(user) = self.find_user(&command.email).await? else {
            self.authenticator.reject_unknown(&command.password);
            tracing::debug!("Login rejected: no matching account");
            return Err(AuthError::Unauthenticated);
        };

        let result = self
            .authenticator
            .authenticate(&command.password, &user.password_hash, user.email.as_str())
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::debug!(user_id = %user.id, "Login rejected: password mismatch");
                    AuthError::Unauthenticated
                }
                AuthenticationError::PasswordError(err) => {
                    tracing::warn!(
                        user_id = %user.id,
                        error = %err,
                        "Login rejected: stored password hash is unusable"
                    );
                    AuthError::Unauthenticated
                }
                AuthenticationError::JwtError(err) => AuthError::TokenIssueFailed(err.to_string()),
            })?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(AccessToken::bearer(result.access_token, result.expires_at))
    }

    async fn resolve_identity(&self, token: &str) -> Result<User, AuthError> {
        let claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::debug!(reason = %e, "Bearer token rejected");
            AuthError::Unauthenticated
        })?;

        let email = EmailAddress::new(claims.sub).map_err(|_| {
            tracing::debug!("Bearer token rejected: subject is not an email");
            AuthError::Unauthenticated
        })?;

        self.find_user(&email).await?.ok_or_else(|| {
            tracing::debug!("Bearer token rejected: subject has no account");
            AuthError::Unauthenticated
        })
    }
}
