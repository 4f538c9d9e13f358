use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenCodec;

use crate::domain::user::errors::AuthError;
use crate::domain::user::errors::AuthorizationError;
use crate::domain::user::models::AuthSession;
use crate::domain::user::models::Credentials;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::UserRepository;

/// Authentication gateway.
///
/// Composes the credential hasher, the token codec, and the user
/// directory into the registration, login, and bearer-resolution flows.
/// Stateless per request; safe to share across tasks.
pub struct AuthService<R>
where
    R: UserRepository,
{
    repository: Arc<R>,
    password_hasher: Arc<PasswordHasher>,
    token_codec: Arc<TokenCodec>,
}

impl<R> AuthService<R>
where
    R: UserRepository,
{
    /// Create a new authentication service with injected dependencies.
    pub fn new(
        repository: Arc<R>,
        password_hasher: Arc<PasswordHasher>,
        token_codec: Arc<TokenCodec>,
    ) -> Self {
        Self {
            repository,
            password_hasher,
            token_codec,
        }
    }

    fn issue_session(&self, user: User) -> Result<AuthSession, AuthError> {
        let token = self
            .token_codec
            .issue_default(user.id.0, user.email.as_str())
            .map_err(|e| AuthError::TokenIssuance(e.to_string()))?;

        Ok(AuthSession { token, user })
    }
}

#[async_trait]
impl<R> AuthServicePort for AuthService<R>
where
    R: UserRepository,
{
    async fn register(&self, credentials: Credentials) -> Result<AuthSession, AuthError> {
        let Credentials { email, password } = credentials;

        // Fast-path conflict check; the unique constraint in the
        // directory is authoritative under concurrent registration.
        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists(email.to_string()));
        }

        // Argon2 is CPU-bound; keep it off the async scheduler
        let hasher = Arc::clone(&self.password_hasher);
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Unknown(format!("Hashing task failed: {}", e)))?
            .map_err(|e| AuthError::Unknown(format!("Password hashing failed: {}", e)))?;

        let user = self
            .repository
            .insert(NewUser {
                email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");

        self.issue_session(user)
    }

    async fn login(&self, credentials: Credentials) -> Result<AuthSession, AuthError> {
        let Credentials { email, password } = credentials;

        // Unknown email and wrong password share one failure so callers
        // cannot probe for account existence
        let Some(user) = self.repository.find_by_email(&email).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        let hasher = Arc::clone(&self.password_hasher);
        let stored_hash = user.password_hash.clone();
        let is_valid = tokio::task::spawn_blocking(move || hasher.verify(&password, &stored_hash))
            .await
            .map_err(|e| AuthError::Unknown(format!("Verification task failed: {}", e)))?;

        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        self.issue_session(user)
    }

    async fn resolve_bearer(&self, header: Option<&str>) -> Result<User, AuthorizationError> {
        let header = header.ok_or(AuthorizationError::MissingHeader)?;

        let parts: Vec<&str> = header.split_whitespace().collect();
        let token = match parts.as_slice() {
            ["Bearer", token] => *token,
            _ => return Err(AuthorizationError::MalformedHeader),
        };

        let claims = self.token_codec.decode(token)?;

        self.repository
            .find_by_id(UserId(claims.sub))
            .await
            .map_err(|e| AuthorizationError::DatabaseError(e.to_string()))?
            .ok_or(AuthorizationError::UserNotFound(claims.sub))
    }
}
