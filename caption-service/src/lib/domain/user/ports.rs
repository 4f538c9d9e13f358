use async_trait::async_trait;

use crate::domain::user::errors::AuthError;
use crate::domain::user::errors::AuthorizationError;
use crate::domain::user::models::AuthSession;
use crate::domain::user::models::Credentials;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for the authentication gateway.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account and log it in.
    ///
    /// # Returns
    /// Bearer token plus the created user
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Directory operation failed
    async fn register(&self, credentials: Credentials) -> Result<AuthSession, AuthError>;

    /// Verify credentials and issue a token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password,
    ///   deliberately indistinguishable
    /// * `DatabaseError` - Directory operation failed
    async fn login(&self, credentials: Credentials) -> Result<AuthSession, AuthError>;

    /// Resolve an `Authorization` header to a live user.
    ///
    /// The gate every protected endpoint goes through before its own
    /// logic runs.
    ///
    /// # Arguments
    /// * `header` - Raw `Authorization` header value, if present
    ///
    /// # Errors
    /// * `MissingHeader` - No header supplied
    /// * `MalformedHeader` - Not exactly `Bearer <token>`
    /// * `InvalidToken` - Signature, structure, or expiry check failed
    /// * `UserNotFound` - Token subject no longer exists
    /// * `DatabaseError` - Directory lookup failed
    async fn resolve_bearer(&self, header: Option<&str>) -> Result<User, AuthorizationError>;
}

/// Persistence operations for the user directory.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user; the directory assigns id and created_at.
    ///
    /// The unique constraint on email is enforced atomically by storage,
    /// which makes it authoritative under concurrent registration.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, new_user: NewUser) -> Result<User, AuthError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, AuthError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AuthError>;
}
