use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for registration and login.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Email already registered: {0}")]
    EmailAlreadyExists(String),

    /// Unknown email and wrong password both land here; callers must not
    /// be able to tell the two apart.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError::Unknown(err.to_string())
    }
}

/// Failure during bearer-identity resolution.
///
/// Every variant maps to the same external 401; the variant itself is
/// for logging only.
#[derive(Debug, Clone, Error)]
pub enum AuthorizationError {
    #[error("Missing authorization header")]
    MissingHeader,

    #[error("Invalid auth header")]
    MalformedHeader,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] auth::TokenError),

    /// Token verified but its subject no longer exists (e.g. the account
    /// was deleted after issuance).
    #[error("User not found for token subject {0}")]
    UserNotFound(i64),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
