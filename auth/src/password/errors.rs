use thiserror::Error;

/// Error type for password hashing.
///
/// Verification has no error type: a hash that cannot be parsed or does
/// not match simply fails verification.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid Argon2 parameters: {0}")]
    InvalidParams(String),
}
