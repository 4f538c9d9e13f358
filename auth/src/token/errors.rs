use thiserror::Error;

/// Error type for token operations.
///
/// Decode failures keep their cause as distinct variants so the service
/// can log what actually went wrong, even though every decode failure is
/// collapsed to the same external 401.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token signature does not match")]
    SignatureMismatch,

    #[error("Token algorithm does not match the expected algorithm")]
    AlgorithmMismatch,

    #[error("Token is malformed: {0}")]
    Malformed(String),
}
