use thiserror::Error;

/// Error for captioning-upstream operations.
#[derive(Debug, Clone, Error)]
pub enum CaptionError {
    /// The upstream inference API answered with a non-success status.
    #[error("Captioning upstream error: {status} - {body}")]
    Upstream { status: u16, body: String },

    /// The request never completed (connect failure, timeout, bad body).
    #[error("Captioning request failed: {0}")]
    Request(String),
}
