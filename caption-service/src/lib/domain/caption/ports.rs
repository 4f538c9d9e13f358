use async_trait::async_trait;

use crate::domain::caption::errors::CaptionError;

/// Port for the external image-captioning collaborator.
///
/// Takes raw image bytes, returns a single normalized caption string.
/// Retry and rate-limit policy belong to the upstream, not to this
/// service.
#[async_trait]
pub trait Captioner: Send + Sync + 'static {
    /// Caption an image.
    ///
    /// # Errors
    /// * `Upstream` - Inference API answered with a non-success status
    /// * `Request` - The call itself failed
    async fn caption(&self, image: Vec<u8>) -> Result<String, CaptionError>;
}
