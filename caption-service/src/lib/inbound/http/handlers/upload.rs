use axum::extract::Multipart;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

/// Largest accepted image payload.
pub const MAX_IMAGE_BYTES: usize = 8 * 1024 * 1024;

pub async fn upload(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> Result<ApiSuccess<UploadResponseData>, ApiError> {
    let image = read_file_field(&mut multipart).await?;

    if image.len() > MAX_IMAGE_BYTES {
        return Err(ApiError::BadRequest(
            "File too large (8MB limit)".to_string(),
        ));
    }

    tracing::debug!(
        user_id = %current.user.id,
        bytes = image.len(),
        "Forwarding image to captioning upstream"
    );

    let caption = state.captioner.caption(image).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        UploadResponseData {
            success: true,
            caption,
        },
    ))
}

/// Pull the `file` part out of the multipart body.
async fn read_file_field(multipart: &mut Multipart) -> Result<Vec<u8>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() == Some("file") {
            return field
                .bytes()
                .await
                .map(|bytes| bytes.to_vec())
                .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)));
        }
    }

    Err(ApiError::BadRequest("Missing 'file' field".to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadResponseData {
    pub success: bool,
    pub caption: String,
}
