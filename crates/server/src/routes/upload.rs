//! Image upload handler.

use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
};
use tracing::instrument;

use mercado_core::UploadedFile;

use crate::error::{AppError, NO_FILE_MESSAGE, Result};
use crate::state::AppState;

/// Multipart field carrying the image.
pub const UPLOAD_FIELD: &str = "imagen";

/// Store the `imagen` file part and return its public URL.
///
/// Requests that are not multipart, or that carry no `imagen` file part,
/// are answered with 400.
#[instrument(skip_all)]
pub async fn upload(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadedFile>> {
    let Ok(mut multipart) = multipart else {
        return Err(AppError::Upload(NO_FILE_MESSAGE.to_string()));
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let Some(original_name) = field.file_name().map(str::to_owned) else {
            continue;
        };

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let stored = state
            .uploads()
            .save(&original_name, &bytes)
            .await
            .map_err(|e| AppError::Internal(format!("failed to store upload: {e}")))?;

        return Ok(Json(stored));
    }

    Err(AppError::Upload(NO_FILE_MESSAGE.to_string()))
}
