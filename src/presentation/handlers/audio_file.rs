use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;

use crate::application::ports::AudioStoreError;
use crate::domain::AudioFileName;
use crate::presentation::error::{AUDIO_NOT_FOUND_DETAIL, ApiError};
use crate::presentation::state::AppState;

pub const WAV_CONTENT_TYPE: &str = "audio/wav";

#[tracing::instrument(skip(state))]
pub async fn audio_file_handler(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let name = AudioFileName::parse(&file_name).map_err(|e| {
        tracing::warn!(error = %e, "Rejected audio file name");
        ApiError::NotFound(AUDIO_NOT_FOUND_DETAIL.to_string())
    })?;

    let audio = state.audio_store.fetch(&name).await.map_err(|e| match e {
        AudioStoreError::NotFound(_) => ApiError::NotFound(AUDIO_NOT_FOUND_DETAIL.to_string()),
        other => {
            tracing::error!(error = %other, "Failed to read audio file");
            ApiError::Internal(other.to_string())
        }
    })?;

    Ok(([(header::CONTENT_TYPE, WAV_CONTENT_TYPE)], audio))
}
