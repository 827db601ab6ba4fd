use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use bytes::Bytes;

use crate::domain::QueryResult;
use crate::infrastructure::observability::sanitize_for_log;
use crate::presentation::error::{ApiError, MISSING_FILE_DETAIL};
use crate::presentation::state::AppState;

pub const AUDIO_FIELD: &str = "file";

#[tracing::instrument(skip(state, multipart))]
pub async fn process_audio_query_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<QueryResult>, ApiError> {
    let mut multipart = multipart.map_err(|e| {
        tracing::warn!(error = %e, "Rejected non-multipart upload");
        ApiError::BadRequest(e.body_text())
    })?;

    let audio = read_audio_field(&mut multipart).await?;
    tracing::debug!(bytes = audio.len(), "Audio upload received");

    let result = state.query_service.process(audio).await?;

    tracing::info!(
        user_input = %sanitize_for_log(&result.user_input),
        "Voice query answered"
    );

    Ok(Json(result))
}

async fn read_audio_field(multipart: &mut Multipart) -> Result<Bytes, ApiError> {
    loop {
        let field = multipart.next_field().await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to read multipart");
            ApiError::BadRequest(format!("Failed to read multipart: {}", e))
        })?;

        let Some(field) = field else {
            tracing::warn!("Audio query request with no file field");
            return Err(ApiError::BadRequest(MISSING_FILE_DETAIL.to_string()));
        };

        if field.name() != Some(AUDIO_FIELD) {
            continue;
        }

        tracing::debug!(
            filename = field.file_name().unwrap_or("unknown"),
            content_type = field.content_type().unwrap_or("application/octet-stream"),
            "Reading audio field"
        );

        return field.bytes().await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to read audio field");
            ApiError::BadRequest(format!("Failed to read file: {}", e))
        });
    }
}
