use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::CityDataError;
use crate::application::services::QueryError;

pub const MODELS_NOT_READY_DETAIL: &str = "Modeller henüz yüklenmedi...";
pub const NO_SPEECH_DETAIL: &str = "Konuşma algılanamadı.";
pub const MISSING_FILE_DETAIL: &str = "Ses dosyası yüklenmedi.";
pub const MALFORMED_OUTPUT_DETAIL: &str = "LLM'den geçerli bir yanıt alınamadı.";
pub const INTERNAL_DETAIL: &str = "Sorgu işlenirken bir hata oluştu.";
pub const AUDIO_NOT_FOUND_DETAIL: &str = "Ses dosyası bulunamadı.";

/// Error body shape clients already parse: `{"detail": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    ServiceUnavailable(String),
    BadGateway(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            ApiError::BadRequest(d)
            | ApiError::NotFound(d)
            | ApiError::ServiceUnavailable(d)
            | ApiError::BadGateway(d)
            | ApiError::Internal(d) => d,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            detail: self.detail().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<QueryError> for ApiError {
    fn from(error: QueryError) -> Self {
        match error {
            QueryError::ModelsNotReady => {
                ApiError::ServiceUnavailable(MODELS_NOT_READY_DETAIL.to_string())
            }
            QueryError::NoSpeechDetected => ApiError::BadRequest(NO_SPEECH_DETAIL.to_string()),
            QueryError::MalformedModelOutput(_) => {
                ApiError::Internal(MALFORMED_OUTPUT_DETAIL.to_string())
            }
            QueryError::Internal { stage, message } => {
                tracing::error!(stage = %stage, error = %message, "Voice query failed internally");
                ApiError::Internal(INTERNAL_DETAIL.to_string())
            }
        }
    }
}

impl From<CityDataError> for ApiError {
    fn from(error: CityDataError) -> Self {
        match error {
            CityDataError::Unavailable(e) => {
                ApiError::BadGateway(format!("Harici veri kaynağına ulaşılamadı: {}", e))
            }
            CityDataError::Malformed(e) => {
                ApiError::Internal(format!("Veri işlenirken bir hata oluştu: {}", e))
            }
        }
    }
}
