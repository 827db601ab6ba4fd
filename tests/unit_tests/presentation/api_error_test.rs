use axum::http::StatusCode;

use safepath::application::ports::CityDataError;
use safepath::application::services::{MalformedModelOutput, QueryError};
use safepath::domain::QueryStage;
use safepath::presentation::ApiError;

#[test]
fn given_query_errors_when_mapped_then_status_codes_follow_contract() {
    let cases = [
        (QueryError::ModelsNotReady, StatusCode::SERVICE_UNAVAILABLE),
        (QueryError::NoSpeechDetected, StatusCode::BAD_REQUEST),
        (
            QueryError::MalformedModelOutput(MalformedModelOutput::EmptySpan),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
        (
            QueryError::Internal {
                stage: QueryStage::Synthesizing,
                message: "boom".to_string(),
            },
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (error, expected) in cases {
        assert_eq!(ApiError::from(error).status(), expected);
    }
}

#[test]
fn given_internal_error_when_mapped_then_detail_hides_message() {
    let error = ApiError::from(QueryError::Internal {
        stage: QueryStage::Generating,
        message: "CUDA out of memory".to_string(),
    });

    assert!(!error.detail().contains("CUDA"));
}

#[test]
fn given_city_data_errors_when_mapped_then_gateway_or_internal() {
    let unavailable = ApiError::from(CityDataError::Unavailable("timeout".to_string()));
    let malformed = ApiError::from(CityDataError::Malformed("eof".to_string()));

    assert_eq!(unavailable.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(unavailable.detail(), "Harici veri kaynağına ulaşılamadı: timeout");
    assert_eq!(malformed.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(malformed.detail(), "Veri işlenirken bir hata oluştu: eof");
}
