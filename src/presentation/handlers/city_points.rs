use axum::Json;
use axum::extract::State;

use crate::domain::CityPoint;
use crate::presentation::error::ApiError;
use crate::presentation::state::AppState;

#[tracing::instrument(skip(state))]
pub async fn city_points_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<CityPoint>>, ApiError> {
    let points = state.city_data.fetch_points().await.map_err(|e| {
        tracing::warn!(error = %e, "City data request failed");
        ApiError::from(e)
    })?;

    Ok(Json(points))
}
