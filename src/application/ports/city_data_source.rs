use async_trait::async_trait;

use crate::domain::CityPoint;

#[async_trait]
pub trait CityDataSource: Send + Sync {
    async fn fetch_points(&self) -> Result<Vec<CityPoint>, CityDataError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CityDataError {
    #[error("upstream data source unreachable: {0}")]
    Unavailable(String),
    #[error("upstream data could not be processed: {0}")]
    Malformed(String),
}
