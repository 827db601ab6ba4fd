use std::sync::Arc;

use crate::application::ports::{AudioStore, CityDataSource};
use crate::application::services::{ModelRegistry, QueryService};

#[derive(Clone)]
pub struct AppState {
    pub query_service: Arc<QueryService>,
    pub registry: Arc<ModelRegistry>,
    pub audio_store: Arc<dyn AudioStore>,
    pub city_data: Arc<dyn CityDataSource>,
    pub max_upload_bytes: usize,
}
