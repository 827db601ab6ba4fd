mod audio_file;
mod city_points;
mod health;
mod process_audio_query;

pub use audio_file::{WAV_CONTENT_TYPE, audio_file_handler};
pub use city_points::city_points_handler;
pub use health::{HealthResponse, health_handler};
pub use process_audio_query::{AUDIO_FIELD, process_audio_query_handler};
