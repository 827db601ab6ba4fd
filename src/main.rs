use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use safepath::application::ports::{AudioStore, CityDataSource, ModelProvider};
use safepath::application::services::{ModelRegistry, QueryOptions, QueryService};
use safepath::infrastructure::city_data::IbbOpenDataClient;
use safepath::infrastructure::location::StaticLocationDirectory;
use safepath::infrastructure::models::ConfiguredModelProvider;
use safepath::infrastructure::observability::init_tracing;
use safepath::infrastructure::storage::LocalAudioStore;
use safepath::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("failed to load configuration")?;

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server address")?;

    init_tracing(&settings.tracing_config(environment), addr);

    let provider: Arc<dyn ModelProvider> = Arc::new(ConfiguredModelProvider::new(
        settings.models.clone(),
        settings.providers.clone(),
    ));
    let registry = Arc::new(ModelRegistry::new(settings.models.clone(), provider));

    registry
        .initialize_core()
        .await
        .context("failed to load speech-to-text and entity recognition models")?;

    let audio_store: Arc<dyn AudioStore> = Arc::new(
        LocalAudioStore::new(settings.storage.temp_dir.clone())
            .context("failed to prepare audio directory")?,
    );

    let city_data: Arc<dyn CityDataSource> = Arc::new(
        IbbOpenDataClient::new(settings.city_data.url.clone(), settings.city_data.timeout())
            .context("failed to build city data client")?,
    );

    let query_service = Arc::new(QueryService::new(
        Arc::clone(&registry),
        Arc::new(StaticLocationDirectory::istanbul()),
        Arc::clone(&audio_store),
        QueryOptions {
            decoding: settings.generation.decoding_options(),
            max_new_tokens: settings.generation.max_new_tokens,
            ..QueryOptions::default()
        },
    ));

    let state = AppState {
        query_service,
        registry,
        audio_store,
        city_data,
        max_upload_bytes: settings.server.max_upload_bytes(),
    };

    let router = create_router(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
