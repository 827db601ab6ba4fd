use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use hf_hub::api::sync::{ApiBuilder, ApiRepo};
use hf_hub::{Repo, RepoType};

use crate::application::ports::ModelLoadError;

/// Opens a model repository whose files are cached under `cache_dir`.
pub fn open_repo(cache_dir: &Path, model_id: &str) -> Result<ApiRepo, ModelLoadError> {
    std::fs::create_dir_all(cache_dir)
        .map_err(|e| ModelLoadError::DownloadFailed(format!("cache dir: {}", e)))?;

    let api = ApiBuilder::new()
        .with_cache_dir(cache_dir.to_path_buf())
        .build()
        .map_err(|e| ModelLoadError::DownloadFailed(e.to_string()))?;

    Ok(api.repo(Repo::new(model_id.to_string(), RepoType::Model)))
}

pub fn fetch(repo: &ApiRepo, file: &str) -> Result<PathBuf, ModelLoadError> {
    repo.get(file)
        .map_err(|e| ModelLoadError::DownloadFailed(format!("{}: {}", file, e)))
}

pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ModelLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        ModelLoadError::InvalidConfig(format!("read {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&contents)
        .map_err(|e| ModelLoadError::InvalidConfig(format!("parse {}: {}", path.display(), e)))
}

/// Single `model.safetensors`, or every shard named by the index file.
pub fn safetensors_paths(repo: &ApiRepo) -> Result<Vec<PathBuf>, ModelLoadError> {
    if let Ok(path) = repo.get("model.safetensors") {
        return Ok(vec![path]);
    }

    tracing::info!("model.safetensors not found, trying sharded layout via index.json");

    let index_path = fetch(repo, "model.safetensors.index.json")?;
    let index = std::fs::read_to_string(&index_path)
        .map_err(|e| ModelLoadError::InvalidConfig(format!("read index.json: {}", e)))?;
    let shard_names = parse_shard_names(&index)?;

    tracing::info!(shard_count = shard_names.len(), "Downloading weight shards");

    shard_names.iter().map(|name| fetch(repo, name)).collect()
}

pub fn parse_shard_names(index_json: &str) -> Result<Vec<String>, ModelLoadError> {
    let index: serde_json::Value = serde_json::from_str(index_json)
        .map_err(|e| ModelLoadError::InvalidConfig(format!("parse index.json: {}", e)))?;

    let weight_map = index
        .get("weight_map")
        .and_then(|v| v.as_object())
        .ok_or_else(|| {
            ModelLoadError::InvalidConfig("index.json missing weight_map object".to_string())
        })?;

    let names: BTreeSet<String> = weight_map
        .values()
        .filter_map(|v| v.as_str())
        .map(str::to_owned)
        .collect();

    if names.is_empty() {
        return Err(ModelLoadError::InvalidConfig(
            "index.json weight_map contains no shard filenames".to_string(),
        ));
    }

    Ok(names.into_iter().collect())
}
