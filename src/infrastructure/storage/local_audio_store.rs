use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use crate::application::ports::{AudioStore, AudioStoreError};
use crate::domain::AudioFileName;

/// Audio files kept flat in one local directory.
pub struct LocalAudioStore {
    inner: Arc<LocalFileSystem>,
    base_path: PathBuf,
}

impl LocalAudioStore {
    pub fn new(base_path: PathBuf) -> Result<Self, AudioStoreError> {
        std::fs::create_dir_all(&base_path)?;
        let fs = LocalFileSystem::new_with_prefix(&base_path)
            .map_err(|e| AudioStoreError::WriteFailed(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
            base_path,
        })
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }
}

#[async_trait::async_trait]
impl AudioStore for LocalAudioStore {
    async fn store(&self, name: &AudioFileName, data: Bytes) -> Result<u64, AudioStoreError> {
        let store_path = StorePath::from(name.as_str());
        let size = data.len() as u64;

        self.inner
            .put(&store_path, PutPayload::from(data))
            .await
            .map_err(|e| AudioStoreError::WriteFailed(e.to_string()))?;

        tracing::debug!(file = %name, bytes = size, "Audio file stored");
        Ok(size)
    }

    async fn fetch(&self, name: &AudioFileName) -> Result<Bytes, AudioStoreError> {
        let store_path = StorePath::from(name.as_str());
        let result = self.inner.get(&store_path).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => AudioStoreError::NotFound(name.to_string()),
            other => AudioStoreError::ReadFailed(other.to_string()),
        })?;

        result
            .bytes()
            .await
            .map_err(|e| AudioStoreError::ReadFailed(e.to_string()))
    }

    async fn delete(&self, name: &AudioFileName) -> Result<(), AudioStoreError> {
        let store_path = StorePath::from(name.as_str());
        self.inner.delete(&store_path).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => AudioStoreError::NotFound(name.to_string()),
            other => AudioStoreError::DeleteFailed(other.to_string()),
        })
    }
}
