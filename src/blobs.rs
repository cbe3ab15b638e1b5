use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use derive_more::Display;
use log::{debug, info};
use tokio::fs;

use crate::db::RecordId;

#[derive(Debug, Display)]
pub enum BlobError {
    #[display(fmt = "photo payload {} not found", _0)]
    NotFound(String),

    #[display(fmt = "photo storage io error on {}: {}", path, source)]
    Io { path: String, source: std::io::Error },
}

impl std::error::Error for BlobError {}

/// Byte sink for photo payloads. Each photo lives in a flat file named
/// `{album_id}_{photo_id}` under the configured directory.
#[derive(Debug, Clone)]
pub struct PhotoSink {
    root: PathBuf,
}

impl PhotoSink {
    pub async fn new(root: PathBuf) -> Result<Self, BlobError> {
        fs::create_dir_all(&root).await.map_err(|source| BlobError::Io {
            path: root.display().to_string(),
            source,
        })?;
        info!("photo directory: {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    // Both parts render as digits or hyphenated hex, so the name never
    // contains a separator.
    fn path(&self, album_id: RecordId, photo_id: RecordId) -> PathBuf {
        self.root.join(format!("{album_id}_{photo_id}"))
    }

    pub async fn write(&self, album_id: RecordId, photo_id: RecordId, data: &[u8]) -> Result<(), BlobError> {
        let path = self.path(album_id, photo_id);
        fs::write(&path, data).await.map_err(|source| BlobError::Io {
            path: path.display().to_string(),
            source,
        })?;
        debug!("stored {} bytes at {}", data.len(), path.display());
        Ok(())
    }

    pub async fn read(&self, album_id: RecordId, photo_id: RecordId) -> Result<Vec<u8>, BlobError> {
        let path = self.path(album_id, photo_id);
        match fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(BlobError::NotFound(format!("{album_id}_{photo_id}"))),
            Err(source) => Err(BlobError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    /// Removing a payload that is already gone is not an error.
    pub async fn remove(&self, album_id: RecordId, photo_id: RecordId) -> Result<(), BlobError> {
        let path = self.path(album_id, photo_id);
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!("removed {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(BlobError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }
}
