//! File-based Resource Source Adapter
//!
//! Reads the directory snapshot written by the sync job: a JSON array of
//! resource records keyed by the directory's column names. The snapshot is
//! parsed off the request path with `tokio::fs` and served from memory;
//! `refresh` picks up a rewritten file by its modification time.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::SystemTime;
use tokio::fs;

use crate::domain::directory::{sort_by_level, Resource, ZipIndex};
use crate::ports::{DirectoryError, ResourceSource};

#[derive(Debug, Default)]
struct Snapshot {
    resources: Vec<Resource>,
    modified: Option<SystemTime>,
}

/// Resource source backed by a JSON snapshot on disk.
#[derive(Debug, Clone)]
pub struct JsonFileResourceSource {
    path: PathBuf,
    snapshot: Arc<RwLock<Snapshot>>,
}

impl JsonFileResourceSource {
    /// Reads the snapshot at `path`, failing if it is missing or malformed.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self, DirectoryError> {
        let source = Self {
            path: path.as_ref().to_path_buf(),
            snapshot: Arc::new(RwLock::new(Snapshot::default())),
        };
        source.reload().await?;
        Ok(source)
    }

    /// Re-reads the snapshot if the file changed since the last read.
    ///
    /// Returns true when new records were loaded. On error the previous
    /// records keep being served.
    pub async fn refresh(&self) -> Result<bool, DirectoryError> {
        let modified = modified_at(&self.path).await?;
        let current = self.read_snapshot()?.modified;
        if modified.is_some() && modified == current {
            return Ok(false);
        }
        self.reload().await?;
        Ok(true)
    }

    async fn reload(&self) -> Result<(), DirectoryError> {
        let modified = modified_at(&self.path).await?;
        let mut resources: Vec<Resource> = read_json(&self.path).await?;
        sort_by_level(&mut resources);

        let mut snapshot = self
            .snapshot
            .write()
            .map_err(|e| DirectoryError::Unavailable(e.to_string()))?;
        *snapshot = Snapshot {
            resources,
            modified,
        };
        Ok(())
    }

    fn read_snapshot(&self) -> Result<std::sync::RwLockReadGuard<'_, Snapshot>, DirectoryError> {
        self.snapshot
            .read()
            .map_err(|e| DirectoryError::Unavailable(e.to_string()))
    }
}

impl ResourceSource for JsonFileResourceSource {
    fn load_resources(&self) -> Result<Vec<Resource>, DirectoryError> {
        Ok(self.read_snapshot()?.resources.clone())
    }
}

/// Loads the ZIP to service-area index: an object mapping each ZIP code to
/// the ZIP codes of its area.
pub async fn load_zip_index<P: AsRef<Path>>(path: P) -> Result<ZipIndex, DirectoryError> {
    read_json(path.as_ref()).await
}

/// Loads the list of ZIP codes inside the city: a JSON array of strings.
pub async fn load_city_zips<P: AsRef<Path>>(path: P) -> Result<Vec<String>, DirectoryError> {
    read_json(path.as_ref()).await
}

async fn modified_at(path: &Path) -> Result<Option<SystemTime>, DirectoryError> {
    let metadata = fs::metadata(path)
        .await
        .map_err(|e| DirectoryError::Unavailable(format!("{}: {}", path.display(), e)))?;
    Ok(metadata.modified().ok())
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, DirectoryError> {
    let raw = fs::read_to_string(path)
        .await
        .map_err(|e| DirectoryError::Unavailable(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&raw)
        .map_err(|e| DirectoryError::Malformed(format!("{}: {}", path.display(), e)))
}
