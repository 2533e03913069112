//! In-Memory Resource Source Adapter
//!
//! Holds a fixed resource list. Useful for testing and development.

use std::sync::{Arc, RwLock};

use crate::domain::directory::{sort_by_level, Resource};
use crate::ports::{DirectoryError, ResourceSource};

/// Resource source holding its records in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResourceSource {
    resources: Arc<RwLock<Vec<Resource>>>,
}

impl InMemoryResourceSource {
    /// Creates a source with the given records, ordered by level.
    pub fn new(mut resources: Vec<Resource>) -> Self {
        sort_by_level(&mut resources);
        Self {
            resources: Arc::new(RwLock::new(resources)),
        }
    }

    /// Replaces the held records, as a directory sync would.
    pub fn replace(&self, mut resources: Vec<Resource>) -> Result<(), DirectoryError> {
        sort_by_level(&mut resources);
        let mut held = self
            .resources
            .write()
            .map_err(|e| DirectoryError::Unavailable(e.to_string()))?;
        *held = resources;
        Ok(())
    }
}

impl ResourceSource for InMemoryResourceSource {
    fn load_resources(&self) -> Result<Vec<Resource>, DirectoryError> {
        self.resources
            .read()
            .map(|resources| resources.clone())
            .map_err(|e| DirectoryError::Unavailable(e.to_string()))
    }
}
