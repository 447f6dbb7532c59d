// Raw document sources: where the two search responses come from
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Source document is missing: {}", path.display())]
    Missing { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// Anything able to hand over the raw bytes of one search response
#[async_trait]
pub trait ItinerarySource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<u8>, SourceError>;

    // Human-readable origin of the document, used in logs and errors
    fn describe(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl ItinerarySource for FileSource {
    async fn fetch(&self) -> Result<Vec<u8>, SourceError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                debug!(path = %self.path.display(), bytes = bytes.len(), "read source document");
                Ok(bytes)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(SourceError::Missing {
                path: self.path.clone(),
            }),
            Err(e) => Err(SourceError::Io {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// Document already held in memory
#[derive(Debug, Clone)]
pub struct BytesSource {
    name: String,
    bytes: Vec<u8>,
}

impl BytesSource {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

#[async_trait]
impl ItinerarySource for BytesSource {
    async fn fetch(&self) -> Result<Vec<u8>, SourceError> {
        Ok(self.bytes.clone())
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

/// Fetches both documents concurrently. Fails if either one is unavailable.
pub async fn load_pair(
    first: &dyn ItinerarySource,
    second: &dyn ItinerarySource,
) -> Result<(Vec<u8>, Vec<u8>), SourceError> {
    tokio::try_join!(first.fetch(), second.fetch())
}
