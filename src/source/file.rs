//! Local JSON file source
//!
//! Reads the same payload the endpoint returns from disk, for offline
//! rendering and fixtures.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::error::FetchError;
use super::SeriesSource;
use crate::series::RawPayload;

/// History source backed by a JSON file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SeriesSource for FileSource {
    async fn fetch(&self) -> Result<RawPayload, FetchError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let payload = RawPayload::from_json(&content)?;

        tracing::info!(
            path = ?self.path,
            points = payload.tvl_staked_history.len(),
            "Loaded asset history from file"
        );

        Ok(payload)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_read_payload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(
            &path,
            r#"{"farm": "F", "asset": "A", "tvlStakedHistory": [{"date": "2024-01-01", "value": 1}]}"#,
        )
        .unwrap();

        let payload = FileSource::new(&path).fetch().await.unwrap();
        assert_eq!(payload.farm, "F");
        assert_eq!(payload.tvl_staked_history.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempdir().unwrap();
        let source = FileSource::new(dir.path().join("absent.json"));
        assert!(matches!(source.fetch().await, Err(FetchError::Io(_))));
    }

    #[tokio::test]
    async fn test_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "{\"farm\": 1}").unwrap();

        let source = FileSource::new(&path);
        assert!(matches!(source.fetch().await, Err(FetchError::Decode(_))));
    }
}
