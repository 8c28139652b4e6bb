use async_trait::async_trait;
use promptboard_core::BoardResult;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::store::atomic;
use crate::traits::CredentialStore;

/// Raw-string credential file. No JSON, no framing: the file content is
/// the credential. Persisted independently of the board snapshot.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn save(&self, credential: &str) -> BoardResult<()> {
        atomic::write_atomic(&self.path, credential.as_bytes()).await?;
        tracing::info!("Saved credential to {}", self.path.display());
        Ok(())
    }

    async fn load(&self) -> BoardResult<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).await?;
        // A trailing newline from hand editing does not count as part of
        // the credential; an all-whitespace file means "not configured".
        let credential = content.trim_end_matches(['\n', '\r']).to_string();
        if credential.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(credential))
        }
    }

    async fn clear(&self) -> BoardResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).await?;
            tracing::info!("Removed credential at {}", self.path.display());
        }
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
