//! Write-to-temp-then-rename file writes, so a crash mid-write never
//! leaves a half-written snapshot behind.

use promptboard_core::BoardResult;
use std::path::Path;
use tokio::fs;

/// Atomically replace `path` with `data`. The temp file is created in the
/// target's parent directory so the rename stays on one filesystem.
pub async fn write_atomic(path: &Path, data: &[u8]) -> BoardResult<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent).await?;
    }
    let temp = tempfile::NamedTempFile::new_in(parent)?;
    let temp_path = temp.path().to_path_buf();

    fs::write(&temp_path, data).await?;
    fs::rename(&temp_path, path).await?;

    tracing::debug!("Wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}

pub async fn read_all(path: &Path) -> BoardResult<Vec<u8>> {
    let data = fs::read(path).await?;
    tracing::debug!("Read {} bytes from {}", data.len(), path.display());
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.json");

        write_atomic(&path, b"[]").await.unwrap();
        assert_eq!(read_all(&path).await.unwrap(), b"[]");
    }

    #[tokio::test]
    async fn test_rewrite_replaces_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.json");

        write_atomic(&path, b"first").await.unwrap();
        write_atomic(&path, b"second").await.unwrap();
        assert_eq!(read_all(&path).await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_creates_missing_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deeper/file");

        write_atomic(&path, b"x").await.unwrap();
        assert_eq!(read_all(&path).await.unwrap(), b"x");
    }
}
