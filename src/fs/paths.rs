//! Path and directory management.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::fs::naming::sanitize_path_component;

/// Get the working directory for one snap.
///
/// `destination/<media_id>` when media is separated, otherwise `destination`.
pub fn get_media_folder(destination: &Path, media_id: &str, separate_media: bool) -> Result<PathBuf> {
    if separate_media {
        Ok(destination.join(sanitize_path_component(media_id)?))
    } else {
        Ok(destination.to_path_buf())
    }
}

/// Ensure a directory exists, creating it if necessary.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    if !tokio::fs::try_exists(path).await? {
        tracing::debug!("Creating directory {}", path.display());
        tokio::fs::create_dir_all(path).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_media_folder() {
        let root = Path::new("/downloads");

        let path = get_media_folder(root, "abc", true).unwrap();
        assert_eq!(path, PathBuf::from("/downloads/abc"));

        let path = get_media_folder(root, "abc", false).unwrap();
        assert_eq!(path, PathBuf::from("/downloads"));
    }

    #[test]
    fn test_get_media_folder_rejects_traversal() {
        assert!(get_media_folder(Path::new("/downloads"), "../etc", true).is_err());
    }

    #[tokio::test]
    async fn test_ensure_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        ensure_dir(&nested).await.unwrap();
        ensure_dir(&nested).await.unwrap();
        assert!(nested.is_dir());
    }
}
