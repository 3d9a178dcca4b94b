use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tracing::warn;
use uuid::Uuid;

use crate::errors::ServiceError;

/// Disk-backed store for uploaded files.
///
/// Files live under a single root, organized into per-purpose
/// subdirectories ("dashboard", "services", "formations", "carousel",
/// "about", "config", "cv", ...). Paths handed out and stored in the
/// database are always relative to the root, so the root can move
/// between environments without rewriting rows.
#[derive(Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub async fn new<P: Into<PathBuf>>(root: P) -> Result<Arc<Self>, ServiceError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .await
            .map_err(|e| ServiceError::Io(format!("cannot create media root: {e}")))?;
        Ok(Arc::new(Self { root }))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path for a stored relative path.
    pub fn abs(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    pub async fn exists(&self, rel: &str) -> bool {
        fs::metadata(self.abs(rel)).await.is_ok()
    }

    /// Write uploaded bytes under `subdir`, prefixing the file name with a
    /// UUID so re-uploads of the same file never collide. Returns the
    /// relative path to store in the database.
    pub async fn save(&self, subdir: &str, file_name: &str, bytes: &[u8]) -> Result<String, ServiceError> {
        let dir = self.root.join(subdir);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| ServiceError::Io(format!("cannot create {subdir}: {e}")))?;
        let safe_name = sanitize_file_name(file_name);
        let stored_name = format!("{}_{}", Uuid::new_v4(), safe_name);
        let dest = dir.join(&stored_name);
        fs::write(&dest, bytes)
            .await
            .map_err(|e| ServiceError::Io(format!("cannot write {}: {e}", dest.display())))?;
        Ok(format!("{subdir}/{stored_name}"))
    }

    /// Copy an existing stored file into `dest_dir`, keeping its file name.
    /// Creates the destination directory if absent. A same-named file in the
    /// destination is overwritten, matching how syncs behaved historically.
    /// A missing source fails before anything is created on disk.
    pub async fn copy_into(&self, rel_src: &str, dest_dir: &str) -> Result<String, ServiceError> {
        let src = self.abs(rel_src);
        fs::metadata(&src)
            .await
            .map_err(|e| ServiceError::Io(format!("missing source {}: {e}", src.display())))?;
        let file_name = src
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ServiceError::Io(format!("invalid source path: {rel_src}")))?
            .to_string();
        let dir = self.root.join(dest_dir);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| ServiceError::Io(format!("cannot create {dest_dir}: {e}")))?;
        let dest = dir.join(&file_name);
        fs::copy(&src, &dest)
            .await
            .map_err(|e| ServiceError::Io(format!("cannot copy {} to {}: {e}", src.display(), dest.display())))?;
        Ok(format!("{dest_dir}/{file_name}"))
    }

    /// Best-effort removal; a missing or locked file is logged, not an error.
    /// Callers deleting a record must not fail because its file is gone.
    pub async fn delete(&self, rel: &str) -> bool {
        match fs::remove_file(self.abs(rel)).await {
            Ok(()) => true,
            Err(e) => {
                warn!(path = rel, error = %e, "could not delete stored file");
                false
            }
        }
    }
}

/// Keep the original file name recognizable but strip path separators and
/// control characters.
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_control() || matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    if cleaned.trim().is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn temp_store() -> Arc<MediaStore> {
        let root = std::env::temp_dir().join(format!("media_store_{}", Uuid::new_v4()));
        MediaStore::new(root).await.expect("create store")
    }

    #[tokio::test]
    async fn save_then_copy_then_delete() -> Result<(), anyhow::Error> {
        let store = temp_store().await;

        let rel = store.save("dashboard", "hero.png", b"png-bytes").await?;
        assert!(rel.starts_with("dashboard/"));
        assert!(rel.ends_with("_hero.png"));
        assert!(store.exists(&rel).await);

        let copied = store.copy_into(&rel, "carousel").await?;
        assert!(copied.starts_with("carousel/"));
        assert!(store.exists(&copied).await);
        assert_eq!(tokio::fs::read(store.abs(&copied)).await?, b"png-bytes");

        assert!(store.delete(&rel).await);
        assert!(!store.exists(&rel).await);
        // double delete is a no-op, not a failure
        assert!(!store.delete(&rel).await);

        let _ = tokio::fs::remove_dir_all(store.root()).await;
        Ok(())
    }

    #[tokio::test]
    async fn copy_missing_source_is_io_error() {
        let store = temp_store().await;
        let err = store.copy_into("dashboard/nothere.png", "services").await.unwrap_err();
        assert!(matches!(err, ServiceError::Io(_)));
        // the destination directory is not created for a doomed copy
        assert!(tokio::fs::metadata(store.abs("services")).await.is_err());
        let _ = tokio::fs::remove_dir_all(store.root()).await;
    }

    #[tokio::test]
    async fn re_upload_same_name_gets_distinct_path() -> Result<(), anyhow::Error> {
        let store = temp_store().await;
        let a = store.save("dashboard", "logo.png", b"one").await?;
        let b = store.save("dashboard", "logo.png", b"two").await?;
        assert_ne!(a, b);
        assert!(store.exists(&a).await && store.exists(&b).await);
        let _ = tokio::fs::remove_dir_all(store.root()).await;
        Ok(())
    }

    #[test]
    fn sanitize_strips_separators() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_file_name(""), "upload");
    }
}
