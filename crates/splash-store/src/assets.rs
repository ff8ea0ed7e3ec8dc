//! Storage for uploaded loading images.

use jiff::Timestamp;
use splash_core::error::Result;
use splash_core::LinkId;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Web-path prefix under which stored assets are referenced.
const UPLOADS_PREFIX: &str = "/uploads/";

/// On-disk store for uploaded images.
///
/// New uploads land in `uploads_dir` and are referenced from link
/// entries as `/uploads/{filename}`. Entries written by older
/// deployments carry other path conventions; those resolve under
/// `public_dir` instead, which mirrors where the old server kept its
/// static files.
#[derive(Debug, Clone)]
pub struct AssetStore {
    uploads_dir: PathBuf,
    public_dir: PathBuf,
}

impl AssetStore {
    pub fn new(uploads_dir: impl Into<PathBuf>, public_dir: impl Into<PathBuf>) -> Self {
        Self {
            uploads_dir: uploads_dir.into(),
            public_dir: public_dir.into(),
        }
    }

    /// Persists an uploaded image and returns its web-path reference.
    ///
    /// The generated filename is `{id}-{unix_millis}-{sanitized name}`
    /// so repeated uploads for the same id never collide.
    pub async fn store(&self, id: &LinkId, original_name: &str, bytes: &[u8]) -> Result<String> {
        let filename = format!(
            "{}-{}-{}",
            id.as_str(),
            Timestamp::now().as_millisecond(),
            sanitize_name(original_name),
        );
        fs::create_dir_all(&self.uploads_dir).await?;
        fs::write(self.uploads_dir.join(&filename), bytes).await?;
        Ok(format!("{UPLOADS_PREFIX}{filename}"))
    }

    /// Maps an entry's `image` reference to an on-disk path.
    ///
    /// `/uploads/...` references resolve into the uploads directory;
    /// anything else falls back to the legacy public directory with
    /// the leading slash stripped. References that would escape either
    /// directory resolve to `None`.
    pub fn resolve(&self, image: &str) -> Option<PathBuf> {
        let (root, rel) = match image.strip_prefix(UPLOADS_PREFIX) {
            Some(rest) => (&self.uploads_dir, rest),
            None => (&self.public_dir, image.trim_start_matches('/')),
        };
        safe_join(root, rel)
    }

    /// Removes the image behind a reference, best-effort.
    ///
    /// A missing file or any other failure is logged and swallowed;
    /// asset cleanup never fails the surrounding delete.
    pub async fn remove(&self, image: &str) {
        let Some(path) = self.resolve(image) else {
            debug!(image, "skipping removal of unresolvable asset reference");
            return;
        };
        if let Err(err) = fs::remove_file(&path).await {
            debug!(image, error = %err, "failed to remove stored asset");
        }
    }

    /// Reads a stored upload by its filename (the part after
    /// `/uploads/`). Returns `None` when absent or unresolvable.
    pub async fn open(&self, filename: &str) -> Option<Vec<u8>> {
        let path = safe_join(&self.uploads_dir, filename)?;
        fs::read(&path).await.ok()
    }
}

/// Collapses whitespace runs in an original filename to underscores.
fn sanitize_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Joins a relative reference under a root, rejecting anything with
/// parent-directory components. Asset references come from public
/// request paths.
fn safe_join(root: &Path, rel: &str) -> Option<PathBuf> {
    let rel = Path::new(rel);
    if rel
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }
    Some(root.join(rel))
}
