//! Asset staging
//!
//! Staged assets live between file selection and either successful
//! persistence or explicit removal. Each staged asset owns a local preview
//! file under `{work_dir}/staging/`; the preview is released exactly once —
//! on removal, on successful submit, or on drop (teardown). `release`
//! consumes the handle, so a double release does not compile.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Maximum file size (5MB)
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Accepted declared media types
pub const SUPPORTED_TYPES: &[&str] = &["image/jpeg", "image/png", "image/jpg"];

/// Per-asset staging errors — recoverable by removing/replacing the asset
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("Only JPEG/PNG images are allowed (got '{0}')")]
    UnsupportedType(String),

    #[error("File must be at most {MAX_FILE_SIZE} bytes ({0} bytes given)")]
    TooLarge(usize),

    #[error("Failed to write preview file: {0}")]
    Preview(String),

    #[error("No staged asset at index {0}")]
    NoSuchAsset(usize),
}

/// File extension for the preview file of a declared media type
fn preview_extension(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        _ => "jpg",
    }
}

/// Locally held preview resource for one staged asset
#[derive(Debug)]
pub struct PreviewHandle {
    path: PathBuf,
    released: bool,
}

impl PreviewHandle {
    fn create(dir: &Path, id: Uuid, content_type: &str, bytes: &[u8]) -> Result<Self, StageError> {
        let path = dir.join(format!("{}.{}", id, preview_extension(content_type)));
        fs::write(&path, bytes).map_err(|e| StageError::Preview(e.to_string()))?;
        Ok(Self {
            path,
            released: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the preview resource. Consumes the handle.
    pub fn release(mut self) {
        self.remove_file();
    }

    fn remove_file(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(err) = fs::remove_file(&self.path) {
            // Teardown must not fail; a missing file is already released
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %self.path.display(), error = %err, "Failed to remove preview file");
            }
        }
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.remove_file();
    }
}

/// One staged, not-yet-persisted asset
///
/// `uploaded_url` is filled in once the media host accepts the asset, so a
/// retried commit after a mid-batch failure skips what already succeeded.
#[derive(Debug)]
pub struct PendingUpload {
    pub id: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub preview: PreviewHandle,
    pub uploaded_url: Option<String>,
}

/// Ordered queue of staged assets for one form
///
/// Staging order is preserved and becomes the order of the persisted
/// `images` sequence. `slots: Some(1)` gives the hero-banner behavior:
/// staging into a full single-slot queue replaces the previous asset.
#[derive(Debug)]
pub struct StagingArea {
    dir: PathBuf,
    pending: Vec<PendingUpload>,
    slots: Option<usize>,
}

impl StagingArea {
    pub fn new(dir: PathBuf, slots: Option<usize>) -> std::io::Result<Self> {
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            pending: Vec::new(),
            slots,
        })
    }

    /// Validate and append one asset
    ///
    /// Type is checked before size. Exactly `MAX_FILE_SIZE` bytes is
    /// accepted; one more is not.
    pub fn stage(
        &mut self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<&PendingUpload, StageError> {
        if !SUPPORTED_TYPES.contains(&content_type) {
            return Err(StageError::UnsupportedType(content_type.to_string()));
        }
        if bytes.len() > MAX_FILE_SIZE {
            return Err(StageError::TooLarge(bytes.len()));
        }

        if let Some(slots) = self.slots
            && self.pending.len() >= slots
        {
            // Single-slot form: replace the oldest staged asset
            let replaced = self.pending.remove(0);
            tracing::debug!(file_name = %replaced.file_name, "Replacing staged asset");
            replaced.preview.release();
        }

        let id = Uuid::new_v4();
        let preview = PreviewHandle::create(&self.dir, id, content_type, &bytes)?;
        self.pending.push(PendingUpload {
            id,
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            bytes,
            preview,
            uploaded_url: None,
        });
        Ok(self.pending.last().expect("just pushed"))
    }

    /// Remove one staged asset, releasing its preview
    pub fn remove_at(&mut self, index: usize) -> Result<(), StageError> {
        if index >= self.pending.len() {
            return Err(StageError::NoSuchAsset(index));
        }
        let removed = self.pending.remove(index);
        removed.preview.release();
        Ok(())
    }

    /// Take the whole staged sequence out (for a commit attempt)
    pub fn take_all(&mut self) -> Vec<PendingUpload> {
        std::mem::take(&mut self.pending)
    }

    /// Put a taken sequence back, in front of anything staged meanwhile
    pub fn restore(&mut self, mut assets: Vec<PendingUpload>) {
        assets.append(&mut self.pending);
        self.pending = assets;
    }

    /// Discard everything, releasing every preview
    pub fn clear(&mut self) {
        for asset in self.pending.drain(..) {
            asset.preview.release();
        }
    }

    pub fn pending(&self) -> &[PendingUpload] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
