//! Media store — remote image hosting
//!
//! One outbound transfer per asset; the host answers with the durable
//! retrieval URL. No retry and no timeout here — callers own both.

pub mod cloudinary;

pub use cloudinary::CloudinaryClient;

use async_trait::async_trait;
use thiserror::Error;

/// Media store error types
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),
}

/// Result type for media operations
pub type MediaResult<T> = Result<T, MediaError>;

/// Seam over the remote image host
///
/// Implemented by [`CloudinaryClient`] and by test fakes.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Upload one binary asset, returning its durable retrieval URL
    async fn upload(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> MediaResult<String>;
}
