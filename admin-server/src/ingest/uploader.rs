//! Upload commit
//!
//! Uploads the staged sequence strictly sequentially, in staged order.
//! The first failure aborts the batch: assets after it are not attempted,
//! assets before it stay uploaded on the remote host (no compensating
//! delete). Each success is recorded on the asset itself, so a retried
//! commit skips what the host already accepted.

use crate::media::{MediaResult, MediaStore};

use super::staging::PendingUpload;

/// Upload every staged asset, returning retrieval URLs in staged order
pub async fn commit_all(
    media: &dyn MediaStore,
    pending: &mut [PendingUpload],
) -> MediaResult<Vec<String>> {
    let mut urls = Vec::with_capacity(pending.len());

    for asset in pending.iter_mut() {
        if let Some(url) = &asset.uploaded_url {
            tracing::debug!(file_name = %asset.file_name, "Asset already uploaded, skipping");
            urls.push(url.clone());
            continue;
        }

        let url = media
            .upload(&asset.file_name, &asset.content_type, asset.bytes.clone())
            .await?;
        asset.uploaded_url = Some(url.clone());
        urls.push(url);
    }

    Ok(urls)
}
