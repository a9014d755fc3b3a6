//! Cloudinary upload client
//!
//! Unsigned upload: multipart POST with the binary asset and the fixed
//! `upload_preset` credential to the per-deployment endpoint
//! `{base}/{cloud_name}/image/upload`. Success is a JSON body carrying
//! `secure_url`; everything else is an upload failure.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use super::{MediaError, MediaResult, MediaStore};

/// Remote error payload: `{"error": {"message": "..."}}`
#[derive(Debug, Deserialize)]
struct RemoteError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct UploadBody {
    secure_url: Option<String>,
    error: Option<RemoteError>,
}

#[derive(Clone)]
pub struct CloudinaryClient {
    client: reqwest::Client,
    endpoint: String,
    upload_preset: String,
}

impl CloudinaryClient {
    pub fn new(base_url: &str, cloud_name: &str, upload_preset: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!(
                "{}/{}/image/upload",
                base_url.trim_end_matches('/'),
                cloud_name
            ),
            upload_preset: upload_preset.to_string(),
        }
    }
}

#[async_trait]
impl MediaStore for CloudinaryClient {
    async fn upload(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> MediaResult<String> {
        let size = bytes.len();
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| MediaError::UploadFailed(format!("invalid content type: {e}")))?;
        let form = Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone());

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaError::UploadFailed(format!("transport error: {e}")))?;

        let status = response.status();
        let body: UploadBody = response
            .json()
            .await
            .map_err(|e| MediaError::UploadFailed(format!("unreadable response: {e}")))?;

        if let Some(err) = body.error {
            return Err(MediaError::UploadFailed(err.message));
        }
        match body.secure_url {
            Some(url) => {
                tracing::debug!(file_name, size, url = %url, "Asset uploaded");
                Ok(url)
            }
            None => Err(MediaError::UploadFailed(format!(
                "response without retrieval URL (status {status})"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_built_from_cloud_name() {
        let client = CloudinaryClient::new("https://api.cloudinary.com/v1_1/", "demo", "preset");
        assert_eq!(
            client.endpoint,
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );
    }

    #[test]
    fn error_body_parses() {
        let body: UploadBody =
            serde_json::from_str(r#"{"error": {"message": "Invalid preset"}}"#).unwrap();
        assert_eq!(body.error.unwrap().message, "Invalid preset");
        assert!(body.secure_url.is_none());
    }
}
