//! Hosted image storage service
//!
//! Uploads tour images to a Cloudinary-style unsigned upload endpoint and
//! returns the hosted secure URL.

use serde::Deserialize;

use crate::{
    config::StorageConfig,
    error::{AppError, AppResult},
};

/// Images are capped at 5 MiB, matching the admin form's upload ceiling.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/webp", "image/gif"];

/// An image file received through a multipart form
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl ImageUpload {
    pub fn validate(&self) -> Result<(), String> {
        if !ALLOWED_MIME_TYPES.contains(&self.content_type.as_str()) {
            return Err("Invalid file type. Only JPEG, PNG, WebP, GIF allowed.".to_string());
        }
        if self.bytes.len() > MAX_IMAGE_BYTES {
            return Err("Image exceeds the 5MB size limit".to_string());
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

#[derive(Clone)]
pub struct StorageService {
    config: StorageConfig,
    http: reqwest::Client,
}

impl StorageService {
    pub fn new(config: StorageConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { config, http })
    }

    /// Upload an image and return its hosted URL
    pub async fn upload_image(&self, image: ImageUpload) -> AppResult<String> {
        image.validate().map_err(AppError::Validation)?;

        let (cloud_name, upload_preset) =
            match (&self.config.cloud_name, &self.config.upload_preset) {
                (Some(cloud), Some(preset)) => (cloud, preset),
                _ => {
                    return Err(AppError::Configuration(
                        "Image storage is not configured".to_string(),
                    ))
                }
            };

        let part = reqwest::multipart::Part::bytes(image.bytes)
            .file_name("upload")
            .mime_str(&image.content_type)
            .map_err(|e| AppError::Validation(format!("Invalid content type: {}", e)))?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("upload_preset", upload_preset.clone())
            .text("folder", self.config.folder.clone());

        let response = self
            .http
            .post(format!(
                "https://api.cloudinary.com/v1_1/{}/image/upload",
                cloud_name
            ))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Image upload failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::Internal(format!(
                "Image upload failed: HTTP {}: {}",
                status, text
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("Invalid storage response: {}", e)))?;

        Ok(body.secure_url)
    }
}
