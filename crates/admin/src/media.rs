//! Product image endpoints.
//!
//! Uploads are multipart bodies with the file in the `image` field.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use tracing::{debug, instrument};

use tienda_core::{Detail, Product, ProductId, ProductImage, ProductImageId};
use tienda_storefront::ApiError;

use super::AdminClient;

/// Multipart field the backend reads the file from.
const IMAGE_FIELD: &str = "image";

/// An image file to upload.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    /// MIME type; when `None` the part is sent without one.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ImageUpload {
    /// Wrap in-memory bytes, guessing the MIME type from the file name.
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = guess_content_type(&file_name).map(str::to_owned);
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Read a file from disk.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Io` if the file cannot be read.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());

        Ok(Self::new(file_name, bytes))
    }

    fn into_form(self) -> Result<Form, ApiError> {
        let mut part = Part::bytes(self.bytes).file_name(self.file_name);
        if let Some(content_type) = &self.content_type {
            part = part.mime_str(content_type)?;
        }
        Ok(Form::new().part(IMAGE_FIELD, part))
    }
}

/// MIME type for common image extensions.
fn guess_content_type(file_name: &str) -> Option<&'static str> {
    let (_, ext) = file_name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

impl AdminClient {
    /// `POST /api/admin/products/{id}/upload-main/` - replace the main image.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, upload), fields(product_id = %id, file = %upload.file_name))]
    pub async fn upload_main_image(
        &self,
        id: ProductId,
        upload: ImageUpload,
    ) -> Result<Product, ApiError> {
        debug!(bytes = upload.bytes.len(), "Uploading main image");
        let form = upload.into_form()?;
        self.client
            .post_multipart(&format!("/api/admin/products/{id}/upload-main/"), form)
            .await
    }

    /// `POST /api/admin/products/{id}/gallery/` - add a gallery image.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, upload), fields(product_id = %id, file = %upload.file_name))]
    pub async fn upload_gallery_image(
        &self,
        id: ProductId,
        upload: ImageUpload,
    ) -> Result<ProductImage, ApiError> {
        debug!(bytes = upload.bytes.len(), "Uploading gallery image");
        let form = upload.into_form()?;
        self.client
            .post_multipart(&format!("/api/admin/products/{id}/gallery/"), form)
            .await
    }

    /// `DELETE /api/admin/products/gallery/{id}/delete/` - remove a gallery
    /// image.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self), fields(image_id = %image_id))]
    pub async fn delete_gallery_image(&self, image_id: ProductImageId) -> Result<Detail, ApiError> {
        self.client
            .delete(&format!("/api/admin/products/gallery/{image_id}/delete/"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type("mug.PNG"), Some("image/png"));
        assert_eq!(guess_content_type("mug.jpeg"), Some("image/jpeg"));
        assert_eq!(guess_content_type("mug.webp"), Some("image/webp"));
        assert_eq!(guess_content_type("notes.txt"), None);
        assert_eq!(guess_content_type("no-extension"), None);
    }

    #[test]
    fn test_debug_hides_bytes() {
        let upload = ImageUpload::new("mug.png", vec![0_u8; 2048]);
        let debug = format!("{upload:?}");
        assert!(debug.contains("mug.png"));
        assert!(debug.contains("2048"));
    }

    #[tokio::test]
    async fn test_from_path_reads_file() {
        let path = std::env::temp_dir().join(format!("tienda-upload-{}.gif", std::process::id()));
        tokio::fs::write(&path, b"GIF89a").await.expect("write temp file");

        let upload = ImageUpload::from_path(&path).await.expect("read upload");
        let _ = tokio::fs::remove_file(&path).await;

        assert_eq!(upload.bytes, b"GIF89a");
        assert_eq!(upload.content_type.as_deref(), Some("image/gif"));
        assert!(upload.file_name.ends_with(".gif"));
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        let result = ImageUpload::from_path("/definitely/not/here.png").await;
        assert!(matches!(result, Err(ApiError::Io(_))));
    }
}
