use async_trait::async_trait;

use super::errors::ProductError;

/// An image received with a product form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Service port for storing product images out of band.
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Stores the image and returns the public reference path.
    async fn store(&self, image: ImageUpload) -> Result<String, ProductError>;

    /// Removes a previously stored image, identified by its reference path.
    async fn remove(&self, reference: &str) -> Result<(), ProductError>;
}
