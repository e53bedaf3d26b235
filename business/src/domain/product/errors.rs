use crate::domain::errors::RepositoryError;

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("product.missing_fields")]
    MissingFields,
    #[error("product.blank_field")]
    BlankField,
    #[error("product.invalid_price")]
    InvalidPrice,
    #[error("product.invalid_stock")]
    InvalidStock,
    #[error("product.no_fields_to_update")]
    NoFieldsToUpdate,
    #[error("product.not_found")]
    NotFound,
    #[error("product.title_taken")]
    TitleTaken,
    #[error("product.image_storage_failed")]
    ImageStorageFailed,
    #[error("repository.persistence")]
    Repository(#[from] RepositoryError),
}

impl ProductError {
    /// Maps repository failures on single-product lookups and writes.
    pub fn from_repository(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound => ProductError::NotFound,
            RepositoryError::Duplicated => ProductError::TitleTaken,
            other => ProductError::Repository(other),
        }
    }
}
