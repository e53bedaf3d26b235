use crate::domain::errors::RepositoryError;

#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error("cart.not_found")]
    NotFound,
    #[error("cart.product_not_found")]
    ProductNotFound,
    #[error("cart.item_not_found")]
    ItemNotFound,
    #[error("cart.invalid_quantity")]
    InvalidQuantity,
    #[error("cart.empty")]
    Empty,
    #[error("repository.persistence")]
    Repository(#[from] RepositoryError),
}

impl CartError {
    pub fn from_repository(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound => CartError::NotFound,
            other => CartError::Repository(other),
        }
    }
}
