use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;

use super::model::{Product, ProductChanges};
use super::query::{Page, ProductListQuery};

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Product>, RepositoryError>;
    async fn find_page(&self, query: &ProductListQuery) -> Result<Page<Product>, RepositoryError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Product, RepositoryError>;
    async fn get_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, RepositoryError>;
    /// Fails with `Duplicated` when the title is already taken.
    async fn insert(&self, product: &Product) -> Result<(), RepositoryError>;
    /// Applies only the supplied fields. Fails with `NotFound` or `Duplicated`.
    async fn update(&self, id: Uuid, changes: &ProductChanges) -> Result<Product, RepositoryError>;
    /// Fails with `NotFound` when nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}
