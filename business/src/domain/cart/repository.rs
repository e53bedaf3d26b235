use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;

use super::model::Cart;
use super::value_objects::Quantity;

/// Persistence port for carts and their line items.
///
/// Every line-item write is a single atomic step in the store, so two
/// concurrent additions of the same product never lose an increment.
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Cart>, RepositoryError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Cart, RepositoryError>;
    async fn create(&self, cart: &Cart) -> Result<(), RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
    /// Merges into an existing line or appends one. `NotFound` when the cart
    /// or the product does not exist.
    async fn add_item(
        &self,
        cart_id: Uuid,
        product_id: Uuid,
        quantity: Quantity,
    ) -> Result<Cart, RepositoryError>;
    /// `Ok(None)` when the line is missing or the result would drop below one.
    async fn adjust_item_quantity(
        &self,
        cart_id: Uuid,
        product_id: Uuid,
        delta: i32,
    ) -> Result<Option<Cart>, RepositoryError>;
    /// `Ok(None)` when the line is missing.
    async fn set_item_quantity(
        &self,
        cart_id: Uuid,
        product_id: Uuid,
        quantity: Quantity,
    ) -> Result<Option<Cart>, RepositoryError>;
    async fn remove_item(&self, cart_id: Uuid, product_id: Uuid) -> Result<Cart, RepositoryError>;
    async fn clear(&self, cart_id: Uuid) -> Result<Cart, RepositoryError>;
}
