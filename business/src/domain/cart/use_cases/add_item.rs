use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::Cart;

pub struct AddCartItemParams {
    pub cart_id: Uuid,
    pub product_id: Uuid,
    /// Defaults to 1 when absent.
    pub quantity: Option<i64>,
}

#[async_trait]
pub trait AddCartItemUseCase: Send + Sync {
    async fn execute(&self, params: AddCartItemParams) -> Result<Cart, CartError>;
}
