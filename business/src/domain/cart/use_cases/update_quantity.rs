use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::Cart;

/// Relative change to a line item's quantity.
pub struct UpdateCartItemQuantityParams {
    pub cart_id: Uuid,
    pub product_id: Uuid,
    pub delta: i64,
}

#[async_trait]
pub trait UpdateCartItemQuantityUseCase: Send + Sync {
    async fn execute(&self, params: UpdateCartItemQuantityParams) -> Result<Cart, CartError>;
}
