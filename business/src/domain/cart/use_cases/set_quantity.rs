use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::Cart;

pub struct SetCartItemQuantityParams {
    pub cart_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i64,
}

#[async_trait]
pub trait SetCartItemQuantityUseCase: Send + Sync {
    async fn execute(&self, params: SetCartItemQuantityParams) -> Result<Cart, CartError>;
}
