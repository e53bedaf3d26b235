use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::errors::CartError;

pub struct CheckoutCartParams {
    pub id: Uuid,
}

#[async_trait]
pub trait CheckoutCartUseCase: Send + Sync {
    async fn execute(&self, params: CheckoutCartParams) -> Result<(), CartError>;
}
