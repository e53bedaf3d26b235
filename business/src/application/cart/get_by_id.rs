use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartDetails;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::get_by_id::{GetCartByIdParams, GetCartByIdUseCase};
use crate::domain::logger::Logger;
use crate::domain::product::repository::ProductRepository;

pub struct GetCartByIdUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub product_repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetCartByIdUseCase for GetCartByIdUseCaseImpl {
    async fn execute(&self, params: GetCartByIdParams) -> Result<CartDetails, CartError> {
        self.logger
            .info(&format!("Fetching cart by id: {}", params.id));

        let cart = self
            .repository
            .get_by_id(params.id)
            .await
            .map_err(CartError::from_repository)?;

        if cart.is_empty() {
            return Ok(CartDetails::assemble(cart, &[]));
        }

        let ids: Vec<_> = cart.items.iter().map(|item| item.product_id).collect();
        let products = self.product_repository.get_by_ids(&ids).await?;
        Ok(CartDetails::assemble(cart, &products))
    }
}
