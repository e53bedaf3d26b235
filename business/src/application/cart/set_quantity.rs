use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::Cart;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::set_quantity::{
    SetCartItemQuantityParams, SetCartItemQuantityUseCase,
};
use crate::domain::cart::value_objects::Quantity;
use crate::domain::logger::Logger;

pub struct SetCartItemQuantityUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl SetCartItemQuantityUseCase for SetCartItemQuantityUseCaseImpl {
    async fn execute(&self, params: SetCartItemQuantityParams) -> Result<Cart, CartError> {
        self.logger.info(&format!(
            "Setting quantity of product {} in cart {} to {}",
            params.product_id, params.cart_id, params.quantity
        ));

        let quantity = Quantity::new(params.quantity)?;

        let mut cart = self
            .repository
            .get_by_id(params.cart_id)
            .await
            .map_err(CartError::from_repository)?;
        cart.set_quantity(params.product_id, quantity)?;

        self.repository
            .set_item_quantity(params.cart_id, params.product_id, quantity)
            .await
            .map_err(CartError::from_repository)?
            .ok_or(CartError::ItemNotFound)
    }
}
