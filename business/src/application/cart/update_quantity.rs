use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::Cart;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::update_quantity::{
    UpdateCartItemQuantityParams, UpdateCartItemQuantityUseCase,
};
use crate::domain::logger::Logger;

pub struct UpdateCartItemQuantityUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl UpdateCartItemQuantityUseCase for UpdateCartItemQuantityUseCaseImpl {
    async fn execute(&self, params: UpdateCartItemQuantityParams) -> Result<Cart, CartError> {
        self.logger.info(&format!(
            "Changing quantity of product {} in cart {} by {}",
            params.product_id, params.cart_id, params.delta
        ));

        let delta = i32::try_from(params.delta).map_err(|_| CartError::InvalidQuantity)?;

        let mut cart = self
            .repository
            .get_by_id(params.cart_id)
            .await
            .map_err(CartError::from_repository)?;
        cart.adjust_quantity(params.product_id, delta)?;

        // The store re-checks the bound atomically.
        match self
            .repository
            .adjust_item_quantity(params.cart_id, params.product_id, delta)
            .await
            .map_err(CartError::from_repository)?
        {
            Some(updated) => Ok(updated),
            None => Err(self.lost_race(&params, delta).await),
        }
    }
}

impl UpdateCartItemQuantityUseCaseImpl {
    /// Re-reads the cart to tell a line removed meanwhile from one that
    /// would have dropped below one.
    async fn lost_race(&self, params: &UpdateCartItemQuantityParams, delta: i32) -> CartError {
        let mut cart = match self.repository.get_by_id(params.cart_id).await {
            Ok(cart) => cart,
            Err(error) => return CartError::from_repository(error),
        };
        match cart.adjust_quantity(params.product_id, delta) {
            Err(error) => error,
            Ok(_) => CartError::InvalidQuantity,
        }
    }
}
