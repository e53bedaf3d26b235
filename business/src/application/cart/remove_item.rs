use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::Cart;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::remove_item::{RemoveCartItemParams, RemoveCartItemUseCase};
use crate::domain::logger::Logger;

pub struct RemoveCartItemUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl RemoveCartItemUseCase for RemoveCartItemUseCaseImpl {
    async fn execute(&self, params: RemoveCartItemParams) -> Result<Cart, CartError> {
        self.logger.info(&format!(
            "Removing product {} from cart {}",
            params.product_id, params.cart_id
        ));
        self.repository
            .remove_item(params.cart_id, params.product_id)
            .await
            .map_err(CartError::from_repository)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::mocks::{MockCartRepo, cart_with, mock_logger};
    use crate::domain::errors::RepositoryError;
    use uuid::Uuid;

    #[tokio::test]
    async fn should_succeed_when_line_absent() {
        let cart_id = Uuid::new_v4();
        let kept = Uuid::new_v4();
        let mut mock_repo = MockCartRepo::new();
        mock_repo
            .expect_remove_item()
            .returning(move |_, _| Ok(cart_with(cart_id, &[(kept, 1)])));

        let use_case = RemoveCartItemUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: Arc::new(mock_logger()),
        };

        let cart = use_case
            .execute(RemoveCartItemParams {
                cart_id,
                product_id: Uuid::new_v4(),
            })
            .await
            .unwrap();

        assert_eq!(cart.items.len(), 1);
    }

    #[tokio::test]
    async fn should_return_not_found_when_cart_missing() {
        let mut mock_repo = MockCartRepo::new();
        mock_repo
            .expect_remove_item()
            .returning(|_, _| Err(RepositoryError::NotFound));

        let use_case = RemoveCartItemUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: Arc::new(mock_logger()),
        };

        let result = use_case
            .execute(RemoveCartItemParams {
                cart_id: Uuid::new_v4(),
                product_id: Uuid::new_v4(),
            })
            .await;

        assert!(matches!(result.unwrap_err(), CartError::NotFound));
    }
}
