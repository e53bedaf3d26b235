use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::Cart;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::clear::{ClearCartParams, ClearCartUseCase};
use crate::domain::logger::Logger;

pub struct ClearCartUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ClearCartUseCase for ClearCartUseCaseImpl {
    async fn execute(&self, params: ClearCartParams) -> Result<Cart, CartError> {
        self.logger.info(&format!("Clearing cart: {}", params.id));
        self.repository
            .clear(params.id)
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
    async fn should_return_emptied_cart() {
        let cart_id = Uuid::new_v4();
        let mut mock_repo = MockCartRepo::new();
        mock_repo
            .expect_clear()
            .withf(move |id| *id == cart_id)
            .times(1)
            .returning(move |_| Ok(cart_with(cart_id, &[])));

        let use_case = ClearCartUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: Arc::new(mock_logger()),
        };

        let cart = use_case.execute(ClearCartParams { id: cart_id }).await.unwrap();

        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn should_return_not_found_when_cart_missing() {
        let mut mock_repo = MockCartRepo::new();
        mock_repo
            .expect_clear()
            .returning(|_| Err(RepositoryError::NotFound));

        let use_case = ClearCartUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: Arc::new(mock_logger()),
        };

        let result = use_case.execute(ClearCartParams { id: Uuid::new_v4() }).await;

        assert!(matches!(result.unwrap_err(), CartError::NotFound));
    }
}
