use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::checkout::{CheckoutCartParams, CheckoutCartUseCase};
use crate::domain::logger::Logger;

/// Completes a purchase by emptying the cart. No order record is kept.
pub struct CheckoutCartUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl CheckoutCartUseCase for CheckoutCartUseCaseImpl {
    async fn execute(&self, params: CheckoutCartParams) -> Result<(), CartError> {
        self.logger.info(&format!("Checking out cart: {}", params.id));

        let cart = self
            .repository
            .get_by_id(params.id)
            .await
            .map_err(CartError::from_repository)?;
        cart.ensure_can_checkout()?;

        self.repository
            .clear(params.id)
            .await
            .map_err(CartError::from_repository)?;

        self.logger.info(&format!(
            "Cart {} checked out with {} units",
            params.id,
            cart.total_units()
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::mocks::{MockCartRepo, cart_with, mock_logger};
    use crate::domain::errors::RepositoryError;
    use uuid::Uuid;

    #[tokio::test]
    async fn should_clear_non_empty_cart() {
        let cart_id = Uuid::new_v4();
        let mut mock_repo = MockCartRepo::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(cart_with(cart_id, &[(Uuid::new_v4(), 2)])));
        mock_repo
            .expect_clear()
            .times(1)
            .returning(move |_| Ok(cart_with(cart_id, &[])));

        let use_case = CheckoutCartUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: Arc::new(mock_logger()),
        };

        assert!(use_case.execute(CheckoutCartParams { id: cart_id }).await.is_ok());
    }

    #[tokio::test]
    async fn should_reject_empty_cart() {
        let cart_id = Uuid::new_v4();
        let mut mock_repo = MockCartRepo::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(cart_with(cart_id, &[])));
        mock_repo.expect_clear().never();

        let use_case = CheckoutCartUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: Arc::new(mock_logger()),
        };

        let result = use_case.execute(CheckoutCartParams { id: cart_id }).await;

        assert!(matches!(result.unwrap_err(), CartError::Empty));
    }

    #[tokio::test]
    async fn should_return_not_found_when_cart_missing() {
        let mut mock_repo = MockCartRepo::new();
        mock_repo
            .expect_get_by_id()
            .returning(|_| Err(RepositoryError::NotFound));

        let use_case = CheckoutCartUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: Arc::new(mock_logger()),
        };

        let result = use_case
            .execute(CheckoutCartParams { id: Uuid::new_v4() })
            .await;

        assert!(matches!(result.unwrap_err(), CartError::NotFound));
    }
}
