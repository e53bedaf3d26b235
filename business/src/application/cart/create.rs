use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::Cart;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::create::CreateCartUseCase;
use crate::domain::logger::Logger;

pub struct CreateCartUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl CreateCartUseCase for CreateCartUseCaseImpl {
    async fn execute(&self) -> Result<Cart, CartError> {
        let cart = Cart::new();
        self.repository.create(&cart).await?;
        self.logger.info(&format!("Cart created: {}", cart.id));
        Ok(cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::mocks::{MockCartRepo, mock_logger};
    use crate::domain::errors::RepositoryError;

    #[tokio::test]
    async fn should_create_empty_cart() {
        let mut mock_repo = MockCartRepo::new();
        mock_repo
            .expect_create()
            .withf(|cart| cart.is_empty())
            .times(1)
            .returning(|_| Ok(()));

        let use_case = CreateCartUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: Arc::new(mock_logger()),
        };

        let cart = use_case.execute().await.unwrap();

        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn should_propagate_store_failure() {
        let mut mock_repo = MockCartRepo::new();
        mock_repo
            .expect_create()
            .returning(|_| Err(RepositoryError::DatabaseError));

        let use_case = CreateCartUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: Arc::new(mock_logger()),
        };

        assert!(matches!(
            use_case.execute().await.unwrap_err(),
            CartError::Repository(RepositoryError::DatabaseError)
        ));
    }
}
