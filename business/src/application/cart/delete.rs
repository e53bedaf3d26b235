use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::delete::{DeleteCartParams, DeleteCartUseCase};
use crate::domain::logger::Logger;

pub struct DeleteCartUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl DeleteCartUseCase for DeleteCartUseCaseImpl {
    async fn execute(&self, params: DeleteCartParams) -> Result<(), CartError> {
        self.logger.info(&format!("Deleting cart: {}", params.id));
        self.repository
            .delete(params.id)
            .await
            .map_err(CartError::from_repository)?;
        self.logger.info(&format!("Cart deleted: {}", params.id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::mocks::{MockCartRepo, mock_logger};
    use crate::domain::errors::RepositoryError;
    use uuid::Uuid;

    #[tokio::test]
    async fn should_return_not_found_when_cart_missing() {
        let mut mock_repo = MockCartRepo::new();
        mock_repo
            .expect_delete()
            .returning(|_| Err(RepositoryError::NotFound));

        let use_case = DeleteCartUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: Arc::new(mock_logger()),
        };

        let result = use_case.execute(DeleteCartParams { id: Uuid::new_v4() }).await;

        assert!(matches!(result.unwrap_err(), CartError::NotFound));
    }
}
