use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::Cart;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::get_all::GetAllCartsUseCase;
use crate::domain::logger::Logger;

pub struct GetAllCartsUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetAllCartsUseCase for GetAllCartsUseCaseImpl {
    async fn execute(&self) -> Result<Vec<Cart>, CartError> {
        self.logger.info("Fetching all carts");
        let carts = self.repository.get_all().await?;
        self.logger.info(&format!("Found {} carts", carts.len()));
        Ok(carts)
    }
}
