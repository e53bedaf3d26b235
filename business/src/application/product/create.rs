use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::events::{ProductEvent, ProductEventPublisher};
use crate::domain::product::model::Product;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::services::ImageStorage;
use crate::domain::product::use_cases::create::{CreateProductParams, CreateProductUseCase};

pub struct CreateProductUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub image_storage: Arc<dyn ImageStorage>,
    pub publisher: Arc<dyn ProductEventPublisher>,
    pub logger: Arc<dyn Logger>,
}

impl CreateProductUseCaseImpl {
    async fn discard_image(&self, reference: &str) {
        if let Err(e) = self.image_storage.remove(reference).await {
            self.logger.warn(&format!(
                "Failed to remove orphaned image {}: {}",
                reference, e
            ));
        }
    }
}

#[async_trait]
impl CreateProductUseCase for CreateProductUseCaseImpl {
    async fn execute(&self, params: CreateProductParams) -> Result<Product, ProductError> {
        self.logger.info("Creating product");

        // Rejected forms must not leave a stored image behind.
        let mut product = Product::new(params.props)?;

        let stored_image = match params.image {
            Some(image) => {
                let reference = self.image_storage.store(image).await?;
                product.thumbnail = Some(reference.clone());
                Some(reference)
            }
            None => None,
        };

        if let Err(e) = self.repository.insert(&product).await {
            if let Some(reference) = stored_image {
                self.discard_image(&reference).await;
            }
            return Err(ProductError::from_repository(e));
        }

        self.publisher.publish(ProductEvent::Added(product.clone()));
        self.logger
            .info(&format!("Product created: {}", product.id));
        Ok(product)
    }
}
