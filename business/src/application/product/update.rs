use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::events::{ProductEvent, ProductEventPublisher};
use crate::domain::product::model::Product;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::update::{UpdateProductParams, UpdateProductUseCase};

pub struct UpdateProductUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub publisher: Arc<dyn ProductEventPublisher>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl UpdateProductUseCase for UpdateProductUseCaseImpl {
    async fn execute(&self, params: UpdateProductParams) -> Result<Product, ProductError> {
        self.logger
            .info(&format!("Updating product: {}", params.id));

        let changes = params.changes.validated()?;

        let updated = self
            .repository
            .update(params.id, &changes)
            .await
            .map_err(ProductError::from_repository)?;

        self.publisher.publish(ProductEvent::Updated(updated.clone()));
        self.logger
            .info(&format!("Product updated: {}", updated.id));
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::mocks::{
        MockProductRepo, MockPublisher, make_product, mock_logger, silent_publisher,
    };
    use crate::domain::errors::RepositoryError;
    use crate::domain::product::model::ProductChanges;
    use uuid::Uuid;

    #[tokio::test]
    async fn should_apply_partial_changes_and_announce_them() {
        let product_id = Uuid::new_v4();
        let mut mock_repo = MockProductRepo::new();
        mock_repo
            .expect_update()
            .withf(move |id, changes| *id == product_id && changes.stock == Some(3))
            .returning(|id, changes| {
                let mut product = make_product(id, "Mate");
                changes.apply_to(&mut product);
                Ok(product)
            });
        let mut publisher = MockPublisher::new();
        publisher
            .expect_publish()
            .withf(move |event| matches!(event, ProductEvent::Updated(p) if p.id == product_id))
            .times(1)
            .returning(|_| ());

        let use_case = UpdateProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            publisher: Arc::new(publisher),
            logger: Arc::new(mock_logger()),
        };

        let product = use_case
            .execute(UpdateProductParams {
                id: product_id,
                changes: ProductChanges {
                    stock: Some(3),
                    ..Default::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(product.stock, 3);
        assert_eq!(product.title, "Mate");
    }

    #[tokio::test]
    async fn should_store_price_rounded_to_cents() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo
            .expect_update()
            .withf(|_, changes| changes.price == Some(10.46))
            .times(1)
            .returning(|id, changes| {
                let mut product = make_product(id, "Mate");
                changes.apply_to(&mut product);
                Ok(product)
            });
        let mut publisher = MockPublisher::new();
        publisher
            .expect_publish()
            .withf(|event| matches!(event, ProductEvent::Updated(p) if p.price == 10.46))
            .times(1)
            .returning(|_| ());

        let use_case = UpdateProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            publisher: Arc::new(publisher),
            logger: Arc::new(mock_logger()),
        };

        let product = use_case
            .execute(UpdateProductParams {
                id: Uuid::new_v4(),
                changes: ProductChanges {
                    price: Some(10.456),
                    ..Default::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(product.price, 10.46);
    }

    #[tokio::test]
    async fn should_reject_update_without_fields() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo.expect_update().never();

        let use_case = UpdateProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            publisher: Arc::new(silent_publisher()),
            logger: Arc::new(mock_logger()),
        };

        let result = use_case
            .execute(UpdateProductParams {
                id: Uuid::new_v4(),
                changes: ProductChanges::default(),
            })
            .await;

        assert!(matches!(result.unwrap_err(), ProductError::NoFieldsToUpdate));
    }

    #[tokio::test]
    async fn should_reject_blank_title() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo.expect_update().never();

        let use_case = UpdateProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            publisher: Arc::new(silent_publisher()),
            logger: Arc::new(mock_logger()),
        };

        let result = use_case
            .execute(UpdateProductParams {
                id: Uuid::new_v4(),
                changes: ProductChanges {
                    title: Some("  ".to_string()),
                    ..Default::default()
                },
            })
            .await;

        assert!(matches!(result.unwrap_err(), ProductError::BlankField));
    }

    #[tokio::test]
    async fn should_return_not_found_when_updating_nonexistent_product() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo
            .expect_update()
            .returning(|_, _| Err(RepositoryError::NotFound));

        let use_case = UpdateProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            publisher: Arc::new(silent_publisher()),
            logger: Arc::new(mock_logger()),
        };

        let result = use_case
            .execute(UpdateProductParams {
                id: Uuid::new_v4(),
                changes: ProductChanges {
                    price: Some(12.5),
                    ..Default::default()
                },
            })
            .await;

        assert!(matches!(result.unwrap_err(), ProductError::NotFound));
    }

    #[tokio::test]
    async fn should_report_title_conflict() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo
            .expect_update()
            .returning(|_, _| Err(RepositoryError::Duplicated));

        let use_case = UpdateProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            publisher: Arc::new(silent_publisher()),
            logger: Arc::new(mock_logger()),
        };

        let result = use_case
            .execute(UpdateProductParams {
                id: Uuid::new_v4(),
                changes: ProductChanges {
                    title: Some("Taken".to_string()),
                    ..Default::default()
                },
            })
            .await;

        assert!(matches!(result.unwrap_err(), ProductError::TitleTaken));
    }
}
