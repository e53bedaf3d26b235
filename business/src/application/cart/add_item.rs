use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::Cart;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::add_item::{AddCartItemParams, AddCartItemUseCase};
use crate::domain::cart::value_objects::Quantity;
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::product::repository::ProductRepository;
use uuid::Uuid;

pub struct AddCartItemUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub product_repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl AddCartItemUseCase for AddCartItemUseCaseImpl {
    async fn execute(&self, params: AddCartItemParams) -> Result<Cart, CartError> {
        self.logger.info(&format!(
            "Adding product {} to cart {}",
            params.product_id, params.cart_id
        ));

        let quantity = match params.quantity {
            Some(value) => Quantity::new(value)?,
            None => Quantity::default(),
        };

        let mut cart = self
            .repository
            .get_by_id(params.cart_id)
            .await
            .map_err(CartError::from_repository)?;

        self.product_repository
            .get_by_id(params.product_id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => CartError::ProductNotFound,
                other => CartError::Repository(other),
            })?;

        // Rejects a merge that would overflow before it reaches the store.
        cart.add_item(params.product_id, quantity)?;

        let updated = match self
            .repository
            .add_item(params.cart_id, params.product_id, quantity)
            .await
        {
            Ok(cart) => cart,
            Err(RepositoryError::NotFound) => return Err(self.missing_record(params.cart_id).await),
            Err(other) => return Err(CartError::Repository(other)),
        };

        self.logger.info(&format!("Cart updated: {}", updated.id));
        Ok(updated)
    }
}

impl AddCartItemUseCaseImpl {
    /// The store only reports a dangling reference. The cart was checked
    /// first, so if it still exists the product is what went away.
    async fn missing_record(&self, cart_id: Uuid) -> CartError {
        match self.repository.get_by_id(cart_id).await {
            Ok(_) => CartError::ProductNotFound,
            Err(error) => CartError::from_repository(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::mocks::{
        MockCartRepo, MockProductRepo, cart_with, make_product, mock_logger,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn product_repo_with(product_id: Uuid) -> MockProductRepo {
        let mut product_repo = MockProductRepo::new();
        product_repo
            .expect_get_by_id()
            .returning(move |_| Ok(make_product(product_id, "Mate")));
        product_repo
    }

    #[tokio::test]
    async fn should_default_quantity_to_one() {
        let cart_id = Uuid::new_v4();
        let product_id = Uuid::new_v4();
        let mut mock_repo = MockCartRepo::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(cart_with(cart_id, &[])));
        mock_repo
            .expect_add_item()
            .withf(|_, _, quantity| quantity.value() == 1)
            .times(1)
            .returning(move |_, pid, q| Ok(cart_with(cart_id, &[(pid, q.value())])));

        let use_case = AddCartItemUseCaseImpl {
            repository: Arc::new(mock_repo),
            product_repository: Arc::new(product_repo_with(product_id)),
            logger: Arc::new(mock_logger()),
        };

        let cart = use_case
            .execute(AddCartItemParams {
                cart_id,
                product_id,
                quantity: None,
            })
            .await
            .unwrap();

        assert_eq!(cart.find_item(product_id).unwrap().quantity, 1);
    }

    #[tokio::test]
    async fn should_reject_non_positive_quantity() {
        let mut mock_repo = MockCartRepo::new();
        mock_repo.expect_get_by_id().never();
        mock_repo.expect_add_item().never();

        let use_case = AddCartItemUseCaseImpl {
            repository: Arc::new(mock_repo),
            product_repository: Arc::new(MockProductRepo::new()),
            logger: Arc::new(mock_logger()),
        };

        let result = use_case
            .execute(AddCartItemParams {
                cart_id: Uuid::new_v4(),
                product_id: Uuid::new_v4(),
                quantity: Some(0),
            })
            .await;

        assert!(matches!(result.unwrap_err(), CartError::InvalidQuantity));
    }

    #[tokio::test]
    async fn should_return_not_found_when_cart_missing() {
        let mut mock_repo = MockCartRepo::new();
        mock_repo
            .expect_get_by_id()
            .returning(|_| Err(RepositoryError::NotFound));
        mock_repo.expect_add_item().never();

        let use_case = AddCartItemUseCaseImpl {
            repository: Arc::new(mock_repo),
            product_repository: Arc::new(MockProductRepo::new()),
            logger: Arc::new(mock_logger()),
        };

        let result = use_case
            .execute(AddCartItemParams {
                cart_id: Uuid::new_v4(),
                product_id: Uuid::new_v4(),
                quantity: Some(2),
            })
            .await;

        assert!(matches!(result.unwrap_err(), CartError::NotFound));
    }

    #[tokio::test]
    async fn should_return_product_not_found_when_product_missing() {
        let cart_id = Uuid::new_v4();
        let mut mock_repo = MockCartRepo::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(cart_with(cart_id, &[])));
        mock_repo.expect_add_item().never();
        let mut product_repo = MockProductRepo::new();
        product_repo
            .expect_get_by_id()
            .returning(|_| Err(RepositoryError::NotFound));

        let use_case = AddCartItemUseCaseImpl {
            repository: Arc::new(mock_repo),
            product_repository: Arc::new(product_repo),
            logger: Arc::new(mock_logger()),
        };

        let result = use_case
            .execute(AddCartItemParams {
                cart_id,
                product_id: Uuid::new_v4(),
                quantity: None,
            })
            .await;

        assert!(matches!(result.unwrap_err(), CartError::ProductNotFound));
    }

    #[tokio::test]
    async fn should_report_product_deleted_before_write_as_product_not_found() {
        let cart_id = Uuid::new_v4();
        let product_id = Uuid::new_v4();
        let mut mock_repo = MockCartRepo::new();
        mock_repo
            .expect_get_by_id()
            .times(2)
            .returning(move |_| Ok(cart_with(cart_id, &[])));
        mock_repo
            .expect_add_item()
            .returning(|_, _, _| Err(RepositoryError::NotFound));

        let use_case = AddCartItemUseCaseImpl {
            repository: Arc::new(mock_repo),
            product_repository: Arc::new(product_repo_with(product_id)),
            logger: Arc::new(mock_logger()),
        };

        let result = use_case
            .execute(AddCartItemParams {
                cart_id,
                product_id,
                quantity: None,
            })
            .await;

        assert!(matches!(result.unwrap_err(), CartError::ProductNotFound));
    }

    #[tokio::test]
    async fn should_report_cart_deleted_before_write_as_not_found() {
        let cart_id = Uuid::new_v4();
        let product_id = Uuid::new_v4();
        let reads = AtomicUsize::new(0);
        let mut mock_repo = MockCartRepo::new();
        mock_repo.expect_get_by_id().times(2).returning(move |_| {
            if reads.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(cart_with(cart_id, &[]))
            } else {
                Err(RepositoryError::NotFound)
            }
        });
        mock_repo
            .expect_add_item()
            .returning(|_, _, _| Err(RepositoryError::NotFound));

        let use_case = AddCartItemUseCaseImpl {
            repository: Arc::new(mock_repo),
            product_repository: Arc::new(product_repo_with(product_id)),
            logger: Arc::new(mock_logger()),
        };

        let result = use_case
            .execute(AddCartItemParams {
                cart_id,
                product_id,
                quantity: None,
            })
            .await;

        assert!(matches!(result.unwrap_err(), CartError::NotFound));
    }

    #[tokio::test]
    async fn should_reject_merge_that_overflows() {
        let cart_id = Uuid::new_v4();
        let product_id = Uuid::new_v4();
        let mut mock_repo = MockCartRepo::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(cart_with(cart_id, &[(product_id, i32::MAX)])));
        mock_repo.expect_add_item().never();

        let use_case = AddCartItemUseCaseImpl {
            repository: Arc::new(mock_repo),
            product_repository: Arc::new(product_repo_with(product_id)),
            logger: Arc::new(mock_logger()),
        };

        let result = use_case
            .execute(AddCartItemParams {
                cart_id,
                product_id,
                quantity: Some(1),
            })
            .await;

        assert!(matches!(result.unwrap_err(), CartError::InvalidQuantity));
    }
}
