use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;
use uuid::Uuid;

use crate::domain::cart::model::Cart;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::value_objects::Quantity;
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::events::{ProductEvent, ProductEventPublisher};
use crate::domain::product::model::{Product, ProductChanges};
use crate::domain::product::query::{Page, ProductListQuery};
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::services::{ImageStorage, ImageUpload};

mock! {
    pub ProductRepo {}

    #[async_trait]
    impl ProductRepository for ProductRepo {
        async fn get_all(&self) -> Result<Vec<Product>, RepositoryError>;
        async fn find_page(&self, query: &ProductListQuery) -> Result<Page<Product>, RepositoryError>;
        async fn get_by_id(&self, id: Uuid) -> Result<Product, RepositoryError>;
        async fn get_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, RepositoryError>;
        async fn insert(&self, product: &Product) -> Result<(), RepositoryError>;
        async fn update(&self, id: Uuid, changes: &ProductChanges) -> Result<Product, RepositoryError>;
        async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
    }
}

mock! {
    pub CartRepo {}

    #[async_trait]
    impl CartRepository for CartRepo {
        async fn get_all(&self) -> Result<Vec<Cart>, RepositoryError>;
        async fn get_by_id(&self, id: Uuid) -> Result<Cart, RepositoryError>;
        async fn create(&self, cart: &Cart) -> Result<(), RepositoryError>;
        async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
        async fn add_item(&self, cart_id: Uuid, product_id: Uuid, quantity: Quantity) -> Result<Cart, RepositoryError>;
        async fn adjust_item_quantity(&self, cart_id: Uuid, product_id: Uuid, delta: i32) -> Result<Option<Cart>, RepositoryError>;
        async fn set_item_quantity(&self, cart_id: Uuid, product_id: Uuid, quantity: Quantity) -> Result<Option<Cart>, RepositoryError>;
        async fn remove_item(&self, cart_id: Uuid, product_id: Uuid) -> Result<Cart, RepositoryError>;
        async fn clear(&self, cart_id: Uuid) -> Result<Cart, RepositoryError>;
    }
}

mock! {
    pub Storage {}

    #[async_trait]
    impl ImageStorage for Storage {
        async fn store(&self, image: ImageUpload) -> Result<String, ProductError>;
        async fn remove(&self, reference: &str) -> Result<(), ProductError>;
    }
}

mock! {
    pub Publisher {}

    impl ProductEventPublisher for Publisher {
        fn publish(&self, event: ProductEvent);
    }
}

mock! {
    pub Log {}

    impl Logger for Log {
        fn info(&self, message: &str);
        fn warn(&self, message: &str);
        fn error(&self, message: &str);
        fn debug(&self, message: &str);
    }
}

pub fn mock_logger() -> MockLog {
    let mut logger = MockLog::new();
    logger.expect_info().returning(|_| ());
    logger.expect_warn().returning(|_| ());
    logger.expect_error().returning(|_| ());
    logger.expect_debug().returning(|_| ());
    logger
}

pub fn silent_publisher() -> MockPublisher {
    let mut publisher = MockPublisher::new();
    publisher.expect_publish().never();
    publisher
}

pub fn make_product(id: Uuid, title: &str) -> Product {
    Product::from_repository(
        id,
        title.to_string(),
        format!("{title} description"),
        format!("{title}-code"),
        10.0,
        5,
        "general".to_string(),
        None,
        vec![],
        true,
        vec![],
        Utc::now(),
    )
}

pub fn cart_with(id: Uuid, items: &[(Uuid, i32)]) -> Cart {
    use crate::domain::cart::model::CartItem;

    let now = Utc::now();
    Cart::from_repository(
        id,
        items
            .iter()
            .map(|(product_id, quantity)| CartItem {
                product_id: *product_id,
                quantity: *quantity,
            })
            .collect(),
        now,
        now,
    )
}
