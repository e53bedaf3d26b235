use std::sync::Arc;

use logger::TracingLogger;
use persistence::cart::repository::CartRepositoryPostgres;
use persistence::memory::cart::MemoryCartRepository;
use persistence::memory::product::MemoryProductRepository;
use persistence::memory::store::MemoryStore;
use persistence::product::repository::ProductRepositoryPostgres;
use realtime::ProductHub;
use uploads::DiskImageStorage;

use business::application::cart::add_item::AddCartItemUseCaseImpl;
use business::application::cart::checkout::CheckoutCartUseCaseImpl;
use business::application::cart::clear::ClearCartUseCaseImpl;
use business::application::cart::create::CreateCartUseCaseImpl;
use business::application::cart::delete::DeleteCartUseCaseImpl;
use business::application::cart::get_all::GetAllCartsUseCaseImpl;
use business::application::cart::get_by_id::GetCartByIdUseCaseImpl;
use business::application::cart::remove_item::RemoveCartItemUseCaseImpl;
use business::application::cart::set_quantity::SetCartItemQuantityUseCaseImpl;
use business::application::cart::update_quantity::UpdateCartItemQuantityUseCaseImpl;
use business::application::product::create::CreateProductUseCaseImpl;
use business::application::product::delete::DeleteProductUseCaseImpl;
use business::application::product::get_all::GetAllProductsUseCaseImpl;
use business::application::product::get_by_id::GetProductByIdUseCaseImpl;
use business::application::product::list::ListProductsUseCaseImpl;
use business::application::product::update::UpdateProductUseCaseImpl;
use business::domain::cart::repository::CartRepository;
use business::domain::logger::Logger;
use business::domain::product::events::ProductEventPublisher;
use business::domain::product::repository::ProductRepository;
use business::domain::product::services::ImageStorage;

use crate::api::cart::routes::{CartApi, CartUseCases};
use crate::api::health::routes::HealthApi;
use crate::api::product::routes::ProductApi;
use crate::config::app_config::AppConfig;
use crate::config::storage_config::StorageDriver;
use crate::config::upload_config::{UPLOADS_PUBLIC_PREFIX, UploadConfig};
use crate::gateway::socket::RealtimeGateway;
use crate::views::pages::ViewState;

pub struct DependencyContainer {
    pub health_api: HealthApi,
    pub product_api: ProductApi,
    pub cart_api: CartApi,
    pub views: Arc<ViewState>,
    pub gateway: Arc<RealtimeGateway>,
    pub hub: Arc<ProductHub>,
    pub uploads: UploadConfig,
}

impl DependencyContainer {
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let (product_repository, cart_repository): (
            Arc<dyn ProductRepository>,
            Arc<dyn CartRepository>,
        ) = match config.storage.driver {
            StorageDriver::Postgres => {
                let pool = config.storage.init_database().await?;
                (
                    Arc::new(ProductRepositoryPostgres::new(pool.clone())),
                    Arc::new(CartRepositoryPostgres::new(pool)),
                )
            }
            StorageDriver::Memory => {
                tracing::warn!("using in-memory storage, data is lost on restart");
                let store = MemoryStore::new();
                (
                    Arc::new(MemoryProductRepository::new(store.clone())),
                    Arc::new(MemoryCartRepository::new(store)),
                )
            }
        };

        Self::build(
            product_repository,
            cart_repository,
            config.uploads.clone(),
            config.realtime.channel_capacity,
        )
        .await
    }

    /// Wires every use case over the given repositories and primes the
    /// realtime cache from the catalog.
    pub async fn build(
        product_repository: Arc<dyn ProductRepository>,
        cart_repository: Arc<dyn CartRepository>,
        uploads: UploadConfig,
        channel_capacity: usize,
    ) -> anyhow::Result<Self> {
        let product_logger: Arc<dyn Logger> = Arc::new(TracingLogger::new("products"));
        let cart_logger: Arc<dyn Logger> = Arc::new(TracingLogger::new("carts"));
        let realtime_logger: Arc<dyn Logger> = Arc::new(TracingLogger::new("realtime"));

        // Infrastructure adapters
        let image_storage: Arc<dyn ImageStorage> = Arc::new(DiskImageStorage::new(
            uploads.directory.clone(),
            UPLOADS_PUBLIC_PREFIX,
        ));
        let hub = Arc::new(ProductHub::new(channel_capacity));
        hub.prime(product_repository.get_all().await?);
        let publisher: Arc<dyn ProductEventPublisher> = hub.clone();

        // Product use cases
        let get_all_products = Arc::new(GetAllProductsUseCaseImpl {
            repository: product_repository.clone(),
            logger: product_logger.clone(),
        });
        let get_product_by_id = Arc::new(GetProductByIdUseCaseImpl {
            repository: product_repository.clone(),
            logger: product_logger.clone(),
        });
        let list_products = Arc::new(ListProductsUseCaseImpl {
            repository: product_repository.clone(),
            logger: product_logger.clone(),
        });
        let create_product = Arc::new(CreateProductUseCaseImpl {
            repository: product_repository.clone(),
            image_storage,
            publisher: publisher.clone(),
            logger: product_logger.clone(),
        });
        let update_product = Arc::new(UpdateProductUseCaseImpl {
            repository: product_repository.clone(),
            publisher: publisher.clone(),
            logger: product_logger.clone(),
        });
        let delete_product = Arc::new(DeleteProductUseCaseImpl {
            repository: product_repository.clone(),
            publisher,
            logger: product_logger,
        });

        // Cart use cases
        let get_all_carts = Arc::new(GetAllCartsUseCaseImpl {
            repository: cart_repository.clone(),
            logger: cart_logger.clone(),
        });
        let get_cart_by_id = Arc::new(GetCartByIdUseCaseImpl {
            repository: cart_repository.clone(),
            product_repository: product_repository.clone(),
            logger: cart_logger.clone(),
        });
        let cart_use_cases = CartUseCases {
            create: Arc::new(CreateCartUseCaseImpl {
                repository: cart_repository.clone(),
                logger: cart_logger.clone(),
            }),
            get_all: get_all_carts.clone(),
            get_by_id: get_cart_by_id.clone(),
            add_item: Arc::new(AddCartItemUseCaseImpl {
                repository: cart_repository.clone(),
                product_repository,
                logger: cart_logger.clone(),
            }),
            update_quantity: Arc::new(UpdateCartItemQuantityUseCaseImpl {
                repository: cart_repository.clone(),
                logger: cart_logger.clone(),
            }),
            set_quantity: Arc::new(SetCartItemQuantityUseCaseImpl {
                repository: cart_repository.clone(),
                logger: cart_logger.clone(),
            }),
            remove_item: Arc::new(RemoveCartItemUseCaseImpl {
                repository: cart_repository.clone(),
                logger: cart_logger.clone(),
            }),
            clear: Arc::new(ClearCartUseCaseImpl {
                repository: cart_repository.clone(),
                logger: cart_logger.clone(),
            }),
            checkout: Arc::new(CheckoutCartUseCaseImpl {
                repository: cart_repository.clone(),
                logger: cart_logger.clone(),
            }),
            delete: Arc::new(DeleteCartUseCaseImpl {
                repository: cart_repository,
                logger: cart_logger,
            }),
        };

        let views = Arc::new(ViewState {
            get_all_products,
            get_product_by_id: get_product_by_id.clone(),
            get_all_carts,
            get_cart_by_id,
        });
        let gateway = Arc::new(RealtimeGateway::new(
            hub.clone(),
            create_product.clone(),
            delete_product.clone(),
            realtime_logger,
        ));

        Ok(Self {
            health_api: HealthApi::new(hub.clone()),
            product_api: ProductApi::new(
                list_products,
                get_product_by_id,
                create_product,
                update_product,
                delete_product,
            ),
            cart_api: CartApi::new(cart_use_cases),
            views,
            gateway,
            hub,
            uploads,
        })
    }
}
