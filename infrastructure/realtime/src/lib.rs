use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::broadcast;
use uuid::Uuid;

use business::domain::product::events::{ProductEvent, ProductEventPublisher};
use business::domain::product::model::Product;

pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

pub type EventReceiver = broadcast::Receiver<Arc<ProductEvent>>;

/// In-memory mirror of the catalog, kept in store insertion order.
#[derive(Debug, Default)]
struct ProductCache {
    products: HashMap<Uuid, Product>,
    order: Vec<Uuid>,
}

impl ProductCache {
    fn upsert(&mut self, product: Product) {
        if self.products.insert(product.id, product.clone()).is_none() {
            self.order.push(product.id);
        }
    }

    fn remove(&mut self, id: Uuid) {
        if self.products.remove(&id).is_some() {
            self.order.retain(|existing| *existing != id);
        }
    }

    /// Returns false for an update whose product is no longer cached. A late
    /// update must not resurrect a product deleted after it was written.
    fn apply(&mut self, event: &ProductEvent) -> bool {
        match event {
            ProductEvent::Added(product) => self.upsert(product.clone()),
            ProductEvent::Updated(product) => match self.products.get_mut(&product.id) {
                Some(slot) => *slot = product.clone(),
                None => return false,
            },
            ProductEvent::Deleted(id) => self.remove(*id),
        }
        true
    }

    fn snapshot(&self) -> Vec<Product> {
        self.order
            .iter()
            .filter_map(|id| self.products.get(id).cloned())
            .collect()
    }
}

/// Process-wide product cache plus the broadcast channel every realtime
/// connection subscribes to.
///
/// Events are applied and sent under the same write lock that [`connect`]
/// takes for reading, so a new subscriber's snapshot already contains every
/// event sent before its receiver existed, and none sent after.
///
/// [`connect`]: ProductHub::connect
pub struct ProductHub {
    cache: RwLock<ProductCache>,
    events: broadcast::Sender<Arc<ProductEvent>>,
}

impl ProductHub {
    pub fn new(capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity.max(1));
        Self {
            cache: RwLock::new(ProductCache::default()),
            events,
        }
    }

    /// Replaces the cache with the full catalog. Called once at startup.
    pub fn prime(&self, products: Vec<Product>) {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        *cache = ProductCache::default();
        let count = products.len();
        for product in products {
            cache.upsert(product);
        }
        tracing::info!(products = count, "product cache primed");
    }

    pub fn connect(&self) -> (Vec<Product>, EventReceiver) {
        let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        (cache.snapshot(), self.events.subscribe())
    }

    pub fn snapshot(&self) -> Vec<Product> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot()
    }

    pub fn cached_len(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .products
            .len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.events.receiver_count()
    }
}

impl Default for ProductHub {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}

impl ProductEventPublisher for ProductHub {
    fn publish(&self, event: ProductEvent) {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let product_id = event.product_id();
        if !cache.apply(&event) {
            tracing::debug!(%product_id, "dropped update for uncached product");
            return;
        }
        // Err only means nobody is listening right now.
        if let Ok(receivers) = self.events.send(Arc::new(event)) {
            tracing::debug!(%product_id, receivers, "product event broadcast");
        }
    }
}
