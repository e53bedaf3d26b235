use uuid::Uuid;

use super::model::Product;

/// A settled change to the catalog, emitted after the store accepted it.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductEvent {
    Added(Product),
    Updated(Product),
    Deleted(Uuid),
}

impl ProductEvent {
    pub fn product_id(&self) -> Uuid {
        match self {
            ProductEvent::Added(product) | ProductEvent::Updated(product) => product.id,
            ProductEvent::Deleted(id) => *id,
        }
    }
}

/// Port for fanning out catalog changes to connected clients.
///
/// Publishing is fire-and-forget: implementations must not block on slow
/// subscribers and never fail the write that triggered the event.
pub trait ProductEventPublisher: Send + Sync {
    fn publish(&self, event: ProductEvent);
}
