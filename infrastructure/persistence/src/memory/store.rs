use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use business::domain::cart::model::Cart;
use business::domain::product::model::Product;

#[derive(Debug, Default)]
pub struct MemoryState {
    /// Insertion order doubles as the `created_at, id` order of the SQL adapter.
    pub products: Vec<Product>,
    pub carts: Vec<Cart>,
}

/// Shared state behind both in-memory repositories, so product deletion can
/// cascade into carts the way the foreign keys do in Postgres.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().await
    }
}
