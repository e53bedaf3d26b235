use async_trait::async_trait;
use uuid::Uuid;

use business::domain::cart::model::Cart;
use business::domain::cart::repository::CartRepository;
use business::domain::cart::value_objects::Quantity;
use business::domain::errors::RepositoryError;

use super::store::{MemoryState, MemoryStore};

pub struct MemoryCartRepository {
    store: MemoryStore,
}

impl MemoryCartRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

fn cart_mut(state: &mut MemoryState, id: Uuid) -> Result<&mut Cart, RepositoryError> {
    state
        .carts
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or(RepositoryError::NotFound)
}

#[async_trait]
impl CartRepository for MemoryCartRepository {
    async fn get_all(&self) -> Result<Vec<Cart>, RepositoryError> {
        Ok(self.store.lock().await.carts.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Cart, RepositoryError> {
        let mut state = self.store.lock().await;
        cart_mut(&mut state, id).map(|cart| cart.clone())
    }

    async fn create(&self, cart: &Cart) -> Result<(), RepositoryError> {
        let mut state = self.store.lock().await;
        if state.carts.iter().any(|c| c.id == cart.id) {
            return Err(RepositoryError::Duplicated);
        }
        state.carts.push(cart.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut state = self.store.lock().await;
        let before = state.carts.len();
        state.carts.retain(|c| c.id != id);
        if state.carts.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn add_item(
        &self,
        cart_id: Uuid,
        product_id: Uuid,
        quantity: Quantity,
    ) -> Result<Cart, RepositoryError> {
        let mut state = self.store.lock().await;
        if !state.products.iter().any(|p| p.id == product_id) {
            return Err(RepositoryError::NotFound);
        }
        let cart = cart_mut(&mut state, cart_id)?;
        cart.add_item(product_id, quantity)
            .map_err(|_| RepositoryError::Persistence)?;
        Ok(cart.clone())
    }

    async fn adjust_item_quantity(
        &self,
        cart_id: Uuid,
        product_id: Uuid,
        delta: i32,
    ) -> Result<Option<Cart>, RepositoryError> {
        let mut state = self.store.lock().await;
        let cart = cart_mut(&mut state, cart_id)?;
        if cart.adjust_quantity(product_id, delta).is_err() {
            return Ok(None);
        }
        Ok(Some(cart.clone()))
    }

    async fn set_item_quantity(
        &self,
        cart_id: Uuid,
        product_id: Uuid,
        quantity: Quantity,
    ) -> Result<Option<Cart>, RepositoryError> {
        let mut state = self.store.lock().await;
        let cart = cart_mut(&mut state, cart_id)?;
        if cart.set_quantity(product_id, quantity).is_err() {
            return Ok(None);
        }
        Ok(Some(cart.clone()))
    }

    async fn remove_item(&self, cart_id: Uuid, product_id: Uuid) -> Result<Cart, RepositoryError> {
        let mut state = self.store.lock().await;
        let cart = cart_mut(&mut state, cart_id)?;
        cart.remove_item(product_id);
        Ok(cart.clone())
    }

    async fn clear(&self, cart_id: Uuid) -> Result<Cart, RepositoryError> {
        let mut state = self.store.lock().await;
        let cart = cart_mut(&mut state, cart_id)?;
        cart.clear();
        Ok(cart.clone())
    }
}
