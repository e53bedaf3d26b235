use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use business::domain::cart::model::{Cart, CartItem};

#[derive(Debug, FromRow)]
pub struct CartEntity {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct CartItemEntity {
    pub cart_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
}

impl CartItemEntity {
    pub fn into_domain(self) -> CartItem {
        CartItem {
            product_id: self.product_id,
            quantity: self.quantity,
        }
    }
}

impl CartEntity {
    /// Items must already be in their stored order.
    pub fn into_domain(self, items: Vec<CartItemEntity>) -> Cart {
        Cart::from_repository(
            self.id,
            items.into_iter().map(CartItemEntity::into_domain).collect(),
            self.created_at,
            self.updated_at,
        )
    }
}
