use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use business::domain::cart::model::Cart;
use business::domain::cart::repository::CartRepository;
use business::domain::cart::value_objects::Quantity;
use business::domain::errors::RepositoryError;

use super::entity::{CartEntity, CartItemEntity};
use crate::db::{database_error, write_error};

pub struct CartRepositoryPostgres {
    pool: PgPool,
}

impl CartRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load(conn: &mut PgConnection, id: Uuid) -> Result<Cart, RepositoryError> {
        let cart = sqlx::query_as::<_, CartEntity>(
            "SELECT id, created_at, updated_at FROM carts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(database_error)?
        .ok_or(RepositoryError::NotFound)?;

        let items = sqlx::query_as::<_, CartItemEntity>(
            "SELECT cart_id, product_id, quantity FROM cart_items WHERE cart_id = $1 ORDER BY position",
        )
        .bind(id)
        .fetch_all(&mut *conn)
        .await
        .map_err(database_error)?;

        Ok(cart.into_domain(items))
    }

    /// Bumps `updated_at`; fails with `NotFound` when the cart does not exist.
    async fn touch(conn: &mut PgConnection, id: Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE carts SET updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl CartRepository for CartRepositoryPostgres {
    async fn get_all(&self) -> Result<Vec<Cart>, RepositoryError> {
        let carts = sqlx::query_as::<_, CartEntity>(
            "SELECT id, created_at, updated_at FROM carts ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        let items = sqlx::query_as::<_, CartItemEntity>(
            "SELECT cart_id, product_id, quantity FROM cart_items ORDER BY position",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        let mut by_cart: HashMap<Uuid, Vec<CartItemEntity>> = HashMap::new();
        for item in items {
            by_cart.entry(item.cart_id).or_default().push(item);
        }

        Ok(carts
            .into_iter()
            .map(|cart| {
                let items = by_cart.remove(&cart.id).unwrap_or_default();
                cart.into_domain(items)
            })
            .collect())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Cart, RepositoryError> {
        let mut conn = self.pool.acquire().await.map_err(database_error)?;
        Self::load(&mut conn, id).await
    }

    async fn create(&self, cart: &Cart) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO carts (id, created_at, updated_at) VALUES ($1, $2, $3)")
            .bind(cart.id)
            .bind(cart.created_at)
            .bind(cart.updated_at)
            .execute(&self.pool)
            .await
            .map_err(write_error)?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM carts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
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
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        Self::touch(&mut tx, cart_id).await?;
        sqlx::query(
            r#"INSERT INTO cart_items (cart_id, product_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (cart_id, product_id)
            DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity"#,
        )
        .bind(cart_id)
        .bind(product_id)
        .bind(quantity.value())
        .execute(&mut *tx)
        .await
        .map_err(write_error)?;

        let cart = Self::load(&mut tx, cart_id).await?;
        tx.commit().await.map_err(database_error)?;
        Ok(cart)
    }

    async fn adjust_item_quantity(
        &self,
        cart_id: Uuid,
        product_id: Uuid,
        delta: i32,
    ) -> Result<Option<Cart>, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        Self::touch(&mut tx, cart_id).await?;
        let result = sqlx::query(
            r#"UPDATE cart_items SET quantity = quantity + $3
            WHERE cart_id = $1 AND product_id = $2 AND quantity + $3 >= 1"#,
        )
        .bind(cart_id)
        .bind(product_id)
        .bind(delta)
        .execute(&mut *tx)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            tx.rollback().await.map_err(database_error)?;
            return Ok(None);
        }

        let cart = Self::load(&mut tx, cart_id).await?;
        tx.commit().await.map_err(database_error)?;
        Ok(Some(cart))
    }

    async fn set_item_quantity(
        &self,
        cart_id: Uuid,
        product_id: Uuid,
        quantity: Quantity,
    ) -> Result<Option<Cart>, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        Self::touch(&mut tx, cart_id).await?;
        let result = sqlx::query(
            "UPDATE cart_items SET quantity = $3 WHERE cart_id = $1 AND product_id = $2",
        )
        .bind(cart_id)
        .bind(product_id)
        .bind(quantity.value())
        .execute(&mut *tx)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            tx.rollback().await.map_err(database_error)?;
            return Ok(None);
        }

        let cart = Self::load(&mut tx, cart_id).await?;
        tx.commit().await.map_err(database_error)?;
        Ok(Some(cart))
    }

    async fn remove_item(&self, cart_id: Uuid, product_id: Uuid) -> Result<Cart, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        Self::touch(&mut tx, cart_id).await?;
        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1 AND product_id = $2")
            .bind(cart_id)
            .bind(product_id)
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

        let cart = Self::load(&mut tx, cart_id).await?;
        tx.commit().await.map_err(database_error)?;
        Ok(cart)
    }

    async fn clear(&self, cart_id: Uuid) -> Result<Cart, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        Self::touch(&mut tx, cart_id).await?;
        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart_id)
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

        let cart = Self::load(&mut tx, cart_id).await?;
        tx.commit().await.map_err(database_error)?;
        Ok(cart)
    }
}
