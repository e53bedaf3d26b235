use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use num_traits::{FromPrimitive, ToPrimitive};
use sqlx::FromRow;
use uuid::Uuid;

use business::domain::errors::RepositoryError;
use business::domain::product::model::Product;

pub const PRODUCT_COLUMNS: &str = "id, title, description, code, price, stock, category, thumbnail, thumbnails, status, tags, created_at";

#[derive(Debug, FromRow)]
pub struct ProductEntity {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub code: String,
    pub price: BigDecimal,
    pub stock: i64,
    pub category: String,
    pub thumbnail: Option<String>,
    pub thumbnails: Vec<String>,
    pub status: bool,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl ProductEntity {
    pub fn into_domain(self) -> Product {
        Product::from_repository(
            self.id,
            self.title,
            self.description,
            self.code,
            self.price.to_f64().unwrap_or_default(),
            self.stock,
            self.category,
            self.thumbnail,
            self.thumbnails,
            self.status,
            self.tags,
            self.created_at,
        )
    }
}

/// Converts a validated domain price into the NUMERIC column type.
pub fn price_to_decimal(price: f64) -> Result<BigDecimal, RepositoryError> {
    BigDecimal::from_f64(price)
        .map(|decimal| decimal.round(2))
        .ok_or(RepositoryError::Persistence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_round_price_to_cents() {
        let decimal = price_to_decimal(10.456).unwrap();

        assert_eq!(decimal.to_f64(), Some(10.46));
    }

    #[test]
    fn should_reject_non_finite_price() {
        assert!(matches!(
            price_to_decimal(f64::NAN),
            Err(RepositoryError::Persistence)
        ));
    }
}
