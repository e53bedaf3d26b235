use chrono::{DateTime, Utc};
use poem_openapi::Object;
use uuid::Uuid;

use business::domain::cart::model::{Cart, CartDetails, CartItem, CartLine};

use crate::api::product::dto::ProductResponse;

#[derive(Debug, Object)]
#[oai(rename_all = "camelCase")]
pub struct CartItemResponse {
    pub product_id: Uuid,
    pub quantity: i32,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            product_id: item.product_id,
            quantity: item.quantity,
        }
    }
}

#[derive(Debug, Object)]
#[oai(rename_all = "camelCase")]
pub struct CartResponse {
    pub id: Uuid,
    pub items: Vec<CartItemResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            id: cart.id,
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
            created_at: cart.created_at,
            updated_at: cart.updated_at,
        }
    }
}

/// A line item with its product. `product` is null when the product no longer exists.
#[derive(Debug, Object)]
#[oai(rename_all = "camelCase")]
pub struct CartLineResponse {
    pub product_id: Uuid,
    pub quantity: i32,
    pub product: Option<ProductResponse>,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            product_id: line.product_id,
            quantity: line.quantity,
            product: line.product.map(ProductResponse::from),
        }
    }
}

#[derive(Debug, Object)]
#[oai(rename_all = "camelCase")]
pub struct CartDetailsResponse {
    pub id: Uuid,
    pub items: Vec<CartLineResponse>,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CartDetails> for CartDetailsResponse {
    fn from(details: CartDetails) -> Self {
        Self {
            total_price: details.total_price(),
            id: details.cart.id,
            created_at: details.cart.created_at,
            updated_at: details.cart.updated_at,
            items: details.lines.into_iter().map(CartLineResponse::from).collect(),
        }
    }
}

#[derive(Debug, Object)]
pub struct CartEnvelope {
    pub status: String,
    pub payload: CartResponse,
}

impl From<Cart> for CartEnvelope {
    fn from(cart: Cart) -> Self {
        Self {
            status: "success".to_string(),
            payload: cart.into(),
        }
    }
}

#[derive(Debug, Object)]
pub struct CartDetailsEnvelope {
    pub status: String,
    pub payload: CartDetailsResponse,
}

impl From<CartDetails> for CartDetailsEnvelope {
    fn from(details: CartDetails) -> Self {
        Self {
            status: "success".to_string(),
            payload: details.into(),
        }
    }
}

#[derive(Debug, Object)]
pub struct CartListEnvelope {
    pub status: String,
    pub payload: Vec<CartResponse>,
}

impl From<Vec<Cart>> for CartListEnvelope {
    fn from(carts: Vec<Cart>) -> Self {
        Self {
            status: "success".to_string(),
            payload: carts.into_iter().map(CartResponse::from).collect(),
        }
    }
}

/// Body of the add-item route. `quantity` defaults to 1.
#[derive(Debug, Default, Object)]
pub struct AddItemRequest {
    pub quantity: Option<i64>,
}

/// Body of the quantity routes: a delta for PUT, an absolute value for PATCH.
#[derive(Debug, Object)]
pub struct QuantityRequest {
    pub quantity: i64,
}
