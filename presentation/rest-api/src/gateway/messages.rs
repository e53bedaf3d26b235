use serde::{Deserialize, Serialize};
use uuid::Uuid;

use business::domain::product::events::ProductEvent;
use business::domain::product::model::{NewProductProps, Product};

use crate::api::product::dto::ProductResponse;

/// Frames pushed to browsers as `{"event": ..., "data": ...}`.
#[derive(Debug, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerMessage {
    #[serde(rename = "product-list")]
    ProductList(Vec<ProductResponse>),
    #[serde(rename = "productAdded")]
    ProductAdded(ProductResponse),
    #[serde(rename = "productUpdated")]
    ProductUpdated(ProductResponse),
    #[serde(rename = "productDeleted")]
    ProductDeleted(Uuid),
    #[serde(rename = "error")]
    Error { message: String },
}

impl ServerMessage {
    pub fn product_list(products: Vec<Product>) -> Self {
        ServerMessage::ProductList(products.into_iter().map(ProductResponse::from).collect())
    }

    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            message: message.into(),
        }
    }
}

impl From<&ProductEvent> for ServerMessage {
    fn from(event: &ProductEvent) -> Self {
        match event {
            ProductEvent::Added(product) => ServerMessage::ProductAdded(product.clone().into()),
            ProductEvent::Updated(product) => ServerMessage::ProductUpdated(product.clone().into()),
            ProductEvent::Deleted(id) => ServerMessage::ProductDeleted(*id),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientMessage {
    #[serde(rename = "newProduct")]
    NewProduct(NewProductPayload),
    #[serde(rename = "deleteProduct")]
    DeleteProduct(String),
}

/// Form values typed into the realtime page. Browsers may send numbers either
/// as JSON numbers or as the raw input text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewProductPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub price: Option<NumberOrText>,
    pub stock: Option<NumberOrText>,
    pub category: Option<String>,
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub thumbnails: Vec<String>,
    pub status: Option<bool>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(serde_json::Number),
    Text(String),
}

impl NumberOrText {
    fn into_text(self) -> String {
        match self {
            NumberOrText::Number(number) => number.to_string(),
            NumberOrText::Text(text) => text,
        }
    }
}

impl From<NewProductPayload> for NewProductProps {
    fn from(payload: NewProductPayload) -> Self {
        Self {
            title: payload.title,
            description: payload.description,
            code: payload.code,
            price: payload.price.map(NumberOrText::into_text),
            stock: payload.stock.map(NumberOrText::into_text),
            category: payload.category,
            thumbnail: payload.thumbnail.filter(|t| !t.trim().is_empty()),
            thumbnails: payload.thumbnails,
            status: payload.status,
            tags: payload.tags,
        }
    }
}
