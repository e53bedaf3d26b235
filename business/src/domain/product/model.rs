use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::ProductError;

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub code: String,
    pub price: f64,
    pub stock: i64,
    pub category: String,
    pub thumbnail: Option<String>,
    pub thumbnails: Vec<String>,
    pub status: bool,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Raw, unvalidated input for a new product.
///
/// Numeric fields arrive as text because both the multipart form and the
/// realtime channel deliver them that way.
#[derive(Debug, Clone, Default)]
pub struct NewProductProps {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub price: Option<String>,
    pub stock: Option<String>,
    pub category: Option<String>,
    pub thumbnail: Option<String>,
    pub thumbnails: Vec<String>,
    pub status: Option<bool>,
    pub tags: Vec<String>,
}

impl Product {
    pub fn new(props: NewProductProps) -> Result<Self, ProductError> {
        let title = required(props.title)?;
        let description = required(props.description)?;
        let code = required(props.code)?;
        let raw_price = required(props.price)?;
        let raw_stock = required(props.stock)?;
        let category = required(props.category)?;

        let price = parse_price(&raw_price)?;
        let stock = parse_stock(&raw_stock)?;

        Ok(Self {
            id: Uuid::new_v4(),
            title,
            description,
            code,
            price,
            stock,
            category,
            thumbnail: props.thumbnail,
            thumbnails: props.thumbnails,
            status: props.status.unwrap_or(true),
            tags: props.tags,
            created_at: Utc::now(),
        })
    }

    /// Constructor for data already persisted in the repository (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn from_repository(
        id: Uuid,
        title: String,
        description: String,
        code: String,
        price: f64,
        stock: i64,
        category: String,
        thumbnail: Option<String>,
        thumbnails: Vec<String>,
        status: bool,
        tags: Vec<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            code,
            price,
            stock,
            category,
            thumbnail,
            thumbnails,
            status,
            tags,
            created_at,
        }
    }

    /// The image shown first: the dedicated thumbnail, else the first gallery image.
    pub fn main_thumbnail(&self) -> Option<&str> {
        self.thumbnail
            .as_deref()
            .or_else(|| self.thumbnails.first().map(String::as_str))
    }

    pub fn availability(&self) -> &'static str {
        if self.status {
            "available"
        } else {
            "unavailable"
        }
    }
}

/// A partial update. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub category: Option<String>,
    pub thumbnail: Option<String>,
    pub thumbnails: Option<Vec<String>>,
    pub status: Option<bool>,
    pub tags: Option<Vec<String>>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.code.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.category.is_none()
            && self.thumbnail.is_none()
            && self.thumbnails.is_none()
            && self.status.is_none()
            && self.tags.is_none()
    }

    /// Checks the supplied fields and rounds a new price to cents.
    pub fn validated(mut self) -> Result<Self, ProductError> {
        if self.is_empty() {
            return Err(ProductError::NoFieldsToUpdate);
        }

        let text_fields = [&self.title, &self.description, &self.code, &self.category];
        if text_fields
            .iter()
            .any(|field| field.as_deref().is_some_and(|v| v.trim().is_empty()))
        {
            return Err(ProductError::BlankField);
        }

        if let Some(price) = self.price {
            self.price = Some(normalize_price(price)?);
        }
        if let Some(stock) = self.stock
            && stock < 0
        {
            return Err(ProductError::InvalidStock);
        }

        Ok(self)
    }

    /// Applies the supplied fields to `product`, leaving the rest untouched.
    /// The creation timestamp and identifier are never changed.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(title) = &self.title {
            product.title = title.clone();
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
        if let Some(code) = &self.code {
            product.code = code.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(category) = &self.category {
            product.category = category.clone();
        }
        if let Some(thumbnail) = &self.thumbnail {
            product.thumbnail = Some(thumbnail.clone());
        }
        if let Some(thumbnails) = &self.thumbnails {
            product.thumbnails = thumbnails.clone();
        }
        if let Some(status) = self.status {
            product.status = status;
        }
        if let Some(tags) = &self.tags {
            product.tags = tags.clone();
        }
    }
}

fn required(value: Option<String>) -> Result<String, ProductError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ProductError::MissingFields),
    }
}

/// Largest price a `NUMERIC(12, 2)` column holds.
pub const MAX_PRICE: f64 = 9_999_999_999.99;

pub fn parse_price(raw: &str) -> Result<f64, ProductError> {
    let price = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| ProductError::InvalidPrice)?;
    normalize_price(price)
}

/// Rounds to cents. The rounded value must be positive and fit the store.
pub fn normalize_price(price: f64) -> Result<f64, ProductError> {
    if !price.is_finite() {
        return Err(ProductError::InvalidPrice);
    }
    let rounded = (price * 100.0).round() / 100.0;
    if rounded <= 0.0 || rounded > MAX_PRICE {
        return Err(ProductError::InvalidPrice);
    }
    Ok(rounded)
}

pub fn parse_stock(raw: &str) -> Result<i64, ProductError> {
    let stock = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| ProductError::InvalidStock)?;
    if stock < 0 {
        return Err(ProductError::InvalidStock);
    }
    Ok(stock)
}
