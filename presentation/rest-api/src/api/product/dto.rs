use chrono::{DateTime, Utc};
use poem_openapi::{Multipart, Object, types::multipart::Upload};
use serde::Serialize;
use url::form_urlencoded;
use uuid::Uuid;

use business::domain::product::model::{NewProductProps, Product, ProductChanges};
use business::domain::product::query::{Page, ProductListQuery};

#[derive(Debug, Clone, Serialize, Object)]
#[serde(rename_all = "camelCase")]
#[oai(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub code: String,
    pub price: f64,
    pub stock: i64,
    pub category: String,
    pub thumbnail: Option<String>,
    pub thumbnails: Vec<String>,
    /// `thumbnail`, else the first of `thumbnails`.
    pub main_thumbnail: Option<String>,
    pub status: bool,
    /// `available` or `unavailable`.
    pub availability: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            main_thumbnail: product.main_thumbnail().map(str::to_string),
            availability: product.availability().to_string(),
            id: product.id,
            title: product.title,
            description: product.description,
            code: product.code,
            price: product.price,
            stock: product.stock,
            category: product.category,
            thumbnail: product.thumbnail,
            thumbnails: product.thumbnails,
            status: product.status,
            tags: product.tags,
            created_at: product.created_at,
        }
    }
}

#[derive(Debug, Object)]
pub struct ProductEnvelope {
    pub status: String,
    pub payload: ProductResponse,
}

impl From<Product> for ProductEnvelope {
    fn from(product: Product) -> Self {
        Self {
            status: "success".to_string(),
            payload: product.into(),
        }
    }
}

/// One page of the catalog with navigation metadata.
#[derive(Debug, Object)]
#[oai(rename_all = "camelCase")]
pub struct ProductPageEnvelope {
    pub status: String,
    pub payload: Vec<ProductResponse>,
    pub total_pages: u32,
    pub page: u32,
    pub prev_page: Option<u32>,
    pub next_page: Option<u32>,
    pub has_prev_page: bool,
    pub has_next_page: bool,
    pub prev_link: Option<String>,
    pub next_link: Option<String>,
}

impl ProductPageEnvelope {
    pub fn new(page: Page<Product>, query: &ProductListQuery) -> Self {
        Self {
            status: "success".to_string(),
            total_pages: page.total_pages(),
            page: page.page,
            prev_page: page.prev_page(),
            next_page: page.next_page(),
            has_prev_page: page.has_prev_page(),
            has_next_page: page.has_next_page(),
            prev_link: page.prev_page().map(|target| page_link(target, query)),
            next_link: page.next_page().map(|target| page_link(target, query)),
            payload: page.items.into_iter().map(ProductResponse::from).collect(),
        }
    }
}

/// Relative link to another page of the same listing, keeping limit, filter and sort.
pub fn page_link(target: u32, query: &ProductListQuery) -> String {
    let mut params = form_urlencoded::Serializer::new(String::new());
    params.append_pair("page", &target.to_string());
    params.append_pair("limit", &query.page.limit.to_string());
    if let Some(filter) = &query.filter {
        params.append_pair("query", &filter.text);
    }
    if let Some(sort) = query.sort {
        params.append_pair("sort", sort.as_str());
    }
    format!("/api/products?{}", params.finish())
}

/// Multipart form for product creation. Numbers arrive as text and are
/// validated by the domain.
#[derive(Debug, Multipart)]
pub struct CreateProductForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub price: Option<String>,
    pub stock: Option<String>,
    pub category: Option<String>,
    pub status: Option<bool>,
    pub tags: Vec<String>,
    pub thumbnail: Option<Upload>,
}

impl CreateProductForm {
    /// Splits the form into validated-later props and the optional image.
    pub fn into_parts(self) -> (NewProductProps, Option<Upload>) {
        let props = NewProductProps {
            title: self.title,
            description: self.description,
            code: self.code,
            price: self.price,
            stock: self.stock,
            category: self.category,
            thumbnail: None,
            thumbnails: Vec::new(),
            status: self.status,
            tags: self.tags,
        };
        (props, self.thumbnail)
    }
}

#[derive(Debug, Object)]
pub struct UpdateProductRequest {
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

impl From<UpdateProductRequest> for ProductChanges {
    fn from(request: UpdateProductRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            code: request.code,
            price: request.price,
            stock: request.stock,
            category: request.category,
            thumbnail: request.thumbnail,
            thumbnails: request.thumbnails,
            status: request.status,
            tags: request.tags,
        }
    }
}
