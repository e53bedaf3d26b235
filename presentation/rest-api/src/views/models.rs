use business::domain::cart::model::{Cart, CartDetails, CartLine};
use business::domain::product::model::Product;

/// Product fields pre-formatted for the templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub code: String,
    pub price: String,
    pub stock: i64,
    pub category: String,
    pub image: Option<String>,
    pub available: bool,
    pub availability: &'static str,
    pub tags: Vec<String>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            description: product.description.clone(),
            code: product.code.clone(),
            price: format_money(product.price),
            stock: product.stock,
            category: product.category.clone(),
            image: product.main_thumbnail().map(str::to_string),
            available: product.status,
            availability: product.availability(),
            tags: product.tags.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CartLineView {
    pub product_id: String,
    pub product: Option<ProductView>,
    pub quantity: i32,
    pub subtotal: Option<String>,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id.to_string(),
            product: line.product.as_ref().map(ProductView::from),
            quantity: line.quantity,
            subtotal: line
                .product
                .as_ref()
                .map(|p| format_money(p.price * f64::from(line.quantity))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CartView {
    pub id: String,
    pub lines: Vec<CartLineView>,
    pub total_units: i64,
    pub total_price: String,
    pub updated_at: String,
}

impl From<&CartDetails> for CartView {
    fn from(details: &CartDetails) -> Self {
        Self {
            id: details.cart.id.to_string(),
            lines: details.lines.iter().map(CartLineView::from).collect(),
            total_units: details.cart.total_units(),
            total_price: format_money(details.total_price()),
            updated_at: format_timestamp(&details.cart),
        }
    }
}

/// One row of the carts overview.
#[derive(Debug, Clone)]
pub struct CartSummaryView {
    pub id: String,
    pub lines: usize,
    pub total_units: i64,
    pub updated_at: String,
}

impl From<&Cart> for CartSummaryView {
    fn from(cart: &Cart) -> Self {
        Self {
            id: cart.id.to_string(),
            lines: cart.items.len(),
            total_units: cart.total_units(),
            updated_at: format_timestamp(cart),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardUser {
    pub username: String,
    pub is_admin: bool,
}

impl DashboardUser {
    /// Stand-in until there is a login.
    pub fn guest() -> Self {
        Self {
            username: "invitado".to_string(),
            is_admin: false,
        }
    }
}

fn format_money(amount: f64) -> String {
    format!("{amount:.2}")
}

fn format_timestamp(cart: &Cart) -> String {
    cart.updated_at.format("%Y-%m-%d %H:%M").to_string()
}
