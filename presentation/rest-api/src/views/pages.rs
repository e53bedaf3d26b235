use std::sync::Arc;

use askama::Template;
use poem::http::StatusCode;
use poem::web::{Data, Html, Path};
use poem::{IntoResponse, Response, handler};
use uuid::Uuid;

use business::domain::cart::errors::CartError;
use business::domain::cart::use_cases::get_all::GetAllCartsUseCase;
use business::domain::cart::use_cases::get_by_id::{GetCartByIdParams, GetCartByIdUseCase};
use business::domain::product::errors::ProductError;
use business::domain::product::model::Product;
use business::domain::product::use_cases::get_all::GetAllProductsUseCase;
use business::domain::product::use_cases::get_by_id::{
    GetProductByIdParams, GetProductByIdUseCase,
};

use super::models::{CartSummaryView, CartView, DashboardUser, ProductView};

/// Read-side use cases behind the server-rendered pages.
pub struct ViewState {
    pub get_all_products: Arc<dyn GetAllProductsUseCase>,
    pub get_product_by_id: Arc<dyn GetProductByIdUseCase>,
    pub get_all_carts: Arc<dyn GetAllCartsUseCase>,
    pub get_cart_by_id: Arc<dyn GetCartByIdUseCase>,
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductView>,
}

#[derive(Template)]
#[template(path = "realtime_products.html")]
pub struct RealtimeProductsTemplate {
    pub products: Vec<ProductView>,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub user: DashboardUser,
    pub products: Vec<ProductView>,
}

#[derive(Template)]
#[template(path = "carts.html")]
pub struct CartsTemplate {
    pub carts: Vec<CartSummaryView>,
}

#[derive(Template)]
#[template(path = "cart.html")]
pub struct CartTemplate {
    pub cart: CartView,
}

#[derive(Template)]
#[template(path = "product_detail.html")]
pub struct ProductDetailTemplate {
    pub product: ProductView,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub status: u16,
    pub message: String,
}

fn render<T: Template>(template: &T, status: StatusCode) -> Response {
    match template.render() {
        Ok(html) => Html(html).with_status(status).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to render template");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub fn error_page(status: StatusCode, message: &str) -> Response {
    render(
        &ErrorTemplate {
            status: status.as_u16(),
            message: message.to_string(),
        },
        status,
    )
}

fn product_views(products: &[Product]) -> Vec<ProductView> {
    products.iter().map(ProductView::from).collect()
}

fn catalog_failure(err: ProductError) -> Response {
    tracing::error!(error = %err, "failed to load catalog for view");
    error_page(
        StatusCode::INTERNAL_SERVER_ERROR,
        "No se pudieron cargar los productos",
    )
}

#[handler]
pub async fn home(state: Data<&Arc<ViewState>>) -> Response {
    match state.get_all_products.execute().await {
        Ok(products) => render(
            &HomeTemplate {
                products: product_views(&products),
            },
            StatusCode::OK,
        ),
        Err(err) => catalog_failure(err),
    }
}

#[handler]
pub async fn realtime_products(state: Data<&Arc<ViewState>>) -> Response {
    match state.get_all_products.execute().await {
        Ok(products) => render(
            &RealtimeProductsTemplate {
                products: product_views(&products),
            },
            StatusCode::OK,
        ),
        Err(err) => catalog_failure(err),
    }
}

#[handler]
pub async fn dashboard(state: Data<&Arc<ViewState>>) -> Response {
    match state.get_all_products.execute().await {
        Ok(products) => render(
            &DashboardTemplate {
                user: DashboardUser::guest(),
                products: product_views(&products),
            },
            StatusCode::OK,
        ),
        Err(err) => catalog_failure(err),
    }
}

#[handler]
pub async fn product_detail(state: Data<&Arc<ViewState>>, Path(id): Path<String>) -> Response {
    let Ok(id) = Uuid::parse_str(&id) else {
        return error_page(StatusCode::NOT_FOUND, "Producto no encontrado");
    };

    match state
        .get_product_by_id
        .execute(GetProductByIdParams { id })
        .await
    {
        Ok(product) => render(
            &ProductDetailTemplate {
                product: ProductView::from(&product),
            },
            StatusCode::OK,
        ),
        Err(ProductError::NotFound) => error_page(StatusCode::NOT_FOUND, "Producto no encontrado"),
        Err(err) => {
            tracing::error!(error = %err, %id, "failed to load product for view");
            error_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                "No se pudo cargar el producto",
            )
        }
    }
}

#[handler]
pub async fn carts(state: Data<&Arc<ViewState>>) -> Response {
    match state.get_all_carts.execute().await {
        Ok(carts) => render(
            &CartsTemplate {
                carts: carts.iter().map(CartSummaryView::from).collect(),
            },
            StatusCode::OK,
        ),
        Err(err) => {
            tracing::error!(error = %err, "failed to load carts for view");
            error_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                "No se pudieron cargar los carritos",
            )
        }
    }
}

#[handler]
pub async fn cart_detail(state: Data<&Arc<ViewState>>, Path(id): Path<String>) -> Response {
    let Ok(id) = Uuid::parse_str(&id) else {
        return error_page(StatusCode::NOT_FOUND, "Carrito no encontrado");
    };

    match state.get_cart_by_id.execute(GetCartByIdParams { id }).await {
        Ok(details) => render(
            &CartTemplate {
                cart: CartView::from(&details),
            },
            StatusCode::OK,
        ),
        Err(CartError::NotFound) => error_page(StatusCode::NOT_FOUND, "Carrito no encontrado"),
        Err(err) => {
            tracing::error!(error = %err, %id, "failed to load cart for view");
            error_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                "No se pudo cargar el carrito",
            )
        }
    }
}
