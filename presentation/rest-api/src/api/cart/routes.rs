use std::sync::Arc;

use poem_openapi::{OpenApi, param::Path, payload::Json};
use uuid::Uuid;

use business::domain::cart::errors::CartError;
use business::domain::cart::model::Cart;
use business::domain::cart::use_cases::add_item::{AddCartItemParams, AddCartItemUseCase};
use business::domain::cart::use_cases::checkout::{CheckoutCartParams, CheckoutCartUseCase};
use business::domain::cart::use_cases::clear::{ClearCartParams, ClearCartUseCase};
use business::domain::cart::use_cases::create::CreateCartUseCase;
use business::domain::cart::use_cases::delete::{DeleteCartParams, DeleteCartUseCase};
use business::domain::cart::use_cases::get_all::GetAllCartsUseCase;
use business::domain::cart::use_cases::get_by_id::{GetCartByIdParams, GetCartByIdUseCase};
use business::domain::cart::use_cases::remove_item::{RemoveCartItemParams, RemoveCartItemUseCase};
use business::domain::cart::use_cases::set_quantity::{
    SetCartItemQuantityParams, SetCartItemQuantityUseCase,
};
use business::domain::cart::use_cases::update_quantity::{
    UpdateCartItemQuantityParams, UpdateCartItemQuantityUseCase,
};

use crate::api::cart::dto::{
    AddItemRequest, CartDetailsEnvelope, CartEnvelope, CartListEnvelope, QuantityRequest,
};
use crate::api::error::{ErrorResponse, IntoErrorResponse, MessageResponse};
use crate::api::tags::ApiTags;

/// Every cart use case the API exposes.
pub struct CartUseCases {
    pub create: Arc<dyn CreateCartUseCase>,
    pub get_all: Arc<dyn GetAllCartsUseCase>,
    pub get_by_id: Arc<dyn GetCartByIdUseCase>,
    pub add_item: Arc<dyn AddCartItemUseCase>,
    pub update_quantity: Arc<dyn UpdateCartItemQuantityUseCase>,
    pub set_quantity: Arc<dyn SetCartItemQuantityUseCase>,
    pub remove_item: Arc<dyn RemoveCartItemUseCase>,
    pub clear: Arc<dyn ClearCartUseCase>,
    pub checkout: Arc<dyn CheckoutCartUseCase>,
    pub delete: Arc<dyn DeleteCartUseCase>,
}

pub struct CartApi {
    use_cases: CartUseCases,
}

impl CartApi {
    pub fn new(use_cases: CartUseCases) -> Self {
        Self { use_cases }
    }
}

fn parse_cart_id(raw: &str) -> Result<Uuid, Json<ErrorResponse>> {
    Uuid::parse_str(raw).map_err(|_| ErrorResponse::invalid_id("cart.invalid_id"))
}

fn parse_line_ids(cart_id: &str, product_id: &str) -> Result<(Uuid, Uuid), Json<ErrorResponse>> {
    let cart_id = parse_cart_id(cart_id)?;
    let product_id =
        Uuid::parse_str(product_id).map_err(|_| ErrorResponse::invalid_id("product.invalid_id"))?;
    Ok((cart_id, product_id))
}

impl From<Result<Cart, CartError>> for CartMutationResponse {
    fn from(result: Result<Cart, CartError>) -> Self {
        match result {
            Ok(cart) => CartMutationResponse::Ok(Json(cart.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => CartMutationResponse::BadRequest(json),
                    404 => CartMutationResponse::NotFound(json),
                    _ => CartMutationResponse::InternalError(json),
                }
            }
        }
    }
}

impl CartAckResponse {
    fn from_result(result: Result<(), CartError>, message: &str) -> Self {
        match result {
            Ok(()) => CartAckResponse::Ok(MessageResponse::success(message)),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => CartAckResponse::BadRequest(json),
                    404 => CartAckResponse::NotFound(json),
                    _ => CartAckResponse::InternalError(json),
                }
            }
        }
    }
}

/// Cart API
///
/// Carts and their line items. Checkout empties the cart; no order is recorded.
#[OpenApi]
impl CartApi {
    /// Create an empty cart
    #[oai(path = "/carts", method = "post", tag = "ApiTags::Carts")]
    async fn create_cart(&self) -> CreateCartResponse {
        match self.use_cases.create.execute().await {
            Ok(cart) => CreateCartResponse::Created(Json(cart.into())),
            Err(err) => {
                let (_status, json) = err.into_error_response();
                CreateCartResponse::InternalError(json)
            }
        }
    }

    /// List all carts
    #[oai(path = "/carts", method = "get", tag = "ApiTags::Carts")]
    async fn get_all_carts(&self) -> GetAllCartsResponse {
        match self.use_cases.get_all.execute().await {
            Ok(carts) => GetAllCartsResponse::Ok(Json(carts.into())),
            Err(err) => {
                let (_status, json) = err.into_error_response();
                GetAllCartsResponse::InternalError(json)
            }
        }
    }

    /// Get a cart with product data on every line
    #[oai(path = "/carts/:id", method = "get", tag = "ApiTags::Carts")]
    async fn get_cart_by_id(&self, id: Path<String>) -> GetCartByIdResponse {
        let id = match parse_cart_id(&id.0) {
            Ok(id) => id,
            Err(json) => return GetCartByIdResponse::BadRequest(json),
        };

        match self.use_cases.get_by_id.execute(GetCartByIdParams { id }).await {
            Ok(details) => GetCartByIdResponse::Ok(Json(details.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    404 => GetCartByIdResponse::NotFound(json),
                    _ => GetCartByIdResponse::InternalError(json),
                }
            }
        }
    }

    /// Delete a cart
    #[oai(path = "/carts/:id", method = "delete", tag = "ApiTags::Carts")]
    async fn delete_cart(&self, id: Path<String>) -> CartAckResponse {
        let id = match parse_cart_id(&id.0) {
            Ok(id) => id,
            Err(json) => return CartAckResponse::BadRequest(json),
        };

        let result = self.use_cases.delete.execute(DeleteCartParams { id }).await;
        CartAckResponse::from_result(result, "cart.deleted")
    }

    /// Add a product to a cart
    ///
    /// Merges into the existing line when the product is already in the cart.
    #[oai(path = "/carts/:id/product/:pid", method = "post", tag = "ApiTags::Carts")]
    async fn add_item(
        &self,
        id: Path<String>,
        pid: Path<String>,
        body: Json<AddItemRequest>,
    ) -> CartMutationResponse {
        let (cart_id, product_id) = match parse_line_ids(&id.0, &pid.0) {
            Ok(ids) => ids,
            Err(json) => return CartMutationResponse::BadRequest(json),
        };

        self.use_cases
            .add_item
            .execute(AddCartItemParams {
                cart_id,
                product_id,
                quantity: body.0.quantity,
            })
            .await
            .into()
    }

    /// Change a line's quantity by a delta
    ///
    /// Fails without changes when the result would drop below one.
    #[oai(path = "/carts/:id/products/:pid", method = "put", tag = "ApiTags::Carts")]
    async fn update_item_quantity(
        &self,
        id: Path<String>,
        pid: Path<String>,
        body: Json<QuantityRequest>,
    ) -> CartMutationResponse {
        let (cart_id, product_id) = match parse_line_ids(&id.0, &pid.0) {
            Ok(ids) => ids,
            Err(json) => return CartMutationResponse::BadRequest(json),
        };

        self.use_cases
            .update_quantity
            .execute(UpdateCartItemQuantityParams {
                cart_id,
                product_id,
                delta: body.0.quantity,
            })
            .await
            .into()
    }

    /// Set a line's quantity
    #[oai(path = "/carts/:id/products/:pid", method = "patch", tag = "ApiTags::Carts")]
    async fn set_item_quantity(
        &self,
        id: Path<String>,
        pid: Path<String>,
        body: Json<QuantityRequest>,
    ) -> CartMutationResponse {
        let (cart_id, product_id) = match parse_line_ids(&id.0, &pid.0) {
            Ok(ids) => ids,
            Err(json) => return CartMutationResponse::BadRequest(json),
        };

        self.use_cases
            .set_quantity
            .execute(SetCartItemQuantityParams {
                cart_id,
                product_id,
                quantity: body.0.quantity,
            })
            .await
            .into()
    }

    /// Remove a product from a cart
    ///
    /// Succeeds when the product was not in the cart.
    #[oai(path = "/carts/:id/products/:pid", method = "delete", tag = "ApiTags::Carts")]
    async fn remove_item(&self, id: Path<String>, pid: Path<String>) -> CartMutationResponse {
        let (cart_id, product_id) = match parse_line_ids(&id.0, &pid.0) {
            Ok(ids) => ids,
            Err(json) => return CartMutationResponse::BadRequest(json),
        };

        self.use_cases
            .remove_item
            .execute(RemoveCartItemParams {
                cart_id,
                product_id,
            })
            .await
            .into()
    }

    /// Remove every line from a cart
    #[oai(path = "/carts/:id/products", method = "delete", tag = "ApiTags::Carts")]
    async fn clear_cart(&self, id: Path<String>) -> CartMutationResponse {
        let id = match parse_cart_id(&id.0) {
            Ok(id) => id,
            Err(json) => return CartMutationResponse::BadRequest(json),
        };

        self.use_cases
            .clear
            .execute(ClearCartParams { id })
            .await
            .into()
    }

    /// Check out a cart
    ///
    /// Rejects an empty cart; otherwise empties it.
    #[oai(path = "/carts/:id/checkout", method = "post", tag = "ApiTags::Carts")]
    async fn checkout(&self, id: Path<String>) -> CartAckResponse {
        let id = match parse_cart_id(&id.0) {
            Ok(id) => id,
            Err(json) => return CartAckResponse::BadRequest(json),
        };

        let result = self.use_cases.checkout.execute(CheckoutCartParams { id }).await;
        CartAckResponse::from_result(result, "cart.checked_out")
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum CreateCartResponse {
    #[oai(status = 201)]
    Created(Json<CartEnvelope>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetAllCartsResponse {
    #[oai(status = 200)]
    Ok(Json<CartListEnvelope>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetCartByIdResponse {
    #[oai(status = 200)]
    Ok(Json<CartDetailsEnvelope>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum CartMutationResponse {
    #[oai(status = 200)]
    Ok(Json<CartEnvelope>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum CartAckResponse {
    #[oai(status = 200)]
    Ok(Json<MessageResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}
