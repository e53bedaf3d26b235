use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::cart::errors::CartError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for CartError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let status = match &self {
            CartError::InvalidQuantity | CartError::Empty => StatusCode::BAD_REQUEST,
            CartError::NotFound | CartError::ProductNotFound | CartError::ItemNotFound => {
                StatusCode::NOT_FOUND
            }
            CartError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ErrorResponse::new(self.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_empty_checkout_to_bad_request() {
        let (status, body) = CartError::Empty.into_error_response();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.0.message, "cart.empty");
    }

    #[test]
    fn should_map_missing_records_to_not_found() {
        for error in [
            CartError::NotFound,
            CartError::ProductNotFound,
            CartError::ItemNotFound,
        ] {
            assert_eq!(error.into_error_response().0, StatusCode::NOT_FOUND);
        }
    }
}
