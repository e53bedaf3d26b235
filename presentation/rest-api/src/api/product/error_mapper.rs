use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::product::errors::ProductError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for ProductError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let status = match &self {
            ProductError::MissingFields
            | ProductError::BlankField
            | ProductError::InvalidPrice
            | ProductError::InvalidStock
            | ProductError::NoFieldsToUpdate => StatusCode::BAD_REQUEST,
            ProductError::NotFound => StatusCode::NOT_FOUND,
            ProductError::TitleTaken => StatusCode::CONFLICT,
            ProductError::ImageStorageFailed | ProductError::Repository(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ErrorResponse::new(self.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use business::domain::errors::RepositoryError;

    #[test]
    fn should_map_validation_errors_to_bad_request() {
        let (status, body) = ProductError::InvalidPrice.into_error_response();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.0.status, "error");
        assert_eq!(body.0.message, "product.invalid_price");
    }

    #[test]
    fn should_map_title_clash_to_conflict() {
        let (status, body) = ProductError::TitleTaken.into_error_response();

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.0.message, "product.title_taken");
    }

    #[test]
    fn should_hide_repository_details() {
        let (status, body) =
            ProductError::Repository(RepositoryError::DatabaseError).into_error_response();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.0.message, "repository.persistence");
    }
}
