use poem::http::StatusCode;
use poem_openapi::{Object, payload::Json};
use serde::Serialize;

/// Failure envelope shared by every JSON endpoint. `message` is a code such as
/// `cart.not_found`.
#[derive(Object, Serialize, Debug)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }

    pub fn invalid_id(message: &str) -> Json<Self> {
        Json(Self::new(message))
    }
}

/// Acknowledgement for operations that return no resource.
#[derive(Object, Debug)]
pub struct MessageResponse {
    pub status: String,
    pub message: String,
}

impl MessageResponse {
    pub fn success(message: &str) -> Json<Self> {
        Json(Self {
            status: "success".to_string(),
            message: message.to_string(),
        })
    }
}

pub trait IntoErrorResponse {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>);
}

/// Maps failures raised by the framework itself (unknown routes, unparsable
/// bodies, bad multipart fields) onto the same envelope.
pub fn framework_error_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::NOT_FOUND => "route.not_found",
        StatusCode::METHOD_NOT_ALLOWED => "route.method_not_allowed",
        StatusCode::PAYLOAD_TOO_LARGE => "request.too_large",
        status if status.is_client_error() => "request.invalid",
        _ => "server.internal_error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_classify_framework_errors() {
        assert_eq!(framework_error_message(StatusCode::NOT_FOUND), "route.not_found");
        assert_eq!(framework_error_message(StatusCode::BAD_REQUEST), "request.invalid");
        assert_eq!(
            framework_error_message(StatusCode::UNSUPPORTED_MEDIA_TYPE),
            "request.invalid"
        );
        assert_eq!(
            framework_error_message(StatusCode::INTERNAL_SERVER_ERROR),
            "server.internal_error"
        );
    }
}
