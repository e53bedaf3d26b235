use std::sync::Arc;

use chrono::Utc;
use poem_openapi::{Object, OpenApi, payload::Json};
use realtime::ProductHub;
use serde::Serialize;

use crate::api::tags::ApiTags;

#[derive(Debug, Clone, Serialize, Object)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResponse {
    pub status: String,
    /// RFC 3339 server time
    pub timestamp: String,
    pub version: String,
    /// Products held in the realtime cache
    pub cached_products: usize,
    /// Open websocket connections
    pub realtime_connections: usize,
}

/// Liveness check for the storefront.
pub struct HealthApi {
    hub: Arc<ProductHub>,
}

impl HealthApi {
    pub fn new(hub: Arc<ProductHub>) -> Self {
        Self { hub }
    }
}

#[OpenApi]
impl HealthApi {
    /// Service status
    #[oai(path = "/health", method = "get", tag = "ApiTags::Health")]
    async fn health_check(&self) -> Json<HealthCheckResponse> {
        Json(HealthCheckResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            cached_products: self.hub.cached_len(),
            realtime_connections: self.hub.subscriber_count(),
        })
    }
}
