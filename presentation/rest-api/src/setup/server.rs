use poem::endpoint::StaticFilesEndpoint;
use poem::middleware::{Cors, Tracing};
use poem::web::Json;
use poem::{
    Endpoint, EndpointExt, IntoResponse, Route, Server as PoemServer, get, listener::TcpListener,
};
use poem_openapi::OpenApiService;

use crate::api::error::{ErrorResponse, framework_error_message};
use crate::gateway::socket;
use crate::views::pages;
use crate::{config::app_config::AppConfig, setup::dependency_injection::DependencyContainer};

pub struct Server;

impl Server {
    /// Assembles JSON API, docs, pages, websocket and static files into one endpoint.
    pub fn app(container: DependencyContainer, cors: Cors, server_url: String) -> impl Endpoint<Output = poem::Response> {
        let api_service = OpenApiService::new(
            (container.health_api, container.product_api, container.cart_api),
            "Storefront API",
            env!("CARGO_PKG_VERSION"),
        )
        .server(format!("{server_url}/api"));
        let ui = api_service.swagger_ui();
        let spec = api_service.spec_endpoint();

        Route::new()
            .nest("/api", api_service)
            .nest("/docs", ui)
            .at("/openapi.json", spec)
            .at("/", get(pages::home))
            .at("/home", get(pages::home))
            .at("/realtimeproducts", get(pages::realtime_products))
            .at("/dashboard", get(pages::dashboard))
            .at("/carts", get(pages::carts))
            .at("/carts/:id", get(pages::cart_detail))
            .at("/products/:id", get(pages::product_detail))
            .at("/ws", get(socket::websocket))
            .nest("/uploads", StaticFilesEndpoint::new(&container.uploads.directory))
            .nest(
                "/static",
                StaticFilesEndpoint::new(&container.uploads.static_directory),
            )
            .data(container.views)
            .data(container.gateway)
            .catch_all_error(|err: poem::Error| async move {
                let status = err.status();
                if status.is_server_error() {
                    tracing::error!(error = %err, "request failed");
                }
                (status, Json(ErrorResponse::new(framework_error_message(status)))).into_response()
            })
            .with(cors)
            .with(Tracing)
    }

    pub async fn run(config: AppConfig, container: DependencyContainer) -> anyhow::Result<()> {
        let addr = config.server.bind_address();
        let server_url = config.server.base_url();
        tracing::info!(products = container.hub.cached_len(), "catalog cached");

        let app = Self::app(container, config.cors, server_url.clone());

        tracing::info!("Server running at {server_url}");
        tracing::info!("Swagger UI at {server_url}/docs");
        tracing::info!("OpenAPI JSON at {server_url}/openapi.json");
        PoemServer::new(TcpListener::bind(&addr)).run(app).await?;
        Ok(())
    }
}
