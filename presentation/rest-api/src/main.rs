use dotenvy::dotenv;

mod api {
    pub mod error;
    pub mod tags;
    pub mod cart {
        pub mod dto;
        pub mod error_mapper;
        pub mod routes;
    }
    pub mod health {
        pub mod routes;
    }
    pub mod product {
        pub mod dto;
        pub mod error_mapper;
        pub mod routes;
    }
}
mod config {
    pub mod app_config;
    pub mod cors_config;
    pub mod realtime_config;
    pub mod server_config;
    pub mod storage_config;
    pub mod upload_config;
}
mod gateway {
    pub mod messages;
    pub mod socket;
}
mod setup {
    pub mod dependency_injection;
    pub mod server;
}
mod views {
    pub mod models;
    pub mod pages;
}

use config::app_config::AppConfig;
use setup::{dependency_injection::DependencyContainer, server::Server};

/// Storefront entry point
///
/// - config/: environment-driven settings (server, CORS, storage, uploads, realtime)
/// - setup/: dependency injection and route assembly
/// - api/: JSON endpoints, DTOs and error mappers
/// - views/: server-rendered pages
/// - gateway/: websocket bridge to the product hub
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing with RUST_LOG env filter
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // 2. Load environment variables
    dotenv().ok();

    // 3. Load configuration
    let config = AppConfig::from_env()?;

    // 4. Wire dependencies (connects storage and primes the product cache)
    let container = DependencyContainer::new(&config).await?;

    // 5. Run server
    Server::run(config, container).await?;

    Ok(())
}
