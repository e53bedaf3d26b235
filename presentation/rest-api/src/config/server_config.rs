use std::env;

/// HTTP listener settings.
///
/// Environment variables:
/// - SERVICE_IP: IP address to bind (default: "127.0.0.1")
/// - SERVICE_PORT: Port to bind (default: "8080")
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub ip: String,
    pub port: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            ip: env::var("SERVICE_IP").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("SERVICE_PORT").unwrap_or_else(|_| "8080".to_string()),
        }
    }

    /// "ip:port"
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }

    /// Origin advertised in the OpenAPI document.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.bind_address())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ServerConfig {
        ServerConfig {
            ip: "0.0.0.0".to_string(),
            port: "3000".to_string(),
        }
    }

    #[test]
    fn should_create_bind_address_from_ip_and_port() {
        // Arrange
        let config = config();

        // Act
        let address = config.bind_address();

        // Assert
        assert_eq!(address, "0.0.0.0:3000");
    }

    #[test]
    fn should_prefix_base_url_with_scheme() {
        assert_eq!(config().base_url(), "http://0.0.0.0:3000");
    }
}
