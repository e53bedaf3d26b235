use super::{
    cors_config, realtime_config::RealtimeConfig, server_config::ServerConfig,
    storage_config::StorageConfig, upload_config::UploadConfig,
};
use poem::middleware::Cors;

pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: Cors,
    pub storage: StorageConfig,
    pub uploads: UploadConfig,
    pub realtime: RealtimeConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            server: ServerConfig::from_env(),
            cors: cors_config::init_cors(),
            storage: StorageConfig::from_env()?,
            uploads: UploadConfig::from_env(),
            realtime: RealtimeConfig::from_env(),
        })
    }
}
