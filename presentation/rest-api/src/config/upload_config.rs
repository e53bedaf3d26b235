use std::env;
use std::path::PathBuf;

pub const UPLOADS_PUBLIC_PREFIX: &str = "/uploads";

/// Environment variables:
/// - UPLOADS_DIR: directory for product images (default: "public/uploads")
/// - STATIC_DIR: directory with page assets served under /static (default: "public")
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub directory: PathBuf,
    pub static_directory: PathBuf,
}

impl UploadConfig {
    pub fn from_env() -> Self {
        Self {
            directory: env::var("UPLOADS_DIR")
                .unwrap_or_else(|_| "public/uploads".to_string())
                .into(),
            static_directory: env::var("STATIC_DIR")
                .unwrap_or_else(|_| "public".to_string())
                .into(),
        }
    }
}
