use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub data_dir: PathBuf,
    pub api_secret: String,
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let data_dir = env::var("BIBLE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data/bible"));

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:8000,http://127.0.0.1:8000".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Self {
            bind_addr: env::var("BIBLE_BACKEND_BIND")
                .unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            data_dir,
            api_secret: env::var("API_SECRET").unwrap_or_else(|_| "dev-secret".to_string()),
            allowed_origins,
        }
    }
}
