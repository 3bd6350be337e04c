use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_CREDENTIAL_STORE_PATH: &str = ".auction-web/credentials.json";

/// 환경 변수 기반 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub bind_addr: String,
    pub credential_store_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            credential_store_path: PathBuf::from(DEFAULT_CREDENTIAL_STORE_PATH),
        }
    }
}

impl AppConfig {
    /// 설정 로드, 없는 값은 기본값을 쓴다.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();
        Self {
            api_base_url: read("API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            bind_addr: read("BIND_ADDR").unwrap_or(defaults.bind_addr),
            credential_store_path: read("CREDENTIAL_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.credential_store_path),
        }
    }
}
