use anyhow::{Context, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Backend
    pub api_base_url: String,
    pub ws_url: String,
    pub request_timeout_secs: u64,
    pub ws_connect_timeout_secs: u64,

    // Durable client storage
    pub storage_path: String,

    // Query cache staleness windows
    pub public_stale_secs: u64,
    pub admin_stale_secs: u64,

    // Admin routing
    pub admin_login_route: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_base_url = std::env::var("API_BASE_URL")
            .context("API_BASE_URL not set")?
            .trim_end_matches('/')
            .to_string();

        let ws_url = match std::env::var("WS_URL") {
            Ok(url) => url,
            Err(_) => derive_ws_url(&api_base_url)?,
        };

        Ok(Self {
            ws_url,
            request_timeout_secs: env_u64("REQUEST_TIMEOUT_SECS", 30),
            ws_connect_timeout_secs: env_u64("WS_CONNECT_TIMEOUT_SECS", 10),
            api_base_url,

            storage_path: std::env::var("STORAGE_PATH")
                .unwrap_or_else(|_| "data/client-storage.json".to_string()),

            public_stale_secs: env_u64("PUBLIC_STALE_SECS", 300),
            admin_stale_secs: env_u64("ADMIN_STALE_SECS", 60),

            admin_login_route: std::env::var("ADMIN_LOGIN_ROUTE")
                .unwrap_or_else(|_| "/admin/login".to_string()),
        })
    }

    pub fn public_stale_time(&self) -> Duration {
        Duration::from_secs(self.public_stale_secs)
    }

    pub fn admin_stale_time(&self) -> Duration {
        Duration::from_secs(self.admin_stale_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn ws_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.ws_connect_timeout_secs)
    }
}

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Map the API base URL onto the live-update endpoint on the same host.
fn derive_ws_url(api_base_url: &str) -> Result<String> {
    let (scheme, rest) = if let Some(rest) = api_base_url.strip_prefix("https://") {
        ("wss", rest)
    } else if let Some(rest) = api_base_url.strip_prefix("http://") {
        ("ws", rest)
    } else {
        anyhow::bail!(
            "API_BASE_URL must start with http:// or https://, got {}",
            api_base_url
        );
    };

    let host = rest.split('/').next().unwrap_or(rest);
    Ok(format!("{}://{}/ws", scheme, host))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in [
            "API_BASE_URL",
            "WS_URL",
            "STORAGE_PATH",
            "PUBLIC_STALE_SECS",
            "ADMIN_STALE_SECS",
            "REQUEST_TIMEOUT_SECS",
            "WS_CONNECT_TIMEOUT_SECS",
            "ADMIN_LOGIN_ROUTE",
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_derive_ws_url_http() {
        assert_eq!(
            derive_ws_url("http://localhost:8000/api").unwrap(),
            "ws://localhost:8000/ws"
        );
    }

    #[test]
    fn test_derive_ws_url_https_without_path() {
        assert_eq!(
            derive_ws_url("https://example.uz").unwrap(),
            "wss://example.uz/ws"
        );
    }

    #[test]
    fn test_derive_ws_url_rejects_other_schemes() {
        assert!(derive_ws_url("ftp://example.uz").is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_requires_api_base_url() {
        clear_env();
        let result = Config::from_env();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("API_BASE_URL"));
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        std::env::set_var("API_BASE_URL", "http://localhost:8000/api/");

        let config = Config::from_env().expect("config should load");
        assert_eq!(config.api_base_url, "http://localhost:8000/api");
        assert_eq!(config.ws_url, "ws://localhost:8000/ws");
        assert_eq!(config.public_stale_time(), Duration::from_secs(300));
        assert_eq!(config.admin_stale_time(), Duration::from_secs(60));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.ws_connect_timeout(), Duration::from_secs(10));
        assert_eq!(config.admin_login_route, "/admin/login");
        assert_eq!(config.storage_path, "data/client-storage.json");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("API_BASE_URL", "https://example.uz/api");
        std::env::set_var("WS_URL", "wss://live.example.uz/socket");
        std::env::set_var("ADMIN_STALE_SECS", "15");
        std::env::set_var("PUBLIC_STALE_SECS", "not-a-number");
        std::env::set_var("WS_CONNECT_TIMEOUT_SECS", "3");

        let config = Config::from_env().expect("config should load");
        assert_eq!(config.ws_url, "wss://live.example.uz/socket");
        assert_eq!(config.admin_stale_secs, 15);
        assert_eq!(config.public_stale_secs, 300);
        assert_eq!(config.ws_connect_timeout(), Duration::from_secs(3));

        clear_env();
    }
}
