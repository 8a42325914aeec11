use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Overall fetch timeout for product pages, in seconds.
    pub scraper_timeout_secs: u64,
    pub scraper_user_agent: String,
    /// Scrape requests allowed per caller per minute.
    pub scrape_rate_limit_per_minute: usize,
    /// Allowed CORS origins. Empty means any origin.
    pub cors_origins: Vec<String>,
}
