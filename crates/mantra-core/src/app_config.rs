use std::net::SocketAddr;
use std::path::PathBuf;

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

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// `None` leaves the shows endpoint answering 503.
    pub ticketmaster_api_key: Option<String>,
    pub ticketmaster_base_url: String,
    pub geocode_base_url: String,
    pub affiliate_base: String,
    pub country_code: String,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    pub geocode_cache_ttl_secs: u64,
    pub events_cache_ttl_secs: u64,
    pub content_dir: PathBuf,
    pub prefs_path: PathBuf,
    pub api_base: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "ticketmaster_api_key",
                &self.ticketmaster_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("ticketmaster_base_url", &self.ticketmaster_base_url)
            .field("geocode_base_url", &self.geocode_base_url)
            .field("affiliate_base", &self.affiliate_base)
            .field("country_code", &self.country_code)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("geocode_cache_ttl_secs", &self.geocode_cache_ttl_secs)
            .field("events_cache_ttl_secs", &self.events_cache_ttl_secs)
            .field("content_dir", &self.content_dir)
            .field("prefs_path", &self.prefs_path)
            .field("api_base", &self.api_base)
            .finish()
    }
}
