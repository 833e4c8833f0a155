use std::env;

/// Static assets precached into the core partition during install.
const DEFAULT_PRECACHE_MANIFEST: &[&str] = &[
    "/",
    "/index.html",
    "/app.js",
    "/styles.css",
    "/manifest.json",
    "/icons/leaf_icon.png",
];

#[derive(Debug, Clone)]
pub struct Config {
    // Upstream dashboard backend
    pub upstream_base_url: String,

    // Cache partitions. The version embedded in the core name is the only
    // invalidation mechanism: bump it and the activate sweep removes the rest.
    pub core_cache_name: String,
    pub data_cache_name: String,
    pub cache_max_bytes: u64,

    // Fetch dispatch
    pub api_prefix: String,
    pub precache_manifest: Vec<String>,

    // Proxy settings
    pub api_host: String,
    pub api_port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if required environment variables are not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            // Upstream dashboard backend
            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .map_err(|_| ConfigError::Missing("UPSTREAM_BASE_URL"))?,

            // Cache partitions
            core_cache_name: env::var("CORE_CACHE_NAME")
                .unwrap_or_else(|_| "dashboard-core-v2".to_string()),
            data_cache_name: env::var("DATA_CACHE_NAME")
                .unwrap_or_else(|_| "dashboard-data-v1".to_string()),
            cache_max_bytes: env::var("CACHE_MAX_BYTES")
                .unwrap_or_else(|_| "209715200".to_string())
                .parse()
                .unwrap_or(209_715_200), // 200MB default

            // Fetch dispatch
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api/".to_string()),
            precache_manifest: env::var("PRECACHE_MANIFEST")
                .map(|raw| parse_manifest(&raw))
                .unwrap_or_else(|_| {
                    DEFAULT_PRECACHE_MANIFEST
                        .iter()
                        .map(|s| (*s).to_string())
                        .collect()
                }),

            // Proxy settings
            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        })
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

/// Parse a comma-separated precache manifest override.
///
/// Blank entries are dropped so trailing commas are harmless.
#[must_use]
pub fn parse_manifest(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
