use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for fixdesk
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FixdeskConfig {
    /// Backend connection settings
    pub backend: BackendConfig,
    /// Observability settings
    pub observability: ObservabilityConfig,
    /// Workflow tuning knobs
    pub workflow: WorkflowConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Base URL of the ticketing backend
    pub base_url: String,
    /// Bearer token (can be set via env var)
    pub token: Option<String>,
    /// Rate limiting settings
    pub rate_limit: RateLimitConfig,
    /// Response cache settings
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Requests per minute limit
    pub requests_per_minute: u32,
    /// Burst capacity
    pub burst_capacity: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Maximum cached responses
    pub max_entries: u64,
    /// Time-to-live for cached responses in seconds
    pub ttl_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level when RUST_LOG is unset
    pub log_level: String,
    /// Emit JSON log lines instead of the compact format
    pub json_logs: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkflowConfig {
    /// Search debounce in milliseconds
    pub search_debounce_ms: u64,
    /// Default page size for list views
    pub default_page_size: u32,
    /// Hour (0-23, local) after which the closing advisory shows
    pub closing_advisory_hour: u32,
}

impl Default for FixdeskConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig {
                base_url: "http://localhost:5000/api".to_string(),
                token: None, // Read from env var or fixdesk.toml
                rate_limit: RateLimitConfig {
                    requests_per_minute: 120,
                    burst_capacity: 20,
                },
                cache: CacheConfig {
                    max_entries: 1000,
                    ttl_seconds: 300,
                },
            },
            observability: ObservabilityConfig {
                log_level: "info".to_string(),
                json_logs: false,
            },
            workflow: WorkflowConfig {
                search_debounce_ms: 500,
                default_page_size: 5,
                closing_advisory_hour: 16,
            },
        }
    }
}

impl FixdeskConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration file (fixdesk.toml)
    /// 3. Environment variables (prefixed with FIXDESK_)
    pub fn load() -> Result<Self> {
        let defaults = Config::try_from(&FixdeskConfig::default())?;
        let mut builder = Config::builder().add_source(defaults);

        if Path::new("fixdesk.toml").exists() {
            builder = builder.add_source(File::with_name("fixdesk"));
        }

        builder = builder.add_source(
            Environment::with_prefix("FIXDESK")
                .separator("_")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let mut fixdesk_config: FixdeskConfig = config.try_deserialize()?;

        // Token usually arrives separately from the rest of the config
        if fixdesk_config.backend.token.is_none() {
            if let Ok(token) = std::env::var("FIXDESK_BACKEND_TOKEN") {
                fixdesk_config.backend.token = Some(token);
            }
        }

        Ok(fixdesk_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<FixdeskConfig, anyhow::Error>> =
    std::sync::LazyLock::new(|| {
        let _ = FixdeskConfig::load_env_file();
        FixdeskConfig::load()
    });

/// Get the global configuration
pub fn config() -> Result<&'static FixdeskConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}

/// Initialize configuration (called at startup)
pub fn init_config() -> Result<()> {
    let _config = config()?;
    tracing::info!("Configuration loaded successfully");
    Ok(())
}
