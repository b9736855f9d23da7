use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use crate::workflows::content::SnippetAnchor;

pub const DEFAULT_GRANT_SOURCE_URL: &str = "https://www.pa.gov/agencies/dcnr/programs-and-services/grants/community-conservation-partnerships-program-grants.html";
pub const DEFAULT_COMPLETION_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
/// Upload ceiling matching the 200 MB limit of the document uploader.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 200 * 1024 * 1024;

/// Placeholder key shipped in sample configuration; treated the same as "no key".
const PLACEHOLDER_API_KEY: &str = "sk-your-actual-api-key-here";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub assistant: AssistantConfig,
    pub grants: GrantDataConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let max_upload_bytes = parse_var("APP_MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let api_key = env::var("OPENAI_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty() && key != PLACEHOLDER_API_KEY);

        let assistant = AssistantConfig {
            api_key,
            api_url: env::var("ASSISTANT_API_URL")
                .unwrap_or_else(|_| DEFAULT_COMPLETION_URL.to_string()),
            model: env::var("ASSISTANT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            max_tokens: parse_var("ASSISTANT_MAX_TOKENS", 700)?,
            temperature: parse_var("ASSISTANT_TEMPERATURE", 0.7)?,
            timeout_secs: parse_var("ASSISTANT_TIMEOUT_SECS", 30)?,
            snippet_anchor: parse_var("SEARCH_SNIPPET_ANCHOR", SnippetAnchor::default())?,
        };

        let grants = GrantDataConfig {
            source_url: env::var("GRANT_SOURCE_URL")
                .unwrap_or_else(|_| DEFAULT_GRANT_SOURCE_URL.to_string()),
            snapshot_path: env::var("GRANT_SNAPSHOT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("grant_data.json")),
            stale_after_days: parse_var("GRANT_STALE_AFTER_DAYS", 30)?,
            request_timeout_secs: parse_var("GRANT_REQUEST_TIMEOUT_SECS", 30)?,
            advisor_table: env::var("GRANT_ADVISOR_TABLE")
                .ok()
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        };

        Ok(Self {
            environment,
            server: ServerConfig {
                host,
                port,
                max_upload_bytes,
            },
            telemetry: TelemetryConfig { log_level },
            assistant,
            grants,
        })
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue { name, value: raw }),
        _ => Ok(default),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest request body accepted by the document upload route.
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Hosted-model and search settings used when answering questions.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub snippet_anchor: SnippetAnchor,
}

impl AssistantConfig {
    pub fn model_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Where program information comes from and how long a snapshot stays fresh.
#[derive(Debug, Clone)]
pub struct GrantDataConfig {
    pub source_url: String,
    pub snapshot_path: PathBuf,
    pub stale_after_days: i64,
    pub request_timeout_secs: u64,
    pub advisor_table: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidValue { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidValue { name, value } => {
                write!(f, "{name} has an unsupported value '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidValue { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for name in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_MAX_UPLOAD_BYTES",
            "OPENAI_API_KEY",
            "ASSISTANT_API_URL",
            "ASSISTANT_MODEL",
            "ASSISTANT_MAX_TOKENS",
            "ASSISTANT_TEMPERATURE",
            "ASSISTANT_TIMEOUT_SECS",
            "SEARCH_SNIPPET_ANCHOR",
            "GRANT_SOURCE_URL",
            "GRANT_SNAPSHOT_PATH",
            "GRANT_STALE_AFTER_DAYS",
            "GRANT_REQUEST_TIMEOUT_SECS",
            "GRANT_ADVISOR_TABLE",
        ] {
            env::remove_var(name);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.server.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(config.assistant.model, DEFAULT_MODEL);
        assert_eq!(config.assistant.max_tokens, 700);
        assert_eq!(config.grants.stale_after_days, 30);
        assert_eq!(config.grants.snapshot_path, PathBuf::from("grant_data.json"));
        assert_eq!(
            config.assistant.snippet_anchor,
            SnippetAnchor::FirstMatchedToken
        );
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn placeholder_api_key_disables_hosted_model() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("OPENAI_API_KEY", PLACEHOLDER_API_KEY);
        let config = AppConfig::load().expect("config loads");
        assert!(!config.assistant.model_configured());

        env::set_var("OPENAI_API_KEY", "sk-live");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.assistant.api_key.as_deref(), Some("sk-live"));
    }

    #[test]
    fn rejects_unparseable_numbers() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("GRANT_STALE_AFTER_DAYS", "monthly");
        let err = AppConfig::load().expect_err("invalid staleness rejected");
        assert!(err.to_string().contains("GRANT_STALE_AFTER_DAYS"));
        reset_env();
    }

    #[test]
    fn reads_upload_limit_override() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_MAX_UPLOAD_BYTES", "10485760");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.server.max_upload_bytes, 10 * 1024 * 1024);

        env::set_var("APP_MAX_UPLOAD_BYTES", "lots");
        let err = AppConfig::load().expect_err("invalid limit rejected");
        assert!(err.to_string().contains("APP_MAX_UPLOAD_BYTES"));
        reset_env();
    }

    #[test]
    fn reads_snippet_anchor_override() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SEARCH_SNIPPET_ANCHOR", "first-token");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.assistant.snippet_anchor, SnippetAnchor::FirstQueryToken);
        reset_env();
    }
}
