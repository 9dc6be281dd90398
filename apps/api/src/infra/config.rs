use std::{
    fmt::Display,
    net::{Ipv4Addr, SocketAddr},
    path::PathBuf,
    str::FromStr,
};

use axum::http::HeaderValue;
use cafepass_types::NameRule;
use env_helpers::get_env_default;
use secrecy::SecretString;
use url::Url;

use crate::infra::error::InfraError;

/// Where waitlist rows are written.
pub enum TableStoreConfig {
    /// Hosted table API (PostgREST-style, e.g. Supabase).
    Rest { url: Url, api_key: SecretString },
    /// Direct Postgres connection to the same tables.
    Postgres { database_url: String },
    /// No credentials given. The site still serves; submissions fail as unexpected.
    Unconfigured,
}

impl TableStoreConfig {
    pub fn from_parts(
        backend: &str,
        store_url: Option<String>,
        store_api_key: Option<String>,
        database_url: Option<String>,
    ) -> Result<Self, InfraError> {
        match backend.to_lowercase().as_str() {
            "rest" => {
                let (Some(url), Some(api_key)) = (store_url, store_api_key) else {
                    return Ok(Self::Unconfigured);
                };
                let url = Url::parse(&url).map_err(|e| InfraError::ConfigInvalid {
                    var: "STORE_URL",
                    reason: e.to_string(),
                })?;
                if url.cannot_be_a_base() {
                    return Err(InfraError::ConfigInvalid {
                        var: "STORE_URL",
                        reason: "must be an http(s) base URL".into(),
                    });
                }
                Ok(Self::Rest {
                    url,
                    api_key: SecretString::new(api_key.into()),
                })
            }
            "postgres" => {
                let database_url = database_url.ok_or(InfraError::ConfigMissing {
                    var: "DATABASE_URL",
                })?;
                Ok(Self::Postgres { database_url })
            }
            "none" => Ok(Self::Unconfigured),
            other => Err(InfraError::ConfigInvalid {
                var: "TABLE_STORE",
                reason: format!("unknown backend '{other}', expected rest, postgres or none"),
            }),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Rest { .. } => "rest",
            Self::Postgres { .. } => "postgres",
            Self::Unconfigured => "none",
        }
    }
}

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub cors_origin: HeaderValue,
    pub table_store: TableStoreConfig,
    /// Whether the coffee drinker form requires a name.
    pub user_name_rule: NameRule,
    /// Rate limiting is disabled when unset.
    pub redis_url: Option<String>,
    pub rate_limit_window_secs: u64,
    pub rate_limit_per_ip: u64,
    /// Whether to trust X-Forwarded-For headers. Set to true when behind a reverse proxy (Caddy, nginx).
    /// SECURITY: Only enable this when the API is not directly exposed to the internet.
    pub trust_proxy: bool,
    /// Structured JSON log file, in addition to console output.
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, InfraError> {
        let bind_addr: SocketAddr =
            parse_env("BIND_ADDR", SocketAddr::from((Ipv4Addr::LOCALHOST, 3001)))?;
        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:3000"))
                .parse()
                .map_err(|_| InfraError::ConfigInvalid {
                    var: "CORS_ORIGIN",
                    reason: "not a valid header value".into(),
                })?;

        let table_store = TableStoreConfig::from_parts(
            &get_env_default("TABLE_STORE", String::from("rest")),
            optional_env("STORE_URL"),
            optional_env("STORE_API_KEY"),
            optional_env("DATABASE_URL"),
        )?;

        let user_name_rule = NameRule::from_required(parse_env("REQUIRE_USER_NAME", false)?);
        let redis_url = optional_env("REDIS_URL");
        let rate_limit_window_secs: u64 = parse_env("RATE_LIMIT_WINDOW_SECS", 60)?;
        let rate_limit_per_ip: u64 = parse_env("RATE_LIMIT_PER_IP", 30)?;
        // Default to false for security - must explicitly enable when behind a trusted proxy
        let trust_proxy: bool = parse_env("TRUST_PROXY", false)?;
        let log_file = optional_env("LOG_FILE").map(PathBuf::from);

        Ok(Self {
            bind_addr,
            cors_origin,
            table_store,
            user_name_rule,
            redis_url,
            rate_limit_window_secs,
            rate_limit_per_ip,
            trust_proxy,
            log_file,
        })
    }
}

fn optional_env(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

/// Typed variable with a default when unset. A value that fails to parse is an error.
fn parse_env<T>(var: &'static str, default: T) -> Result<T, InfraError>
where
    T: FromStr,
    T::Err: Display,
{
    parse_value(var, optional_env(var), default)
}

fn parse_value<T>(var: &'static str, raw: Option<String>, default: T) -> Result<T, InfraError>
where
    T: FromStr,
    T::Err: Display,
{
    match raw {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| InfraError::ConfigInvalid {
            var,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
