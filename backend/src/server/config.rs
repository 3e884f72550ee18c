//! Application settings and the server configuration built from them.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use bondbook::domain::ports::LeiRecordSource;
use bondbook::outbound::persistence::DbPool;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_LEI_ENDPOINT: &str = "https://leilookup.gleif.org/api/v2/leirecords";
const DEFAULT_LEI_TIMEOUT_SECS: u64 = 10;
const DEFAULT_USER_AGENT: &str = concat!("bondbook/", env!("CARGO_PKG_VERSION"));

/// Settings loaded once at startup from CLI flags, `BONDBOOK_*` environment
/// variables, and configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BONDBOOK")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. In-process stores are used when unset.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub database_max_connections: Option<u32>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
    /// LEI registry endpoint queried with `?lei=<code>`.
    pub lei_endpoint: Option<String>,
    /// Request timeout for registry lookups, in seconds.
    pub lei_timeout_secs: Option<u64>,
    /// User agent sent to the registry.
    pub lei_user_agent: Option<String>,
}

/// Settings that parse but make no sense.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("invalid LEI endpoint {value:?}: {source}")]
    LeiEndpoint {
        value: String,
        source: url::ParseError,
    },
}

impl AppSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    pub fn database_max_connections(&self) -> u32 {
        self.database_max_connections
            .unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }

    pub fn lei_endpoint(&self) -> Result<Url, SettingsError> {
        let value = self.lei_endpoint.as_deref().unwrap_or(DEFAULT_LEI_ENDPOINT);
        Url::parse(value).map_err(|source| SettingsError::LeiEndpoint {
            value: value.to_owned(),
            source,
        })
    }

    pub fn lei_timeout(&self) -> Duration {
        Duration::from_secs(self.lei_timeout_secs.unwrap_or(DEFAULT_LEI_TIMEOUT_SECS))
    }

    pub fn lei_user_agent(&self) -> &str {
        self.lei_user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }
}

/// Everything the HTTP server needs besides health state.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) registry: Arc<dyn LeiRecordSource>,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, registry: Arc<dyn LeiRecordSource>) -> Self {
        Self {
            bind_addr,
            registry,
            db_pool: None,
        }
    }

    /// Attach a database pool; repositories switch from in-process stores to
    /// PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
