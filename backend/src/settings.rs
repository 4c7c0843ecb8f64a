//! Application settings loaded via OrthoConfig.
//!
//! Values come from `ACCOUNTS_*` environment variables or a config file;
//! command-line parsing is left to the binary's `clap` definition.

use std::ffi::OsString;
use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::DEFAULT_POOL_SIZE;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Server and storage settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ACCOUNTS")]
pub struct AppSettings {
    /// Address to bind; defaults to all interfaces.
    pub host: Option<IpAddr>,
    /// TCP port to bind.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// PostgreSQL connection URL. Without one the server keeps accounts in
    /// memory.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    pub pool_size: Option<u32>,
}

impl AppSettings {
    /// Load settings from the environment and config files only.
    ///
    /// # Errors
    /// Returns an I/O error describing unparsable values or config files.
    pub fn load_from_env() -> io::Result<Self> {
        Self::load_from_iter([OsString::from("accounts")])
            .map_err(|err| io::Error::other(format!("failed to load settings: {err}")))
    }

    /// Socket address the HTTP server listens on.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host.unwrap_or(DEFAULT_HOST), self.port)
    }

    /// Connection pool size, falling back to the persistence default.
    pub fn pool_size(&self) -> u32 {
        self.pool_size.unwrap_or(DEFAULT_POOL_SIZE)
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}
