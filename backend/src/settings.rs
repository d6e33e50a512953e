//! Server settings loaded via OrthoConfig.
//!
//! Values come from `HIRING_*` environment variables, a configuration file
//! or command-line flags. Session cookie toggles are read separately by
//! [`crate::inbound::http::session_config`].

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;

use crate::domain::{ErrorExposure, Locale};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_SIZE: u32 = 8;

/// Process-wide settings for the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HIRING")]
pub struct ServerSettings {
    /// Interface to bind; all interfaces when unset.
    pub host: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// PostgreSQL connection string. Without it the server runs on fixtures.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Production deployments redact unexpected error messages.
    #[ortho_config(default = false)]
    pub production: bool,
    /// Locale for dates inside notifications (`fr-FR` or `en-US`).
    pub locale: Option<String>,
}

impl ServerSettings {
    /// Socket address to bind, falling back to `0.0.0.0:8080`.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        let ip = match self.host.as_deref().map(str::parse::<IpAddr>) {
            Some(Ok(ip)) => ip,
            Some(Err(err)) => {
                warn!(
                    host = ?self.host,
                    error = %err,
                    "invalid HIRING_HOST; binding all interfaces"
                );
                IpAddr::V4(Ipv4Addr::UNSPECIFIED)
            }
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };
        SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT))
    }

    #[must_use]
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_SIZE).max(1)
    }

    #[must_use]
    pub const fn exposure(&self) -> ErrorExposure {
        ErrorExposure::for_production(self.production)
    }

    /// Notification locale; unknown tags fall back to French.
    #[must_use]
    pub fn locale(&self) -> Locale {
        match self.locale.as_deref().map(str::trim) {
            None | Some("fr-FR" | "fr") => Locale::FrFr,
            Some("en-US" | "en") => Locale::EnUs,
            Some(other) => {
                warn!(locale = other, "unsupported HIRING_LOCALE; using fr-FR");
                Locale::FrFr
            }
        }
    }
}
