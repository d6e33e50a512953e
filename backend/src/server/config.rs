//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use hiring_backend::domain::{ErrorExposure, Locale};
use hiring_backend::inbound::http::session_config::SessionSettings;
use hiring_backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) exposure: ErrorExposure,
    pub(crate) locale: Locale,
}

impl ServerConfig {
    /// Construct a configuration from the validated session settings.
    ///
    /// Errors are reported verbosely and notifications are rendered in
    /// French until overridden.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            exposure: ErrorExposure::Verbose,
            locale: Locale::default(),
        }
    }

    /// Attach a database connection pool. Without one the server runs on
    /// fixture adapters.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub const fn with_exposure(mut self, exposure: ErrorExposure) -> Self {
        self.exposure = exposure;
        self
    }

    #[must_use]
    pub const fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
