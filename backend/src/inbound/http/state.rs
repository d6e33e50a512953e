//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they can be exercised with mocks and no I/O.

use std::sync::Arc;

use crate::domain::AuthorizationGuard;
use crate::domain::ports::{
    ApplicationCommand, ApplicationQuery, CompanyCommand, JobCommand, JobQuery, LoginService,
    NotificationInbox, ProfileCommand,
};

/// Parameter object bundling the port implementations.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub profile: Arc<dyn ProfileCommand>,
    pub applications: Arc<dyn ApplicationCommand>,
    pub application_query: Arc<dyn ApplicationQuery>,
    pub notifications: Arc<dyn NotificationInbox>,
    pub jobs: Arc<dyn JobCommand>,
    pub job_query: Arc<dyn JobQuery>,
    pub companies: Arc<dyn CompanyCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub profile: Arc<dyn ProfileCommand>,
    pub applications: Arc<dyn ApplicationCommand>,
    pub application_query: Arc<dyn ApplicationQuery>,
    pub notifications: Arc<dyn NotificationInbox>,
    pub jobs: Arc<dyn JobCommand>,
    pub job_query: Arc<dyn JobQuery>,
    pub companies: Arc<dyn CompanyCommand>,
    /// Checks every privileged call before it reaches a port.
    pub guard: AuthorizationGuard,
}

impl HttpState {
    pub fn new(ports: HttpStatePorts, guard: AuthorizationGuard) -> Self {
        let HttpStatePorts {
            login,
            profile,
            applications,
            application_query,
            notifications,
            jobs,
            job_query,
            companies,
        } = ports;
        Self {
            login,
            profile,
            applications,
            application_query,
            notifications,
            jobs,
            job_query,
            companies,
            guard,
        }
    }
}
