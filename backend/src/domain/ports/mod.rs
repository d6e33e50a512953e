//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`IdentityProvider`]) are implemented by the
//! outbound adapters; driving ports (`*Command`, `*Query`,
//! [`NotificationInbox`], [`LoginService`]) are implemented by the domain
//! services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod application_command;
mod application_repository;
mod company_command;
mod company_repository;
mod identity_provider;
mod job_command;
mod job_repository;
mod login_service;
mod notification_inbox;
mod notification_repository;
mod profile_command;
mod user_repository;

#[cfg(test)]
pub use application_command::{MockApplicationCommand, MockApplicationQuery};
pub use application_command::{ApplicationCommand, ApplicationQuery};
#[cfg(test)]
pub use application_repository::MockApplicationRepository;
pub use application_repository::{
    ApplicationRepository, ApplicationRepositoryError, FixtureApplicationRepository,
};
pub use company_command::CompanyCommand;
#[cfg(test)]
pub use company_command::MockCompanyCommand;
#[cfg(test)]
pub use company_repository::MockCompanyRepository;
pub use company_repository::{
    CompanyRepository, CompanyRepositoryError, FixtureCompanyRepository,
};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{FixtureIdentityProvider, IdentityProvider, IdentityProviderError};
pub use job_command::{JobCommand, JobQuery};
#[cfg(test)]
pub use job_command::{MockJobCommand, MockJobQuery};
#[cfg(test)]
pub use job_repository::MockJobRepository;
pub use job_repository::{FixtureJobRepository, JobRepository, JobRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{
    DEV_PASSWORD, FIXTURE_EMAIL, FIXTURE_USER_ID, FixtureLoginService, LoginService,
};
#[cfg(test)]
pub use notification_inbox::MockNotificationInbox;
pub use notification_inbox::NotificationInbox;
#[cfg(test)]
pub use notification_repository::MockNotificationRepository;
pub use notification_repository::{
    FixtureNotificationRepository, NotificationRepository, NotificationRepositoryError,
};
#[cfg(test)]
pub use profile_command::MockProfileCommand;
pub use profile_command::{ProfileCommand, UserProfile};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserRepository, UserRepositoryError};
