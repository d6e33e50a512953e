//! Builders wiring the domain services over Diesel or fixture adapters.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use hiring_backend::domain::ports::{
    ApplicationRepository, CompanyRepository, FixtureApplicationRepository,
    FixtureCompanyRepository, FixtureIdentityProvider, FixtureJobRepository, FixtureLoginService,
    FixtureNotificationRepository, FixtureUserRepository, IdentityProvider, JobRepository,
    LoginService, NotificationRepository, UserRepository,
};
use hiring_backend::domain::{
    ApplicationWorkflowService, AuthorizationGuard, CompanyService, JobService, Locale,
    NotificationService, ProfileService,
};
use hiring_backend::inbound::http::state::{HttpState, HttpStatePorts};
use hiring_backend::outbound::persistence::{
    DbPool, DieselApplicationRepository, DieselCompanyRepository, DieselJobRepository,
    DieselLoginService, DieselNotificationRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Driven adapters the domain services are built on.
struct Repositories<A, J, C, N, U> {
    applications: Arc<A>,
    jobs: Arc<J>,
    companies: Arc<C>,
    notifications: Arc<N>,
    users: Arc<U>,
}

/// Authentication adapters: the sign-in service and the identity lookup the
/// guard consults.
struct Authentication {
    login: Arc<dyn LoginService>,
    identities: Arc<dyn IdentityProvider>,
}

fn build_ports<A, J, C, N, U>(
    repos: Repositories<A, J, C, N, U>,
    login: Arc<dyn LoginService>,
    clock: Arc<dyn Clock>,
    locale: Locale,
) -> HttpStatePorts
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
    C: CompanyRepository + 'static,
    N: NotificationRepository + 'static,
    U: UserRepository + 'static,
{
    let Repositories {
        applications,
        jobs,
        companies,
        notifications,
        users,
    } = repos;
    let workflow = Arc::new(
        ApplicationWorkflowService::new(applications, Arc::clone(&jobs), Arc::clone(&clock))
            .with_locale(locale),
    );
    let job_service = Arc::new(JobService::new(jobs, Arc::clone(&clock)));
    HttpStatePorts {
        login,
        profile: Arc::new(ProfileService::new(users)),
        applications: workflow.clone(),
        application_query: workflow,
        notifications: Arc::new(NotificationService::new(notifications)),
        jobs: job_service.clone(),
        job_query: job_service,
        companies: Arc::new(CompanyService::new(companies, clock)),
    }
}

fn diesel_ports(
    pool: &DbPool,
    clock: Arc<dyn Clock>,
    locale: Locale,
) -> (HttpStatePorts, Authentication) {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let auth = Authentication {
        login: Arc::new(DieselLoginService::new(DieselUserRepository::new(pool.clone()))),
        identities: users.clone(),
    };
    let repos = Repositories {
        applications: Arc::new(DieselApplicationRepository::new(pool.clone())),
        jobs: Arc::new(DieselJobRepository::new(pool.clone())),
        companies: Arc::new(DieselCompanyRepository::new(pool.clone())),
        notifications: Arc::new(DieselNotificationRepository::new(pool.clone())),
        users,
    };
    (build_ports(repos, Arc::clone(&auth.login), clock, locale), auth)
}

fn fixture_ports(clock: Arc<dyn Clock>, locale: Locale) -> (HttpStatePorts, Authentication) {
    let auth = Authentication {
        login: Arc::new(FixtureLoginService),
        identities: Arc::new(FixtureIdentityProvider),
    };
    let repos = Repositories {
        applications: Arc::new(FixtureApplicationRepository),
        jobs: Arc::new(FixtureJobRepository),
        companies: Arc::new(FixtureCompanyRepository),
        notifications: Arc::new(FixtureNotificationRepository),
        users: Arc::new(FixtureUserRepository),
    };
    (build_ports(repos, Arc::clone(&auth.login), clock, locale), auth)
}

/// Build the handler state.
///
/// Uses the Diesel adapters when a pool is configured. Otherwise every
/// repository is a fixture and the guard resolves nobody, so guarded
/// endpoints answer 401 while public reads return empty lists.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let (ports, auth) = match &config.db_pool {
        Some(pool) => {
            info!("wiring PostgreSQL adapters");
            diesel_ports(pool, clock, config.locale)
        }
        None => {
            warn!("no database configured; serving fixture data");
            fixture_ports(clock, config.locale)
        }
    };
    let guard = AuthorizationGuard::new(auth.identities, config.exposure);
    web::Data::new(HttpState::new(ports, guard))
}
