//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::test::TestRequest;
use actix_web::{App, web};
use serde_json::json;

use crate::domain::ports::{
    MockApplicationCommand, MockApplicationQuery, MockCompanyCommand, MockIdentityProvider,
    MockJobCommand, MockJobQuery, MockLoginService, MockNotificationInbox, MockProfileCommand,
};
use crate::domain::{AuthorizationGuard, ErrorExposure, Identity};

use super::state::{HttpState, HttpStatePorts};
use super::{configure_api, validation};

/// Cookie session middleware with a fresh key and the `Secure` flag off.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by `res`.
///
/// # Panics
/// Panics when the response did not set one.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    match res.response().cookies().find(|c| c.name() == "session") {
        Some(cookie) => cookie.into_owned(),
        None => panic!("response should set a session cookie"),
    }
}

/// `POST /api/v1/login` with well-formed credentials.
pub fn login_request() -> TestRequest {
    TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({"email": "someone@example.km", "password": "password"}))
}

/// One mock per driving port plus the identity the guard resolves.
///
/// Mocks start without expectations, so any unexpected call fails the test.
pub struct TestPorts {
    pub login: MockLoginService,
    pub profile: MockProfileCommand,
    pub applications: MockApplicationCommand,
    pub application_query: MockApplicationQuery,
    pub notifications: MockNotificationInbox,
    pub jobs: MockJobCommand,
    pub job_query: MockJobQuery,
    pub companies: MockCompanyCommand,
    identity: Option<Identity>,
}

impl TestPorts {
    /// Nobody is signed in.
    pub fn anonymous() -> Self {
        Self {
            login: MockLoginService::new(),
            profile: MockProfileCommand::new(),
            applications: MockApplicationCommand::new(),
            application_query: MockApplicationQuery::new(),
            notifications: MockNotificationInbox::new(),
            jobs: MockJobCommand::new(),
            job_query: MockJobQuery::new(),
            companies: MockCompanyCommand::new(),
            identity: None,
        }
    }

    /// `login_request` signs in as `identity`.
    pub fn signed_in(identity: Identity) -> Self {
        let mut ports = Self::anonymous();
        let user_id = identity.user_id();
        ports
            .login
            .expect_authenticate()
            .returning(move |_| Ok(user_id));
        ports.identity = Some(identity);
        ports
    }

    pub fn into_state(self) -> web::Data<HttpState> {
        let identity = self.identity;
        let mut provider = MockIdentityProvider::new();
        provider
            .expect_resolve()
            .returning(move |id| Ok(identity.filter(|who| who.user_id() == *id)));
        let guard = AuthorizationGuard::new(Arc::new(provider), ErrorExposure::Verbose);
        web::Data::new(HttpState::new(
            HttpStatePorts {
                login: Arc::new(self.login),
                profile: Arc::new(self.profile),
                applications: Arc::new(self.applications),
                application_query: Arc::new(self.application_query),
                notifications: Arc::new(self.notifications),
                jobs: Arc::new(self.jobs),
                job_query: Arc::new(self.job_query),
                companies: Arc::new(self.companies),
            },
            guard,
        ))
    }
}

/// The `/api/v1` surface over `ports`, as the server mounts it.
pub fn test_app(
    ports: TestPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(ports.into_state())
        .app_data(validation::json_config())
        .app_data(validation::path_config())
        .app_data(validation::query_config())
        .service(
            web::scope("/api/v1")
                .wrap(test_session_middleware())
                .configure(configure_api),
        )
}
