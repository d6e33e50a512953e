//! Shared world for the HTTP integration suites.
//!
//! Seeds an in-memory store with two companies, their recruiters, a
//! candidate, an administrator and one job, then serves the real `/api/v1`
//! surface over it.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Value, json};

use hiring_backend::Trace;
use hiring_backend::domain::{
    Company, CompanyDraft, CompanyId, ContractType, DisplayName, Email, Island, Job, JobDraft,
    JobId, JobInput, Locale, Role, User, UserId,
};
use hiring_backend::inbound::http::configure_api;
use hiring_backend::inbound::http::validation::{json_config, path_config, query_config};
use hiring_backend::test_support::{InMemoryStore, MutableClock};

pub const ALI: &str = "ali@example.km";
pub const MOUSSA: &str = "moussa@example.km";
pub const FATIMA: &str = "fatima@example.km";
pub const ADMIN: &str = "admin@example.km";

pub fn start_of_day() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 20, 8, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn user(email: &str, name: &str, role: Role, company_id: Option<CompanyId>) -> User {
    User::new(
        UserId::random(),
        Email::new(email).expect("email"),
        DisplayName::new(name).expect("name"),
        role,
        company_id,
    )
    .expect("valid user")
}

fn company(name: &str, sector: &str) -> Company {
    let draft = CompanyDraft::new(name, sector, None, None).expect("valid company");
    Company::from_draft(CompanyId::random(), draft)
}

/// A valid posting body for `POST /api/v1/recruiter/jobs`.
pub fn job_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "Conception et maintenance des applications web et mobiles du groupe.",
        "island": "GRANDE_COMORE",
        "locationCity": "Moroni",
        "contractType": "CDI",
        "salaryKmf": 350_000
    })
}

pub struct World {
    pub store: InMemoryStore,
    pub clock: Arc<MutableClock>,
    pub ali: UserId,
    pub co1: CompanyId,
    pub co2: CompanyId,
    pub job: JobId,
}

impl World {
    /// Ali the candidate, Moussa recruiting for Comores Telecom (CO1),
    /// Fatima recruiting for Vanille Export (CO2), an administrator, and
    /// the CO1 posting "Développeur Fullstack".
    pub fn seed() -> Self {
        let store = InMemoryStore::new();
        let clock = Arc::new(MutableClock::new(start_of_day()));

        let co1 = company("Comores Telecom", "Télécoms");
        let co2 = company("Vanille Export", "Agroalimentaire");
        let ali = user(ALI, "Ali Soilihi", Role::Candidate, None);
        store.put_user(user(MOUSSA, "Moussa Larifou", Role::Recruiter, Some(co1.id)));
        store.put_user(user(FATIMA, "Fatima Said", Role::Recruiter, Some(co2.id)));
        store.put_user(user(ADMIN, "Admin Plateforme", Role::Admin, None));

        let draft = JobDraft::try_from(JobInput {
            title: "Développeur Fullstack".to_owned(),
            description: "Conception et maintenance des applications web et mobiles du groupe."
                .to_owned(),
            island: Island::GrandeComore,
            location_city: "Moroni".to_owned(),
            contract_type: ContractType::Cdi,
            salary_kmf: Some(350_000),
        })
        .expect("valid job");
        let job = Job::from_draft(JobId::random(), co1.id, draft, start_of_day());

        let world = Self {
            ali: ali.id(),
            co1: co1.id,
            co2: co2.id,
            job: job.id,
            store,
            clock,
        };
        world.store.put_user(ali);
        world.store.put_company(co1);
        world.store.put_company(co2);
        world.store.put_job(job);
        world
    }

    /// The `/api/v1` surface over the seeded store, with French dates.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
            .cookie_name("session".to_owned())
            .cookie_secure(false)
            .build();
        App::new()
            .app_data(self.store.http_state(self.clock.clone(), Locale::FrFr))
            .app_data(json_config())
            .app_data(path_config())
            .app_data(query_config())
            .wrap(Trace)
            .service(web::scope("/api/v1").wrap(session).configure(configure_api))
    }
}

pub fn login_request(email: &str) -> TestRequest {
    TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({"email": email, "password": "password"}))
}

pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|c| c.name() == "session")
        .map(Cookie::into_owned)
        .expect("login should set a session cookie")
}

pub async fn json_body(res: ServiceResponse) -> Value {
    test::read_body_json(res).await
}
