//! In-memory adapters for integration tests.
//!
//! [`InMemoryStore`] implements every driven port over shared tables so the
//! real domain services can run end to end without PostgreSQL. It mirrors
//! the storage constraints the services rely on: one application per
//! candidate and job, cascading job deletion and single company attachment.
//! Compiled for unit tests and behind the `test-support` feature.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use actix_web::web;
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::ports::{
    ApplicationRepository, ApplicationRepositoryError, CompanyRepository, CompanyRepositoryError,
    DEV_PASSWORD, IdentityProvider, IdentityProviderError, JobRepository, JobRepositoryError,
    LoginService, NotificationRepository, NotificationRepositoryError, UserRepository,
    UserRepositoryError,
};
use crate::domain::{
    Application, ApplicationContext, ApplicationId, ApplicationStatus, ApplicationWorkflowService,
    AuthorizationGuard, BoardEntry, CandidateApplication, CandidateCard, Company, CompanyId,
    CompanyOverview, CompanyService, CvProfile, Email, Error, ErrorExposure, Identity, Job,
    JobFilter, JobId, JobListing, JobService, Locale, LoginCredentials, Notification,
    NotificationId, NotificationService, ProfileService, StatusChange, User, UserId,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Clock whose time only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_minutes(&self, minutes: i64) {
        *self.lock_clock() += TimeDelta::minutes(minutes);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    companies: HashMap<CompanyId, Company>,
    jobs: HashMap<JobId, Job>,
    applications: HashMap<ApplicationId, Application>,
    notifications: Vec<Notification>,
}

impl Tables {
    fn listing(&self, job: &Job) -> Option<JobListing> {
        self.companies.get(&job.company_id).map(|company| JobListing {
            job: job.clone(),
            company_name: company.name.clone(),
            company_verified: company.is_verified,
        })
    }

    fn card(&self, user_id: &UserId) -> Option<CandidateCard> {
        self.users.get(user_id).map(|user| CandidateCard {
            user_id: user.id(),
            display_name: user.display_name().to_string(),
            email: user.email().to_string(),
            initials: user.display_name().initials(),
            headline: user.cv().headline().map(str::to_owned),
            skills: user.cv().skills().map(str::to_owned),
            location: user.cv().location().map(str::to_owned),
        })
    }

    fn company_applications(&self, company_id: &CompanyId) -> Vec<(&Application, &Job)> {
        self.applications
            .values()
            .filter_map(|application| {
                self.jobs
                    .get(&application.job_id)
                    .filter(|job| job.company_id == *company_id)
                    .map(|job| (application, job))
            })
            .collect()
    }

    fn board(&self, company_id: &CompanyId, interviews_only: bool) -> Vec<BoardEntry> {
        let mut entries: Vec<BoardEntry> = self
            .company_applications(company_id)
            .into_iter()
            .filter(|(application, _)| {
                !interviews_only || application.status == ApplicationStatus::Interview
            })
            .filter_map(|(application, job)| {
                self.card(&application.user_id).map(|candidate| BoardEntry {
                    application: application.clone(),
                    job_title: job.title.clone(),
                    candidate,
                })
            })
            .collect();
        if interviews_only {
            entries.sort_by(|a, b| b.application.updated_at.cmp(&a.application.updated_at));
        } else {
            entries.sort_by(|a, b| b.application.created_at.cmp(&a.application.created_at));
        }
        entries
    }
}

/// Shared in-memory tables implementing the driven ports.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert an account directly, bypassing the services.
    pub fn put_user(&self, user: User) {
        self.lock().users.insert(user.id(), user);
    }

    /// Insert a company directly, bypassing the services.
    pub fn put_company(&self, company: Company) {
        self.lock().companies.insert(company.id, company);
    }

    /// Insert a job directly, bypassing the services.
    pub fn put_job(&self, job: Job) {
        self.lock().jobs.insert(job.id, job);
    }

    /// Every stored notification, oldest first.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.lock().notifications.clone()
    }

    #[must_use]
    pub fn application(&self, id: &ApplicationId) -> Option<Application> {
        self.lock().applications.get(id).cloned()
    }

    #[must_use]
    pub fn application_count(&self) -> usize {
        self.lock().applications.len()
    }

    #[must_use]
    pub fn user(&self, id: &UserId) -> Option<User> {
        self.lock().users.get(id).cloned()
    }

    /// Handler state running the real services over this store.
    ///
    /// Sign-in accepts the development password for any stored e-mail.
    pub fn http_state(&self, clock: Arc<dyn Clock>, locale: Locale) -> web::Data<HttpState> {
        let store = Arc::new(self.clone());
        let workflow = Arc::new(
            ApplicationWorkflowService::new(
                Arc::clone(&store),
                Arc::clone(&store),
                Arc::clone(&clock),
            )
            .with_locale(locale),
        );
        let jobs = Arc::new(JobService::new(Arc::clone(&store), Arc::clone(&clock)));
        let ports = HttpStatePorts {
            login: store.clone(),
            profile: Arc::new(ProfileService::new(Arc::clone(&store))),
            applications: workflow.clone(),
            application_query: workflow,
            notifications: Arc::new(NotificationService::new(Arc::clone(&store))),
            jobs: jobs.clone(),
            job_query: jobs,
            companies: Arc::new(CompanyService::new(Arc::clone(&store), clock)),
        };
        let guard = AuthorizationGuard::new(store, ErrorExposure::Verbose);
        web::Data::new(HttpState::new(ports, guard))
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryStore {
    async fn find_for_candidate(
        &self,
        user_id: &UserId,
        job_id: &JobId,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        Ok(self
            .lock()
            .applications
            .values()
            .find(|a| a.user_id == *user_id && a.job_id == *job_id)
            .cloned())
    }

    async fn insert(&self, application: &Application) -> Result<(), ApplicationRepositoryError> {
        let mut tables = self.lock();
        let taken = tables
            .applications
            .values()
            .any(|a| a.user_id == application.user_id && a.job_id == application.job_id);
        if taken {
            return Err(ApplicationRepositoryError::duplicate(
                application.user_id,
                application.job_id,
            ));
        }
        tables.applications.insert(application.id, application.clone());
        Ok(())
    }

    async fn load_context(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<ApplicationContext>, ApplicationRepositoryError> {
        let tables = self.lock();
        Ok(tables.applications.get(id).and_then(|application| {
            tables.jobs.get(&application.job_id).map(|job| ApplicationContext {
                application: application.clone(),
                job_title: job.title.clone(),
                company_id: job.company_id,
            })
        }))
    }

    async fn record_status_change(
        &self,
        id: &ApplicationId,
        change: &StatusChange,
        updated_at: DateTime<Utc>,
        notification: &Notification,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        let mut tables = self.lock();
        let Some(application) = tables.applications.get_mut(id) else {
            return Ok(None);
        };
        application.apply(change, updated_at);
        let updated = application.clone();
        tables.notifications.push(notification.clone());
        Ok(Some(updated))
    }

    async fn list_board(
        &self,
        company_id: &CompanyId,
    ) -> Result<Vec<BoardEntry>, ApplicationRepositoryError> {
        Ok(self.lock().board(company_id, false))
    }

    async fn list_interviews(
        &self,
        company_id: &CompanyId,
    ) -> Result<Vec<BoardEntry>, ApplicationRepositoryError> {
        Ok(self.lock().board(company_id, true))
    }

    async fn list_for_candidate(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<CandidateApplication>, ApplicationRepositoryError> {
        let tables = self.lock();
        let mut rows: Vec<CandidateApplication> = tables
            .applications
            .values()
            .filter(|a| a.user_id == *user_id)
            .filter_map(|application| {
                let job = tables.jobs.get(&application.job_id)?;
                let company = tables.companies.get(&job.company_id)?;
                Some(CandidateApplication {
                    application: application.clone(),
                    job_title: job.title.clone(),
                    company_name: company.name.clone(),
                })
            })
            .collect();
        rows.sort_by(|a, b| b.application.created_at.cmp(&a.application.created_at));
        Ok(rows)
    }

    async fn overview(
        &self,
        company_id: &CompanyId,
        since: DateTime<Utc>,
    ) -> Result<CompanyOverview, ApplicationRepositoryError> {
        let tables = self.lock();
        let applications = tables.company_applications(company_id);
        let count = |pred: &dyn Fn(&Application) -> bool| {
            applications.iter().filter(|(a, _)| pred(a)).count() as u64
        };
        Ok(CompanyOverview {
            active_jobs: tables
                .jobs
                .values()
                .filter(|job| job.company_id == *company_id)
                .count() as u64,
            applications: applications.len() as u64,
            interviews: count(&|a| a.status == ApplicationStatus::Interview),
            new_today: count(&|a| a.created_at >= since),
        })
    }
}

#[async_trait]
impl JobRepository for InMemoryStore {
    async fn insert(&self, job: &Job) -> Result<(), JobRepositoryError> {
        self.lock().jobs.insert(job.id, job.clone());
        Ok(())
    }

    async fn update(&self, job: &Job) -> Result<bool, JobRepositoryError> {
        let mut tables = self.lock();
        Ok(match tables.jobs.get_mut(&job.id) {
            Some(stored) => {
                *stored = job.clone();
                true
            }
            None => false,
        })
    }

    async fn delete(&self, id: &JobId) -> Result<bool, JobRepositoryError> {
        let mut tables = self.lock();
        let removed = tables.jobs.remove(id).is_some();
        tables.applications.retain(|_, a| a.job_id != *id);
        Ok(removed)
    }

    async fn find_by_id(&self, id: &JobId) -> Result<Option<Job>, JobRepositoryError> {
        Ok(self.lock().jobs.get(id).cloned())
    }

    async fn find_listing(&self, id: &JobId) -> Result<Option<JobListing>, JobRepositoryError> {
        let tables = self.lock();
        Ok(tables.jobs.get(id).and_then(|job| tables.listing(job)))
    }

    async fn list_public(&self, filter: &JobFilter) -> Result<Vec<JobListing>, JobRepositoryError> {
        let tables = self.lock();
        let mut listings: Vec<JobListing> = tables
            .jobs
            .values()
            .filter(|job| filter.matches(job))
            .filter_map(|job| tables.listing(job))
            .collect();
        listings.sort_by(|a, b| b.job.created_at.cmp(&a.job.created_at));
        Ok(listings)
    }

    async fn list_for_company(
        &self,
        company_id: &CompanyId,
    ) -> Result<Vec<Job>, JobRepositoryError> {
        let mut jobs: Vec<Job> = self
            .lock()
            .jobs
            .values()
            .filter(|job| job.company_id == *company_id)
            .cloned()
            .collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(jobs)
    }
}

#[async_trait]
impl CompanyRepository for InMemoryStore {
    async fn create_for_recruiter(
        &self,
        recruiter: &UserId,
        company: &Company,
        _attached_at: DateTime<Utc>,
    ) -> Result<(), CompanyRepositoryError> {
        let mut tables = self.lock();
        let user = tables
            .users
            .get(recruiter)
            .ok_or_else(|| CompanyRepositoryError::query(format!("unknown user {recruiter}")))?;
        if user.company_id().is_some() {
            return Err(CompanyRepositoryError::already_attached(*recruiter));
        }
        let attached = User::new(
            user.id(),
            user.email().clone(),
            user.display_name().clone(),
            user.role(),
            Some(company.id),
        )
        .map_err(|err| CompanyRepositoryError::query(err.to_string()))?
        .with_cv(user.cv().clone())
        .with_phone(user.phone().map(str::to_owned), user.phone_verified());
        tables.users.insert(*recruiter, attached);
        tables.companies.insert(company.id, company.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CompanyId) -> Result<Option<Company>, CompanyRepositoryError> {
        Ok(self.lock().companies.get(id).cloned())
    }

    async fn update(&self, company: &Company) -> Result<bool, CompanyRepositoryError> {
        let mut tables = self.lock();
        Ok(match tables.companies.get_mut(&company.id) {
            Some(stored) => {
                *stored = company.clone();
                true
            }
            None => false,
        })
    }
}

#[async_trait]
impl NotificationRepository for InMemoryStore {
    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<Notification>, NotificationRepositoryError> {
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(self
            .lock()
            .notifications
            .iter()
            .rev()
            .filter(|n| n.user_id == *user_id)
            .take(take)
            .cloned()
            .collect())
    }

    async fn count_unread(&self, user_id: &UserId) -> Result<u64, NotificationRepositoryError> {
        Ok(self
            .lock()
            .notifications
            .iter()
            .filter(|n| n.user_id == *user_id && !n.is_read)
            .count() as u64)
    }

    async fn mark_read(
        &self,
        user_id: &UserId,
        id: &NotificationId,
    ) -> Result<bool, NotificationRepositoryError> {
        let mut tables = self.lock();
        match tables
            .notifications
            .iter_mut()
            .find(|n| n.id == *id && n.user_id == *user_id)
        {
            Some(notification) => {
                notification.is_read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_all_read(&self, user_id: &UserId) -> Result<u64, NotificationRepositoryError> {
        let mut tables = self.lock();
        let mut changed = 0;
        for n in tables
            .notifications
            .iter_mut()
            .filter(|n| n.user_id == *user_id && !n.is_read)
        {
            n.is_read = true;
            changed += 1;
        }
        Ok(changed)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.lock().users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|user| user.email() == email)
            .cloned())
    }

    async fn upsert(&self, user: &User) -> Result<(), UserRepositoryError> {
        self.put_user(user.clone());
        Ok(())
    }

    async fn update_cv(&self, id: &UserId, cv: &CvProfile) -> Result<bool, UserRepositoryError> {
        let mut tables = self.lock();
        Ok(match tables.users.remove(id) {
            Some(user) => {
                tables.users.insert(*id, user.with_cv(cv.clone()));
                true
            }
            None => false,
        })
    }
}

#[async_trait]
impl IdentityProvider for InMemoryStore {
    async fn resolve(&self, user_id: &UserId) -> Result<Option<Identity>, IdentityProviderError> {
        Ok(self.lock().users.get(user_id).map(User::identity))
    }
}

#[async_trait]
impl LoginService for InMemoryStore {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if credentials.password() != DEV_PASSWORD {
            return Err(Error::unauthorized("invalid credentials"));
        }
        self.lock()
            .users
            .values()
            .find(|user| user.email() == credentials.email())
            .map(User::id)
            .ok_or_else(|| Error::unauthorized("invalid credentials"))
    }
}
