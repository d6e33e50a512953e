//! PostgreSQL adapters for the driven ports.
//!
//! Repositories translate between Diesel rows (`models`) and domain
//! types; no workflow rule lives here beyond what the schema enforces
//! (uniqueness of applications, cascading deletes, the candidate/company
//! CHECK constraint).
//!
//! ```ignore
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let jobs = DieselJobRepository::new(pool.clone());
//! ```

mod diesel_application_repository;
mod diesel_company_repository;
mod diesel_error_mapping;
mod diesel_job_repository;
mod diesel_login_service;
mod diesel_notification_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_application_repository::DieselApplicationRepository;
pub use diesel_company_repository::DieselCompanyRepository;
pub use diesel_job_repository::DieselJobRepository;
pub use diesel_login_service::DieselLoginService;
pub use diesel_notification_repository::DieselNotificationRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
