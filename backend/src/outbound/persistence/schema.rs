//! Diesel table definitions mirroring `backend/migrations`.
//!
//! Keep in step with the SQL migrations; `diesel print-schema` against a
//! migrated database regenerates this file.

diesel::table! {
    /// Employers. `is_verified` is only ever flipped by an administrator.
    companies (id) {
        id -> Uuid,
        name -> Varchar,
        sector -> Varchar,
        nif -> Nullable<Varchar>,
        rc -> Nullable<Varchar>,
        is_verified -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Accounts. A CHECK constraint keeps candidates without a company.
    users (id) {
        id -> Uuid,
        email -> Varchar,
        display_name -> Varchar,
        role -> Varchar,
        company_id -> Nullable<Uuid>,
        cv -> Jsonb,
        phone -> Nullable<Varchar>,
        phone_verified -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Job postings; deleting a company or job cascades to applications.
    jobs (id) {
        id -> Uuid,
        company_id -> Uuid,
        title -> Varchar,
        description -> Text,
        island -> Varchar,
        location_city -> Varchar,
        contract_type -> Varchar,
        salary_kmf -> Nullable<Int8>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Candidate applications, unique per `(user_id, job_id)`.
    applications (id) {
        id -> Uuid,
        user_id -> Uuid,
        job_id -> Uuid,
        status -> Varchar,
        interview_date -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-user inbox.
    notifications (id) {
        id -> Uuid,
        user_id -> Uuid,
        title -> Varchar,
        message -> Text,
        kind -> Varchar,
        is_read -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(users -> companies (company_id));
diesel::joinable!(jobs -> companies (company_id));
diesel::joinable!(applications -> users (user_id));
diesel::joinable!(applications -> jobs (job_id));
diesel::joinable!(notifications -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(applications, companies, jobs, notifications, users);
