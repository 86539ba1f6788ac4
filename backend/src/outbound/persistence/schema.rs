//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Authenticatable accounts. `email` carries a unique index.
    accounts (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        role -> Varchar,
        password_hash -> Text,
        org_level_2 -> Nullable<Varchar>,
        pi_reference_profile -> Nullable<Varchar>,
        pi_pattern -> Nullable<Varchar>,
        pi_dominance -> Nullable<Float8>,
        pi_extraversion -> Nullable<Float8>,
        pi_patience -> Nullable<Float8>,
        pi_formality -> Nullable<Float8>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Roster entries imported from the HR directory.
    ///
    /// `user_id` is null until an account is provisioned for the member.
    directory_members (id) {
        id -> Int8,
        employee_number -> Varchar,
        employee_email -> Varchar,
        first_name -> Varchar,
        last_name -> Varchar,
        job -> Nullable<Varchar>,
        job_code -> Nullable<Varchar>,
        org_level_2 -> Nullable<Varchar>,
        employment_status -> Nullable<Varchar>,
        user_id -> Nullable<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(directory_members -> accounts (user_id));

diesel::allow_tables_to_appear_in_same_query!(accounts, directory_members);
