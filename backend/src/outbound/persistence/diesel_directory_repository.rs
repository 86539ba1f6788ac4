//! PostgreSQL-backed `DirectoryRepository` implementation using Diesel ORM.
//!
//! Linking uses a conditional `UPDATE ... WHERE user_id IS NULL`; the affected
//! row count decides whether this caller won the link.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::{Nullable, Text};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    DirectoryCounts, DirectoryRepository, DirectoryRepositoryError, LinkOutcome,
};
use crate::domain::{AccountId, DirectoryMember, DirectoryMemberId, OrgLevel};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{CorruptRow, DirectoryMemberRow};
use super::pool::{DbPool, PoolError};
use super::schema::directory_members;

/// Diesel-backed implementation of the [`DirectoryRepository`] port.
#[derive(Clone)]
pub struct DieselDirectoryRepository {
    pool: DbPool,
}

impl DieselDirectoryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DirectoryRepositoryError {
    DirectoryRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> DirectoryRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => DirectoryRepositoryError::connection(message),
        DieselFailure::Query(message) => DirectoryRepositoryError::query(message),
        DieselFailure::UniqueViolation => {
            DirectoryRepositoryError::query("unique constraint violated")
        }
    }
}

fn rows_to_members(
    rows: Vec<DirectoryMemberRow>,
) -> Result<Vec<DirectoryMember>, DirectoryRepositoryError> {
    rows.into_iter()
        .map(DirectoryMemberRow::into_domain)
        .collect::<Result<Vec<_>, CorruptRow>>()
        .map_err(|err| DirectoryRepositoryError::query(err.to_string()))
}

diesel::define_sql_function! {
    /// PostgreSQL `btrim`, stripping surrounding whitespace.
    fn btrim(value: Nullable<Text>) -> Nullable<Text>;
}

/// Members whose grouping key matches once stored padding is trimmed.
/// Imported roster values are not normalised, so the column is compared
/// through `btrim` to agree with the trimmed [`OrgLevel`].
fn org_level_query(org_level: &OrgLevel) -> directory_members::BoxedQuery<'_, Pg> {
    directory_members::table
        .filter(btrim(directory_members::org_level_2).eq(org_level.as_ref()))
        .order((directory_members::first_name.asc(), directory_members::id.asc()))
        .into_boxed()
}

/// Interpret the affected-row count of the conditional link update.
fn link_outcome(updated_rows: usize, member_exists: bool) -> LinkOutcome {
    match (updated_rows, member_exists) {
        (0, true) => LinkOutcome::AlreadyLinked,
        (0, false) => LinkOutcome::MemberMissing,
        _ => LinkOutcome::Linked,
    }
}

#[async_trait]
impl DirectoryRepository for DieselDirectoryRepository {
    async fn find_by_id(
        &self,
        id: DirectoryMemberId,
    ) -> Result<Option<DirectoryMember>, DirectoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<DirectoryMemberRow> = directory_members::table
            .filter(directory_members::id.eq(id.get()))
            .select(DirectoryMemberRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(DirectoryMemberRow::into_domain)
            .transpose()
            .map_err(|err| DirectoryRepositoryError::query(err.to_string()))
    }

    async fn find_by_org_level(
        &self,
        org_level: &OrgLevel,
    ) -> Result<Vec<DirectoryMember>, DirectoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<DirectoryMemberRow> = org_level_query(org_level)
            .select(DirectoryMemberRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_members(rows)
    }

    async fn list_unlinked(&self) -> Result<Vec<DirectoryMember>, DirectoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<DirectoryMemberRow> = directory_members::table
            .filter(directory_members::user_id.is_null())
            .order((directory_members::first_name.asc(), directory_members::id.asc()))
            .select(DirectoryMemberRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_members(rows)
    }

    async fn link_account(
        &self,
        id: DirectoryMemberId,
        account_id: AccountId,
    ) -> Result<LinkOutcome, DirectoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(
            directory_members::table
                .filter(directory_members::id.eq(id.get()))
                .filter(directory_members::user_id.is_null()),
        )
        .set(directory_members::user_id.eq(Some(*account_id.as_uuid())))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        if updated > 0 {
            return Ok(LinkOutcome::Linked);
        }

        let exists: bool = diesel::select(diesel::dsl::exists(
            directory_members::table.filter(directory_members::id.eq(id.get())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(link_outcome(updated, exists))
    }

    async fn counts(&self) -> Result<DirectoryCounts, DirectoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let members: i64 = directory_members::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let linked: i64 = directory_members::table
            .filter(directory_members::user_id.is_not_null())
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(DirectoryCounts {
            members: u64::try_from(members).unwrap_or_default(),
            linked_members: u64::try_from(linked).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, true, LinkOutcome::Linked)]
    #[case(0, true, LinkOutcome::AlreadyLinked)]
    #[case(0, false, LinkOutcome::MemberMissing)]
    fn link_outcome_follows_affected_rows(
        #[case] updated: usize,
        #[case] exists: bool,
        #[case] expected: LinkOutcome,
    ) {
        assert_eq!(link_outcome(updated, exists), expected);
    }

    #[rstest]
    fn corrupt_rows_become_query_errors() {
        let rows = vec![DirectoryMemberRow {
            id: 3,
            employee_number: "E-3".to_owned(),
            employee_email: "broken".to_owned(),
            first_name: "Broken".to_owned(),
            last_name: "Row".to_owned(),
            job: None,
            job_code: None,
            org_level_2: None,
            employment_status: None,
            user_id: None,
        }];

        let err = rows_to_members(rows).expect_err("corrupt email");

        assert!(matches!(err, DirectoryRepositoryError::Query { .. }));
    }

    #[rstest]
    fn org_level_lookup_trims_the_stored_value() {
        let org_level = OrgLevel::new("Engineering").expect("valid org level");

        let sql = diesel::debug_query::<Pg, _>(&org_level_query(&org_level)).to_string();

        assert!(
            sql.contains(r#"btrim("directory_members"."org_level_2") = $1"#),
            "unexpected SQL: {sql}"
        );
        assert!(sql.contains(r#"binds: ["Engineering"]"#), "unexpected binds: {sql}");
    }

    #[rstest]
    fn pool_failures_are_connection_errors() {
        assert!(matches!(
            map_pool_error(PoolError::build("no route to host")),
            DirectoryRepositoryError::Connection { .. }
        ));
    }
}
