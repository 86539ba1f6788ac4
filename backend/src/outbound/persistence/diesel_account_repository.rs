//! PostgreSQL-backed `AccountRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{Account, AccountId, EmailAddress, NewAccount};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{AccountRow, CorruptRow, NewAccountRow};
use super::pool::{DbPool, PoolError};
use super::schema::accounts;

/// Diesel-backed implementation of the [`AccountRepository`] port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AccountRepositoryError {
    AccountRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> AccountRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => AccountRepositoryError::connection(message),
        DieselFailure::Query(message) => AccountRepositoryError::query(message),
        DieselFailure::UniqueViolation => AccountRepositoryError::query("unique constraint violated"),
    }
}

fn map_corrupt_row(error: CorruptRow) -> AccountRepositoryError {
    AccountRepositoryError::query(error.to_string())
}

fn map_insert_error(error: diesel::result::Error, email: &EmailAddress) -> AccountRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::UniqueViolation => AccountRepositoryError::duplicate_email(email.to_string()),
        DieselFailure::Connection(message) => AccountRepositoryError::connection(message),
        DieselFailure::Query(message) => AccountRepositoryError::query(message),
    }
}

fn non_negative(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn create(&self, account: &NewAccount) -> Result<Account, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewAccountRow {
            id: Uuid::new_v4(),
            name: account.name.as_str(),
            email: account.email.as_ref(),
            role: account.role.as_str(),
            password_hash: account.password_hash.as_str(),
            org_level_2: account.org_level_2.as_ref().map(AsRef::<str>::as_ref),
        };

        let stored: AccountRow = diesel::insert_into(accounts::table)
            .values(&row)
            .returning(AccountRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, &account.email))?;

        stored.into_domain().map_err(map_corrupt_row)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<AccountRow> = accounts::table
            .filter(accounts::id.eq(id.as_uuid()))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(AccountRow::into_domain)
            .transpose()
            .map_err(map_corrupt_row)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<AccountRow> = accounts::table
            .filter(accounts::email.eq(email.as_ref()))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(AccountRow::into_domain)
            .transpose()
            .map_err(map_corrupt_row)
    }

    async fn count(&self) -> Result<u64, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = accounts::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(non_negative(total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    fn email() -> EmailAddress {
        EmailAddress::new("ada@example.com").expect("valid email")
    }

    #[rstest]
    fn unique_violation_on_insert_is_duplicate_email() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint".to_owned()),
        );

        assert_eq!(
            map_insert_error(error, &email()),
            AccountRepositoryError::duplicate_email("ada@example.com")
        );
    }

    #[rstest]
    fn closed_connection_on_insert_is_connection_error() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        );

        assert!(matches!(
            map_insert_error(error, &email()),
            AccountRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    fn pool_failures_are_connection_errors() {
        assert_eq!(
            map_pool_error(PoolError::checkout("timed out")),
            AccountRepositoryError::connection("timed out")
        );
    }

    #[rstest]
    #[case(-1, 0)]
    #[case(0, 0)]
    #[case(42, 42)]
    fn counts_never_go_negative(#[case] raw: i64, #[case] expected: u64) {
        assert_eq!(non_negative(raw), expected);
    }
}
