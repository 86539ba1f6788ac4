//! Team directory resolution.
//!
//! A "team" is every directory member sharing the requesting account's
//! `org_level_2` key. The requester's own roster entry, matched by email, is
//! never part of their team.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{DirectoryRepository, TeamDirectoryQuery};
use crate::domain::{Account, DirectoryMember, Error, OrgLevel, sort_for_display};

/// Service implementing [`TeamDirectoryQuery`] over a directory repository.
#[derive(Clone)]
pub struct TeamDirectoryService<D> {
    directory: Arc<D>,
}

impl<D> TeamDirectoryService<D> {
    /// Create a new service over the given repository.
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }
}

impl<D> TeamDirectoryService<D>
where
    D: DirectoryRepository,
{
    async fn members_of(&self, org_level: &OrgLevel) -> Result<Vec<DirectoryMember>, Error> {
        let mut members = self.directory.find_by_org_level(org_level).await?;
        sort_for_display(&mut members);
        Ok(members)
    }
}

/// Error returned when a caller asks for a team without a grouping key.
pub(crate) fn missing_org_level_error() -> Error {
    Error::invalid_argument("org_level_2 is required").with_details(json!({
        "field": "org_level_2",
        "code": "missing_field",
    }))
}

#[async_trait]
impl<D> TeamDirectoryQuery for TeamDirectoryService<D>
where
    D: DirectoryRepository,
{
    async fn resolve_team(&self, account: &Account) -> Result<Vec<DirectoryMember>, Error> {
        let Some(org_level) = account.org_level_2.as_ref() else {
            return Ok(Vec::new());
        };

        let mut members = self.members_of(org_level).await?;
        members.retain(|member| member.employee_email != account.email);
        Ok(members)
    }

    async fn resolve_team_by_org_level(
        &self,
        org_level: &str,
    ) -> Result<Vec<DirectoryMember>, Error> {
        let org_level = OrgLevel::new(org_level).map_err(|_| missing_org_level_error())?;
        self.members_of(&org_level).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{DirectoryRepositoryError, MockDirectoryRepository};
    use crate::domain::{
        AccountId, DirectoryMemberId, EmailAddress, ErrorCode, HashedPassword, Role,
    };
    use rstest::{fixture, rstest};

    fn member(id: i64, first_name: &str, email: &str, org: &str) -> DirectoryMember {
        DirectoryMember {
            id: DirectoryMemberId::new(id).expect("positive id"),
            employee_number: format!("E-{id}"),
            employee_email: EmailAddress::new(email).expect("valid email"),
            first_name: first_name.to_owned(),
            last_name: "Example".to_owned(),
            job: None,
            job_code: None,
            org_level_2: OrgLevel::new(org).ok(),
            employment_status: Some("Active".to_owned()),
            user_id: None,
        }
    }

    fn account(email: &str, org: Option<&str>) -> Account {
        Account {
            id: AccountId::random(),
            name: "Requester".to_owned(),
            email: EmailAddress::new(email).expect("valid email"),
            role: Role::Member,
            password_hash: HashedPassword::new("$argon2id$stub"),
            org_level_2: org.and_then(|value| OrgLevel::new(value).ok()),
            profile: None,
        }
    }

    #[fixture]
    fn engineering() -> Vec<DirectoryMember> {
        vec![
            member(1, "Cy", "c@x", "Eng"),
            member(2, "Ann", "a@x", "Eng"),
            member(3, "Bo", "b@x", "Eng"),
        ]
    }

    fn service_returning(
        members: Vec<DirectoryMember>,
    ) -> TeamDirectoryService<MockDirectoryRepository> {
        let mut repo = MockDirectoryRepository::new();
        repo.expect_find_by_org_level()
            .times(1)
            .return_once(move |_| Ok(members));
        TeamDirectoryService::new(Arc::new(repo))
    }

    #[rstest]
    #[tokio::test]
    async fn resolve_team_excludes_requester_and_sorts(engineering: Vec<DirectoryMember>) {
        let service = service_returning(engineering);

        let team = service
            .resolve_team(&account("a@x", Some("Eng")))
            .await
            .expect("team resolves");

        let names: Vec<&str> = team.iter().map(|m| m.first_name.as_str()).collect();
        assert_eq!(names, vec!["Bo", "Cy"]);
    }

    #[rstest]
    #[tokio::test]
    async fn resolve_team_without_org_level_skips_storage() {
        let mut repo = MockDirectoryRepository::new();
        repo.expect_find_by_org_level().never();
        let service = TeamDirectoryService::new(Arc::new(repo));

        let team = service
            .resolve_team(&account("a@x", None))
            .await
            .expect("empty team");

        assert!(team.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn resolve_team_queries_the_account_org_level() {
        let mut repo = MockDirectoryRepository::new();
        repo.expect_find_by_org_level()
            .withf(|org| org.to_string() == "Sales")
            .times(1)
            .return_once(|_| Ok(Vec::new()));
        let service = TeamDirectoryService::new(Arc::new(repo));

        let team = service
            .resolve_team(&account("z@x", Some("Sales")))
            .await
            .expect("team resolves");

        assert!(team.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn resolve_team_by_org_level_keeps_everyone(engineering: Vec<DirectoryMember>) {
        let service = service_returning(engineering);

        let team = service
            .resolve_team_by_org_level("  Eng ")
            .await
            .expect("team resolves");

        let ids: Vec<i64> = team.iter().map(|m| m.id.get()).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[tokio::test]
    async fn resolve_team_by_org_level_rejects_blank(#[case] raw: &str) {
        let mut repo = MockDirectoryRepository::new();
        repo.expect_find_by_org_level().never();
        let service = TeamDirectoryService::new(Arc::new(repo));

        let err = service
            .resolve_team_by_org_level(raw)
            .await
            .expect_err("blank org level is rejected");

        assert_eq!(err.code(), ErrorCode::InvalidArgument);
        let details = err.details().expect("details present");
        assert_eq!(details["field"], "org_level_2");
        assert_eq!(details["code"], "missing_field");
    }

    #[rstest]
    #[tokio::test]
    async fn connection_failures_surface_as_unavailable() {
        let mut repo = MockDirectoryRepository::new();
        repo.expect_find_by_org_level()
            .return_once(|_| Err(DirectoryRepositoryError::connection("pool exhausted")));
        let service = TeamDirectoryService::new(Arc::new(repo));

        let err = service
            .resolve_team(&account("a@x", Some("Eng")))
            .await
            .expect_err("storage failure propagates");

        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
