//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer. Conversions into domain
//! types re-validate stored values so corrupt rows surface as query errors
//! instead of panics.

use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Account, AccountId, DirectoryMember, DirectoryMemberId, EmailAddress, HashedPassword,
    OrgLevel, PiProfile, Role,
};

use super::schema::{accounts, directory_members};

/// Row struct for reading from the accounts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub password_hash: String,
    pub org_level_2: Option<String>,
    pub pi_reference_profile: Option<String>,
    pub pi_pattern: Option<String>,
    pub pi_dominance: Option<f64>,
    pub pi_extraversion: Option<f64>,
    pub pi_patience: Option<f64>,
    pub pi_formality: Option<f64>,
}

/// Insertable struct for creating account records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
    pub password_hash: &'a str,
    pub org_level_2: Option<&'a str>,
}

/// Row struct for reading from the directory_members table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = directory_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DirectoryMemberRow {
    pub id: i64,
    pub employee_number: String,
    pub employee_email: String,
    pub first_name: String,
    pub last_name: String,
    pub job: Option<String>,
    pub job_code: Option<String>,
    pub org_level_2: Option<String>,
    pub employment_status: Option<String>,
    pub user_id: Option<Uuid>,
}

/// A stored value failed domain validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("stored {column} is invalid: {reason}")]
pub(crate) struct CorruptRow {
    pub column: &'static str,
    pub reason: String,
}

impl CorruptRow {
    fn new(column: &'static str, reason: impl ToString) -> Self {
        Self {
            column,
            reason: reason.to_string(),
        }
    }
}

impl AccountRow {
    fn profile(&self) -> Option<PiProfile> {
        let profile = PiProfile {
            reference_profile: self.pi_reference_profile.clone(),
            pattern: self.pi_pattern.clone(),
            dominance: self.pi_dominance,
            extraversion: self.pi_extraversion,
            patience: self.pi_patience,
            formality: self.pi_formality,
        };
        (!profile.is_empty()).then_some(profile)
    }

    /// Convert into the domain account, validating stored values.
    pub fn into_domain(self) -> Result<Account, CorruptRow> {
        let profile = self.profile();
        let email =
            EmailAddress::new(self.email).map_err(|err| CorruptRow::new("accounts.email", err))?;
        let role: Role = self
            .role
            .parse()
            .map_err(|err| CorruptRow::new("accounts.role", err))?;
        Ok(Account {
            id: AccountId::from(self.id),
            name: self.name,
            email,
            role,
            password_hash: HashedPassword::new(self.password_hash),
            org_level_2: OrgLevel::from_optional(self.org_level_2),
            profile,
        })
    }
}

impl DirectoryMemberRow {
    /// Convert into the domain member, validating stored values.
    pub fn into_domain(self) -> Result<DirectoryMember, CorruptRow> {
        let id = DirectoryMemberId::new(self.id)
            .map_err(|err| CorruptRow::new("directory_members.id", err))?;
        let employee_email = EmailAddress::new(self.employee_email)
            .map_err(|err| CorruptRow::new("directory_members.employee_email", err))?;
        Ok(DirectoryMember {
            id,
            employee_number: self.employee_number,
            employee_email,
            first_name: self.first_name,
            last_name: self.last_name,
            job: self.job,
            job_code: self.job_code,
            org_level_2: OrgLevel::from_optional(self.org_level_2),
            employment_status: self.employment_status,
            user_id: self.user_id.map(AccountId::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn account_row() -> AccountRow {
        AccountRow {
            id: Uuid::new_v4(),
            name: "Ada Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            role: "admin".to_owned(),
            password_hash: "$argon2id$stub".to_owned(),
            org_level_2: Some("  ".to_owned()),
            pi_reference_profile: None,
            pi_pattern: None,
            pi_dominance: None,
            pi_extraversion: None,
            pi_patience: None,
            pi_formality: None,
        }
    }

    #[fixture]
    fn member_row() -> DirectoryMemberRow {
        DirectoryMemberRow {
            id: 12,
            employee_number: "E-12".to_owned(),
            employee_email: "grace@example.com".to_owned(),
            first_name: "Grace".to_owned(),
            last_name: "Hopper".to_owned(),
            job: None,
            job_code: None,
            org_level_2: Some("Navy".to_owned()),
            employment_status: Some("Active".to_owned()),
            user_id: None,
        }
    }

    #[rstest]
    fn account_row_maps_blank_org_level_and_empty_profile(account_row: AccountRow) {
        let account = account_row.into_domain().expect("valid row");
        assert_eq!(account.role, Role::Admin);
        assert!(account.org_level_2.is_none());
        assert!(account.profile.is_none());
    }

    #[rstest]
    fn account_row_keeps_partial_profile(mut account_row: AccountRow) {
        account_row.pi_pattern = Some("Collaborator".to_owned());
        account_row.pi_dominance = Some(4.5);

        let profile = account_row
            .into_domain()
            .expect("valid row")
            .profile
            .expect("profile present");

        assert_eq!(profile.pattern.as_deref(), Some("Collaborator"));
        assert_eq!(profile.dominance, Some(4.5));
    }

    #[rstest]
    #[case("email", "not-an-email", "accounts.email")]
    #[case("role", "owner", "accounts.role")]
    fn account_row_rejects_corrupt_values(
        mut account_row: AccountRow,
        #[case] field: &str,
        #[case] value: &str,
        #[case] column: &str,
    ) {
        match field {
            "email" => account_row.email = value.to_owned(),
            _ => account_row.role = value.to_owned(),
        }
        let err = account_row.into_domain().expect_err("corrupt row");
        assert_eq!(err.column, column);
    }

    #[rstest]
    fn member_row_maps_link_state(mut member_row: DirectoryMemberRow) {
        let account_id = Uuid::new_v4();
        member_row.user_id = Some(account_id);

        let member = member_row.into_domain().expect("valid row");

        assert_eq!(member.id.get(), 12);
        assert_eq!(member.user_id, Some(AccountId::from(account_id)));
        assert_eq!(member.org_level_2.map(String::from).as_deref(), Some("Navy"));
    }

    #[rstest]
    fn member_row_rejects_non_positive_id(mut member_row: DirectoryMemberRow) {
        member_row.id = 0;
        let err = member_row.into_domain().expect_err("corrupt row");
        assert_eq!(err.column, "directory_members.id");
    }
}
