//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every endpoint under `/api` plus the health probes,
//! the request and response payloads they exchange, and the session cookie
//! security scheme. The document is served by Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::DirectoryStats;
use crate::domain::{DirectoryMember, Error, ErrorCode, PiProfile, Role};
use crate::inbound::http::accounts::{AccountResponse, LoginRequest};
use crate::inbound::http::admin::ProvisionSelectionRequest;
use crate::inbound::http::notification::{BatchNotification, Notification, NotificationLevel};
use crate::inbound::http::team::{OrgLevelRequest, TeamResponse};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Coaching backend API",
        description = "Team directory lookups and account provisioning for coaching programmes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::accounts::me,
        crate::inbound::http::team::get_team,
        crate::inbound::http::team::get_team_by_org_level,
        crate::inbound::http::team::post_team_by_org_level,
        crate::inbound::http::admin::list_unlinked,
        crate::inbound::http::admin::dashboard,
        crate::inbound::http::admin::create_account,
        crate::inbound::http::admin::create_selected_accounts,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        DirectoryMember,
        Role,
        PiProfile,
        AccountResponse,
        LoginRequest,
        TeamResponse,
        OrgLevelRequest,
        Notification,
        NotificationLevel,
        BatchNotification,
        DirectoryStats,
        ProvisionSelectionRequest,
    )),
    tags(
        (name = "accounts", description = "Session login and the signed-in account"),
        (name = "team", description = "Team directory lookups"),
        (name = "admin", description = "Directory administration and account provisioning"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("Error", "code")]
    #[case("Error", "traceId")]
    #[case("DirectoryMember", "employee_email")]
    #[case("DirectoryMember", "org_level_2")]
    #[case("AccountResponse", "role")]
    #[case("TeamResponse", "team_members")]
    #[case("DirectoryStats", "unlinked_members")]
    fn schemas_expose_wire_fields(#[case] schema: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let found = schemas
            .get(schema)
            .unwrap_or_else(|| panic!("{schema} schema registered"));

        assert_object_schema_has_field(found, field);
    }

    #[rstest]
    #[case("/api/login")]
    #[case("/api/team")]
    #[case("/api/admin/directory/{id}/account")]
    #[case("/health/ready")]
    fn paths_are_registered(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
