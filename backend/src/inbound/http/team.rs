//! Team directory handlers.
//!
//! ```text
//! GET  /api/team
//! GET  /api/team/by-org-level?org_level_2=Engineering
//! POST /api/team/by-org-level {"org_level_2":"Engineering"}
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::team_directory::missing_org_level_error;
use crate::domain::{DirectoryMember, Error, OrgLevel};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::current_account;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const NO_TEAM_MESSAGE: &str = "No team assigned";

/// Team lookup payload.
///
/// Accounts without a grouping key get `success: false` with an empty list
/// rather than an error.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TeamResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_level_2: Option<OrgLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub team_members: Vec<DirectoryMember>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl TeamResponse {
    fn found(org_level: OrgLevel, members: Vec<DirectoryMember>) -> Self {
        Self {
            success: true,
            org_level_2: Some(org_level),
            message: None,
            count: Some(members.len()),
            team_members: members,
        }
    }

    fn no_team() -> Self {
        Self {
            success: false,
            org_level_2: None,
            message: Some(NO_TEAM_MESSAGE.to_owned()),
            team_members: Vec::new(),
            count: None,
        }
    }
}

/// Grouping key supplied by query string or JSON body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema, IntoParams)]
pub struct OrgLevelRequest {
    #[serde(default)]
    pub org_level_2: Option<String>,
}

/// Members sharing the caller's `org_level_2`, excluding the caller.
#[utoipa::path(
    get,
    path = "/api/team",
    responses(
        (status = 200, description = "Team members, or success=false without a team",
            body = TeamResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Directory unavailable", body = Error)
    ),
    tags = ["team"],
    operation_id = "getTeam"
)]
#[get("/team")]
pub async fn get_team(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<TeamResponse>> {
    let account = current_account(&state, &session).await?;
    let Some(org_level) = account.org_level_2.clone() else {
        return Ok(web::Json(TeamResponse::no_team()));
    };
    let members = state.team.resolve_team(&account).await?;
    Ok(web::Json(TeamResponse::found(org_level, members)))
}

async fn team_by_org_level(
    state: &HttpState,
    session: &SessionContext,
    request: OrgLevelRequest,
) -> ApiResult<web::Json<TeamResponse>> {
    current_account(state, session).await?;
    let org_level = request
        .org_level_2
        .and_then(|raw| OrgLevel::new(raw).ok())
        .ok_or_else(missing_org_level_error)?;
    let members = state
        .team
        .resolve_team_by_org_level(org_level.as_ref())
        .await?;
    Ok(web::Json(TeamResponse::found(org_level, members)))
}

/// Members of an explicit `org_level_2`, supplied as a query parameter.
#[utoipa::path(
    get,
    path = "/api/team/by-org-level",
    params(OrgLevelRequest),
    responses(
        (status = 200, description = "Team members", body = TeamResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 422, description = "Missing org_level_2", body = Error)
    ),
    tags = ["team"],
    operation_id = "getTeamByOrgLevel"
)]
#[get("/team/by-org-level")]
pub async fn get_team_by_org_level(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<OrgLevelRequest>,
) -> ApiResult<web::Json<TeamResponse>> {
    team_by_org_level(&state, &session, query.into_inner()).await
}

/// Members of an explicit `org_level_2`, supplied in a JSON body.
///
/// An absent or unreadable body is treated like one without the key.
#[utoipa::path(
    post,
    path = "/api/team/by-org-level",
    request_body = OrgLevelRequest,
    responses(
        (status = 200, description = "Team members", body = TeamResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 422, description = "Missing org_level_2", body = Error)
    ),
    tags = ["team"],
    operation_id = "postTeamByOrgLevel"
)]
#[post("/team/by-org-level")]
pub async fn post_team_by_org_level(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Option<web::Json<OrgLevelRequest>>,
) -> ApiResult<web::Json<TeamResponse>> {
    let request = payload.map(web::Json::into_inner).unwrap_or_default();
    team_by_org_level(&state, &session, request).await
}
