//! Administrator handlers for the directory and account provisioning.
//!
//! ```text
//! GET  /api/admin/directory/unlinked
//! GET  /api/admin/dashboard
//! POST /api/admin/directory/{id}/account
//! POST /api/admin/directory/accounts {"selection":{"12":true,"13":false}}
//! ```

use std::collections::{BTreeMap, BTreeSet};

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::ports::{DirectoryStats, ProvisioningError};
use crate::domain::{Account, DirectoryMember, DirectoryMemberId, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{current_account, require_admin};
use crate::inbound::http::notification::{BatchNotification, Notification};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Checkbox state keyed by directory member id. Only `true` entries are
/// provisioned.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct ProvisionSelectionRequest {
    #[serde(default)]
    #[schema(value_type = Object, example = json!({"12": true, "13": false}))]
    pub selection: BTreeMap<i64, bool>,
}

async fn require_admin_session(state: &HttpState, session: &SessionContext) -> ApiResult<Account> {
    let account = current_account(state, session).await?;
    require_admin(&account)?;
    Ok(account)
}

fn parse_member_id(raw: i64) -> ApiResult<DirectoryMemberId> {
    DirectoryMemberId::new(raw).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "id", "value": raw, "code": "invalid_member_id" }))
    })
}

/// Positive ids ticked in the selection, plus how many ticked entries were
/// not valid member ids. Invalid entries are skipped rather than failing the
/// whole batch.
fn selected_ids(request: ProvisionSelectionRequest) -> (BTreeSet<DirectoryMemberId>, u64) {
    let mut invalid = 0_u64;
    let ids = request
        .selection
        .into_iter()
        .filter(|(_, selected)| *selected)
        .filter_map(|(raw, _)| match DirectoryMemberId::new(raw) {
            Ok(id) => Some(id),
            Err(err) => {
                debug!(member_id = raw, error = %err, "skipping invalid member id");
                invalid += 1;
                None
            }
        })
        .collect();
    (ids, invalid)
}

/// Translate a single-member provisioning outcome for the operator.
pub(crate) fn provisioning_response(
    outcome: Result<Account, ProvisioningError>,
) -> ApiResult<Notification> {
    match outcome {
        Ok(account) => Ok(Notification::account_created(&account)),
        Err(ProvisioningError::AlreadyProvisioned { member_id }) => {
            Ok(Notification::already_provisioned(member_id))
        }
        Err(ProvisioningError::MemberNotFound { member_id }) => Err(Error::not_found(format!(
            "directory member {member_id} was not found"
        ))),
        Err(ProvisioningError::AccountCreationFailed { message }) => {
            Err(Error::conflict("account creation failed")
                .with_details(json!({ "code": "account_creation_failed", "reason": message })))
        }
        Err(ProvisioningError::Unavailable { message }) => {
            Err(Error::service_unavailable(message))
        }
    }
}

/// Directory members that do not have an account yet.
#[utoipa::path(
    get,
    path = "/api/admin/directory/unlinked",
    responses(
        (status = 200, description = "Unlinked members", body = [DirectoryMember]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["admin"],
    operation_id = "listUnlinkedMembers"
)]
#[get("/admin/directory/unlinked")]
pub async fn list_unlinked(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<DirectoryMember>>> {
    require_admin_session(&state, &session).await?;
    let members = state.directory_admin.list_unlinked().await?;
    Ok(web::Json(members))
}

/// Directory and account counters.
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses(
        (status = 200, description = "Dashboard counters", body = DirectoryStats),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["admin"],
    operation_id = "dashboard"
)]
#[get("/admin/dashboard")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<DirectoryStats>> {
    require_admin_session(&state, &session).await?;
    let stats = state.directory_admin.stats().await?;
    Ok(web::Json(stats))
}

/// Provision an account for one directory member.
#[utoipa::path(
    post,
    path = "/api/admin/directory/{id}/account",
    params(("id" = i64, Path, description = "Directory member id")),
    responses(
        (status = 200, description = "Created, or already provisioned", body = Notification),
        (status = 400, description = "Invalid member id", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Unknown member", body = Error),
        (status = 409, description = "Account creation failed", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["admin"],
    operation_id = "createUser"
)]
#[post("/admin/directory/{id}/account")]
pub async fn create_account(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Notification>> {
    require_admin_session(&state, &session).await?;
    let member_id = parse_member_id(path.into_inner())?;
    let outcome = state.provisioning.provision_member(member_id).await;
    provisioning_response(outcome).map(web::Json)
}

/// Provision accounts for every selected directory member.
#[utoipa::path(
    post,
    path = "/api/admin/directory/accounts",
    request_body = ProvisionSelectionRequest,
    responses(
        (status = 200, description = "Batch summary", body = BatchNotification),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["admin"],
    operation_id = "createSelectedUsers"
)]
#[post("/admin/directory/accounts")]
pub async fn create_selected_accounts(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProvisionSelectionRequest>,
) -> ApiResult<web::Json<BatchNotification>> {
    require_admin_session(&state, &session).await?;
    let (selection, invalid) = selected_ids(payload.into_inner());
    let mut tally = state.provisioning.provision_selected(&selection).await;
    tally.skipped_count += invalid;
    Ok(web::Json(tally.into()))
}

#[cfg(test)]
#[path = "admin_tests.rs"]
mod tests;
