//! Account session handlers.
//!
//! ```text
//! POST /api/login {"email":"ada@example.com","password":"changeme"}
//! POST /api/logout
//! GET  /api/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    Account, AccountId, EmailAddress, Error, LoginCredentials, LoginValidationError, OrgLevel,
    PiProfile, Role,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::current_account;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/login`.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Public view of an account. The password hash never leaves the server.
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountResponse {
    pub id: AccountId,
    pub name: String,
    pub email: EmailAddress,
    pub role: Role,
    pub org_level_2: Option<OrgLevel>,
    pub profile: Option<PiProfile>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
            role: account.role,
            org_level_2: account.org_level_2,
            profile: account.profile,
        }
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::InvalidEmail(_) => {
            Error::invalid_request("email must be a valid address")
                .with_details(json!({ "field": "email", "code": "invalid_email" }))
        }
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Authenticate with email and password and establish a session.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AccountResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<AccountResponse>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let account_id = state.login.authenticate(&credentials).await?;
    session.persist_account(&account_id)?;
    let account = current_account(&state, &session).await?;
    Ok(web::Json(account.into()))
}

/// Drop the session cookie.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["accounts"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// Return the account behind the current session.
#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Current account", body = AccountResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "currentAccount"
)]
#[get("/me")]
pub async fn me(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<AccountResponse>> {
    let account = current_account(&state, &session).await?;
    Ok(web::Json(account.into()))
}
