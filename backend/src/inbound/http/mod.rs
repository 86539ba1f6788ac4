//! HTTP inbound adapter exposing REST endpoints.

pub mod accounts;
pub mod admin;
pub mod auth;
pub mod error;
pub mod health;
pub mod notification;
pub mod session;
pub mod session_config;
pub mod state;
pub mod team;
#[cfg(test)]
pub mod test_utils;

use actix_web::web;

pub use error::ApiResult;

/// Register every session-backed API route on the enclosing scope.
///
/// The caller wraps the scope with the session middleware and provides
/// [`state::HttpState`] as app data.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use coaching_backend::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(accounts::login)
        .service(accounts::logout)
        .service(accounts::me)
        .service(team::get_team)
        .service(team::get_team_by_org_level)
        .service(team::post_team_by_org_level)
        .service(admin::list_unlinked)
        .service(admin::dashboard)
        .service(admin::create_selected_accounts)
        .service(admin::create_account);
}
