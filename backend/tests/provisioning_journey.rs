//! End-to-end HTTP journey: an administrator provisions accounts and a newly
//! provisioned member signs in to view their team.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use coaching_backend::Trace;
use coaching_backend::domain::ports::PasswordHasher;
use coaching_backend::domain::{
    Account, AccountId, AccountProvisioningService, AccountQueryService, DirectoryAdminService,
    DirectoryMember, DirectoryMemberId, EmailAddress, OrgLevel, PasswordLoginService, Role,
    TRACE_ID_HEADER, TeamDirectoryService,
};
use coaching_backend::inbound::http::configure_api;
use coaching_backend::inbound::http::state::{HttpState, HttpStatePorts};
use coaching_backend::outbound::memory::InMemoryStore;
use coaching_backend::outbound::password::Argon2PasswordHasher;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const ADMIN_PASSWORD: &str = "admin-secret";

fn member(id: i64, first_name: &str, last_name: &str, org: &str) -> DirectoryMember {
    DirectoryMember {
        id: DirectoryMemberId::new(id).expect("positive id"),
        employee_number: format!("E-{id:04}"),
        employee_email: EmailAddress::new(format!("{}@example.com", first_name.to_lowercase()))
            .expect("valid email"),
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        job: Some("Engineer".to_owned()),
        job_code: Some("ENG".to_owned()),
        org_level_2: OrgLevel::new(org).ok(),
        employment_status: Some("Active".to_owned()),
        user_id: None,
    }
}

#[fixture]
fn state() -> web::Data<HttpState> {
    let admin = Account {
        id: AccountId::random(),
        name: "Grace Hopper".to_owned(),
        email: EmailAddress::new("grace@example.com").expect("valid email"),
        role: Role::Admin,
        password_hash: Argon2PasswordHasher
            .hash(ADMIN_PASSWORD)
            .expect("hashing succeeds"),
        org_level_2: None,
        profile: None,
    };
    let store = Arc::new(
        InMemoryStore::default()
            .with_accounts([admin])
            .with_members([
                member(1, "Barbara", "Liskov", "Engineering"),
                member(2, "Donald", "Knuth", "Engineering"),
                member(3, "Frances", "Allen", "Engineering"),
                member(4, "John", "Backus", "Research"),
            ]),
    );
    let hasher = Arc::new(Argon2PasswordHasher);
    web::Data::new(HttpState::new(HttpStatePorts {
        login: Arc::new(PasswordLoginService::new(store.clone(), hasher.clone())),
        accounts: Arc::new(AccountQueryService::new(store.clone())),
        team: Arc::new(TeamDirectoryService::new(store.clone())),
        provisioning: Arc::new(AccountProvisioningService::new(
            store.clone(),
            store.clone(),
            hasher,
        )),
        directory_admin: Arc::new(DirectoryAdminService::new(store.clone(), store)),
    }))
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new().app_data($state.clone()).wrap(Trace).service(
                web::scope("/api")
                    .wrap(
                        SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                            .cookie_name("session".to_owned())
                            .cookie_secure(false)
                            .build(),
                    )
                    .configure(configure_api),
            ),
        )
        .await
    };
}

fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

#[rstest]
#[actix_web::test]
async fn provisioned_member_signs_in_and_sees_their_team(state: web::Data<HttpState>) {
    let app = init_app!(state);

    let login = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({ "email": "grace@example.com", "password": ADMIN_PASSWORD }))
            .to_request(),
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);
    let admin_cookie = session_cookie(&login);

    let batch: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/admin/directory/accounts")
            .cookie(admin_cookie.clone())
            .set_json(json!({ "selection": { "1": true, "2": true, "4": false } }))
            .to_request(),
    )
    .await;
    assert_eq!(batch["level"], "success");
    assert_eq!(batch["created_count"], 2);
    assert_eq!(batch["skipped_count"], 0);

    let stats: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/admin/dashboard")
            .cookie(admin_cookie)
            .to_request(),
    )
    .await;
    assert_eq!(stats["linked_members"], 2);
    assert_eq!(stats["unlinked_members"], 2);
    assert_eq!(stats["accounts"], 3);

    let member_login = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({ "email": "barbara@example.com", "password": "changeme" }))
            .to_request(),
    )
    .await;
    assert_eq!(member_login.status(), StatusCode::OK);
    let member_cookie = session_cookie(&member_login);

    let team: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/team")
            .cookie(member_cookie)
            .to_request(),
    )
    .await;
    assert_eq!(team["success"], true);
    assert_eq!(team["org_level_2"], "Engineering");
    let names: Vec<&str> = team["team_members"]
        .as_array()
        .expect("team members")
        .iter()
        .filter_map(|member| member["first_name"].as_str())
        .collect();
    assert_eq!(names, ["Donald", "Frances"]);
}

#[rstest]
#[actix_web::test]
async fn unauthenticated_requests_carry_trace_ids(state: web::Data<HttpState>) {
    let app = init_app!(state);

    let res = test::call_service(&app, test::TestRequest::get().uri("/api/me").to_request()).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let header = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["traceId"], header.as_str());
}

#[rstest]
#[actix_web::test]
async fn members_cannot_reach_admin_routes(state: web::Data<HttpState>) {
    let app = init_app!(state);

    let admin_cookie = {
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/login")
                .set_json(json!({ "email": "grace@example.com", "password": ADMIN_PASSWORD }))
                .to_request(),
        )
        .await;
        session_cookie(&res)
    };
    let created = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/admin/directory/3/account")
            .cookie(admin_cookie)
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::OK);

    let member_cookie = {
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/login")
                .set_json(json!({ "email": "frances@example.com", "password": "changeme" }))
                .to_request(),
        )
        .await;
        session_cookie(&res)
    };
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/admin/dashboard")
            .cookie(member_cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}
