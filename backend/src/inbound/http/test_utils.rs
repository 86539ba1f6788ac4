//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test as actix_test, web};
use rstest::fixture;

use crate::Trace;
use crate::domain::ports::PasswordHasher;
use crate::domain::{
    Account, AccountId, AccountProvisioningService, AccountQueryService, DirectoryAdminService,
    DirectoryMember, DirectoryMemberId, EmailAddress, OrgLevel, PasswordLoginService, Role,
    TeamDirectoryService,
};
use crate::outbound::memory::InMemoryStore;
use crate::outbound::password::Argon2PasswordHasher;

use super::state::{HttpState, HttpStatePorts};

/// Password shared by every seeded account.
pub const SEEDED_PASSWORD: &str = "secret";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// In-memory store plus HTTP state wired with the real services.
pub struct TestWorld {
    pub store: Arc<InMemoryStore>,
    pub state: web::Data<HttpState>,
}

impl TestWorld {
    pub fn new(store: InMemoryStore) -> Self {
        let store = Arc::new(store);
        let hasher = Arc::new(Argon2PasswordHasher);
        let state = HttpState::new(HttpStatePorts {
            login: Arc::new(PasswordLoginService::new(store.clone(), hasher.clone())),
            accounts: Arc::new(AccountQueryService::new(store.clone())),
            team: Arc::new(TeamDirectoryService::new(store.clone())),
            provisioning: Arc::new(AccountProvisioningService::new(
                store.clone(),
                store.clone(),
                hasher,
            )),
            directory_admin: Arc::new(DirectoryAdminService::new(store.clone(), store.clone())),
        });
        Self {
            store,
            state: web::Data::new(state),
        }
    }
}

pub fn account(email: &str, role: Role, org_level: Option<&str>) -> Account {
    let password_hash = Argon2PasswordHasher
        .hash(SEEDED_PASSWORD)
        .expect("hashing succeeds");
    Account {
        id: AccountId::random(),
        name: email.split('@').next().unwrap_or_default().to_owned(),
        email: EmailAddress::new(email).expect("valid email"),
        role,
        password_hash,
        org_level_2: org_level.and_then(|org| OrgLevel::new(org).ok()),
        profile: None,
    }
}

pub fn member(id: i64, first_name: &str, email: &str, org_level: Option<&str>) -> DirectoryMember {
    DirectoryMember {
        id: DirectoryMemberId::new(id).expect("positive id"),
        employee_number: format!("E-{id}"),
        employee_email: EmailAddress::new(email).expect("valid email"),
        first_name: first_name.to_owned(),
        last_name: "Tester".to_owned(),
        job: Some("Engineer".to_owned()),
        job_code: None,
        org_level_2: org_level.and_then(|org| OrgLevel::new(org).ok()),
        employment_status: Some("Active".to_owned()),
        user_id: None,
    }
}

/// Two Engineering teammates for Ada, one Research member, a member account
/// for Ada and an administrator without a team.
#[fixture]
pub fn seeded_world() -> TestWorld {
    let ada = account("ada@example.com", Role::Member, Some("Engineering"));
    let admin = account("grace@example.com", Role::Admin, None);
    let mut ada_member = member(1, "Ada", "ada@example.com", Some("Engineering"));
    ada_member.user_id = Some(ada.id);

    TestWorld::new(
        InMemoryStore::default()
            .with_accounts([ada, admin])
            .with_members([
                ada_member,
                member(2, "Charles", "charles@example.com", Some("Engineering")),
                member(3, "Alan", "alan@example.com", Some("Engineering")),
                member(4, "Edsger", "edsger@example.com", Some("Research")),
            ]),
    )
}

/// Application with every API route, the session middleware and tracing.
pub fn test_app(
    world: &TestWorld,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    App::new()
        .app_data(world.state.clone())
        .wrap(Trace)
        .service(
            web::scope("/api")
                .wrap(test_session_middleware())
                .configure(super::configure_api),
        )
}

/// Log in and return the session cookie.
pub async fn login_cookie<S, B>(app: &S, email: &str, password: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/login")
            .set_json(serde_json::json!({ "email": email, "password": password }))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "login failed: {}", res.status());
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}
