//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix cookie session so handlers only persist, read or purge the
//! authenticated account id.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{AccountId, Error};

pub(crate) const ACCOUNT_ID_KEY: &str = "account_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated account id in the session cookie.
    ///
    /// The session is renewed first so a pre-login cookie cannot be fixated.
    pub fn persist_account(&self, account_id: &AccountId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(ACCOUNT_ID_KEY, account_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current account id from the session, if present.
    ///
    /// A value that is not a UUID is treated as an anonymous session.
    pub fn account_id(&self) -> Result<Option<AccountId>, Error> {
        let raw = self
            .0
            .get::<String>(ACCOUNT_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|value| match value.parse::<AccountId>() {
            Ok(id) => Some(id),
            Err(error) => {
                tracing::warn!(%error, "invalid account id in session cookie");
                None
            }
        }))
    }

    /// Require an authenticated account id or return `401 Unauthorized`.
    pub fn require_account_id(&self) -> Result<AccountId, Error> {
        self.account_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop every session entry and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
