//! Identity helpers shared by authenticated handlers.
//!
//! Handlers load the requesting account explicitly from the session id on
//! every request; nothing is cached between requests.

use tracing::warn;

use crate::domain::ports::AccountQuery;
use crate::domain::{Account, AccountId, Error};

use super::ApiResult;
use super::session::SessionContext;
use super::state::HttpState;

/// Load the account behind `account_id`.
///
/// A session that points at a deleted account is treated as logged out.
pub(crate) async fn load_account(
    accounts: &dyn AccountQuery,
    account_id: &AccountId,
) -> ApiResult<Account> {
    match accounts.find_account(account_id).await? {
        Some(account) => Ok(account),
        None => {
            warn!(account_id = %account_id, "session refers to an unknown account");
            Err(Error::unauthorized("login required"))
        }
    }
}

/// Resolve the account making the current request.
pub(crate) async fn current_account(
    state: &HttpState,
    session: &SessionContext,
) -> ApiResult<Account> {
    let account_id = session.require_account_id()?;
    load_account(state.accounts.as_ref(), &account_id).await
}

/// Reject accounts without the administrator role.
pub(crate) fn require_admin(account: &Account) -> ApiResult<()> {
    if account.role.is_admin() {
        Ok(())
    } else {
        Err(Error::forbidden("administrator role required"))
    }
}
