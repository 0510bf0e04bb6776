pub mod accounts;
pub mod admin_users;
pub mod auth;
pub mod health;
pub mod sellers;
pub mod store;

pub use health::health_handler;

use crate::common::ApiError;
use crate::domains::accounts::{authorize, Action, Actor};
use crate::server::middleware::AuthUser;

/// Gate an authenticated action: 401 when anonymous, 403 when the role does
/// not cover the action, the acting identity otherwise.
pub(crate) fn gate(user: Option<&AuthUser>, action: Action) -> Result<Actor, ApiError> {
    let actor = user.map(AuthUser::actor);
    authorize(actor.as_ref(), action, None).require()?;
    actor.ok_or_else(|| ApiError::Authentication("Authentication required".to_string()))
}
