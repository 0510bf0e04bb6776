//! Role policy engine.
//!
//! A pure decision function mapping (actor, action, resource owner) to a
//! tagged Allow/Deny result. No request or database context is involved, so
//! every rule is unit-testable in isolation. Handlers translate a `Deny`
//! into the matching HTTP error (and, for listing mutations, into NotFound
//! to avoid leaking existence).

use uuid::Uuid;

use crate::common::ApiError;
use crate::domains::accounts::Role;

/// The authenticated identity making a request.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn new(id: Uuid, role: Role) -> Self {
        Self { id, role }
    }
}

/// Every gated operation in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Public: allowed for anonymous actors
    Login,
    Register,
    ListListings,
    ViewListing,
    ListCategories,

    // Any authenticated actor
    ViewOwnProfile,
    UpdateOwnProfile,
    ToggleLike,
    RequestSellerStatus,
    Logout,

    // Seller role required
    CreateListing,
    ListOwnListings,

    // Owner or admin
    UpdateListing,
    DeleteListing,

    // Admin (includes super_admin)
    ManageUsers,
    ManageSellers,
    ViewStats,

    // Super admin only
    DeleteAccount,
}

impl Action {
    fn is_public(&self) -> bool {
        matches!(
            self,
            Action::Login
                | Action::Register
                | Action::ListListings
                | Action::ViewListing
                | Action::ListCategories
        )
    }
}

/// Reason code attached to every denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    AuthenticationRequired,
    SellerRequired,
    AdminRequired,
    SuperAdminRequired,
    NotOwner,
}

/// Tagged authorization decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Map a denial onto the API error taxonomy (401 vs 403).
    pub fn require(self) -> Result<(), ApiError> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(DenyReason::AuthenticationRequired) => Err(ApiError::Authentication(
                "Authentication required".to_string(),
            )),
            Decision::Deny(DenyReason::SellerRequired) => Err(ApiError::Authorization(
                "Seller role required".to_string(),
            )),
            Decision::Deny(DenyReason::AdminRequired) => {
                Err(ApiError::Authorization("Admin access required".to_string()))
            }
            Decision::Deny(DenyReason::SuperAdminRequired) => Err(ApiError::Authorization(
                "Super admin access required".to_string(),
            )),
            Decision::Deny(DenyReason::NotOwner) => Err(ApiError::Authorization(
                "You do not own this resource".to_string(),
            )),
        }
    }
}

/// Decide whether `actor` may perform `action`.
///
/// `owner` is the owning account of the target resource, for ownership-gated
/// actions. Admin and super_admin bypass ownership checks; super_admin passes
/// every admin-gated check.
pub fn authorize(actor: Option<&Actor>, action: Action, owner: Option<Uuid>) -> Decision {
    if action.is_public() {
        return Decision::Allow;
    }

    let actor = match actor {
        Some(actor) => actor,
        None => return Decision::Deny(DenyReason::AuthenticationRequired),
    };

    match action {
        // Already handled above; authenticated actors may use public actions too.
        Action::Login
        | Action::Register
        | Action::ListListings
        | Action::ViewListing
        | Action::ListCategories => Decision::Allow,

        Action::ViewOwnProfile
        | Action::UpdateOwnProfile
        | Action::ToggleLike
        | Action::RequestSellerStatus
        | Action::Logout => Decision::Allow,

        Action::CreateListing | Action::ListOwnListings => {
            if actor.role.is_seller() {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::SellerRequired)
            }
        }

        Action::UpdateListing | Action::DeleteListing => {
            if actor.role.is_admin() {
                return Decision::Allow;
            }
            if !actor.role.is_seller() {
                return Decision::Deny(DenyReason::SellerRequired);
            }
            match owner {
                Some(owner_id) if owner_id == actor.id => Decision::Allow,
                _ => Decision::Deny(DenyReason::NotOwner),
            }
        }

        Action::ManageUsers | Action::ManageSellers | Action::ViewStats => {
            if actor.role.is_admin() {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::AdminRequired)
            }
        }

        Action::DeleteAccount => {
            if actor.role.is_super_admin() {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::SuperAdminRequired)
            }
        }
    }
}
