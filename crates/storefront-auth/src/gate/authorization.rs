//! Authorization gate: role check against the route requirement.

use tracing::debug;

use storefront_core::error::AppError;

use super::authentication::Identity;
use super::route::RouteRequirement;

/// Checks the identity's role against the route's declared roles.
///
/// Returns `Ok(())` if allowed, or a `Forbidden` error if denied.
pub fn authorize(identity: &Identity, requirement: &RouteRequirement) -> Result<(), AppError> {
    if requirement.admits(identity.role()) {
        return Ok(());
    }

    debug!(
        account_id = %identity.account_id(),
        role = %identity.role(),
        "Role not admitted by route"
    );
    Err(AppError::forbidden(format!(
        "Role '{}' is not allowed to access this resource",
        identity.role()
    )))
}
