//! Request gates: authentication, then authorization, driven by the route table.

pub mod authentication;
pub mod authorization;
pub mod route;

pub use authentication::{AuthenticationGate, Identity};
pub use authorization::authorize;
pub use route::{RouteRequirement, RouteTable};

use storefront_core::error::AppError;

/// Outcome of running a request through both gates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestAccess {
    /// Public route; no identity was resolved.
    AuthorizedAnonymous,
    /// Protected route; the identity passed both gates.
    Authorized(Identity),
}

impl RequestAccess {
    /// The resolved identity, if any.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::AuthorizedAnonymous => None,
            Self::Authorized(identity) => Some(identity),
        }
    }
}

/// Runs the gates for one request.
///
/// Public routes pass without looking at the token. Otherwise the bearer
/// token must verify (`Unauthorized` if not) and the role must be admitted
/// (`Forbidden` if not).
pub fn evaluate(
    gate: &AuthenticationGate,
    requirement: &RouteRequirement,
    bearer: Option<&str>,
) -> Result<RequestAccess, AppError> {
    if requirement.public {
        return Ok(RequestAccess::AuthorizedAnonymous);
    }

    let identity = gate.authenticate(bearer)?;
    authorize(&identity, requirement)?;
    Ok(RequestAccess::Authorized(identity))
}
