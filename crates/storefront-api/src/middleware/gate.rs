//! Gate middleware: runs the authentication and authorization gates for every routed request.

use std::sync::Arc;

use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use tracing::debug;

use storefront_auth::gate::{
    self, AuthenticationGate, RequestAccess, RouteRequirement, RouteTable,
};

use crate::error::ApiError;

/// State for [`request_gate`]: the gate plus the route table built alongside the router.
#[derive(Debug, Clone)]
pub struct GateState {
    /// Verifies access tokens.
    pub gate: AuthenticationGate,
    /// Requirements keyed by method and path template.
    pub routes: Arc<RouteTable>,
}

/// Looks up the matched route's requirement and runs both gates.
///
/// On success the resolved identity is inserted into request extensions for
/// the `AuthUser` extractor. Applied with `route_layer`, so unmatched paths
/// never reach it. A known path called with a method it does not declare is
/// passed through so the router answers `405`.
pub async fn request_gate(
    State(state): State<GateState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let requirement = match state.routes.lookup(request.method().as_str(), &path) {
        Some(requirement) => requirement.clone(),
        None if state.routes.has_path(&path) => {
            debug!(method = %request.method(), path = %path, "Method not declared for route");
            return Ok(next.run(request).await);
        }
        None => RouteRequirement::authenticated(),
    };

    let bearer = request.headers().typed_get::<Authorization<Bearer>>();
    let token = bearer.as_ref().map(|auth| auth.token());

    let access = gate::evaluate(&state.gate, &requirement, token)?;

    if let RequestAccess::Authorized(identity) = access {
        request.extensions_mut().insert(identity);
    }

    Ok(next.run(request).await)
}
