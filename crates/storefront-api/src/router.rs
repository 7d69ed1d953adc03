//! Route definitions for the Storefront HTTP API.
//!
//! Every route is registered together with its access requirement, so the
//! router and the route table cannot drift apart. All routes live under
//! [`API_PREFIX`].

use std::sync::Arc;

use axum::handler::Handler;
use axum::http::Method;
use axum::routing::{self, MethodRouter};
use axum::{Router, middleware as axum_middleware};

use storefront_auth::gate::{RouteRequirement, RouteTable};
use storefront_entity::account::AccountRole;

use crate::handlers;
use crate::middleware::gate::{GateState, request_gate};
use crate::state::AppState;

/// Path prefix shared by every route.
pub const API_PREFIX: &str = "/api/v1";

/// Builds the router and the route table side by side.
#[derive(Default)]
struct RouteRegistrar {
    router: Router<AppState>,
    table: RouteTable,
}

impl RouteRegistrar {
    fn register(
        mut self,
        method: Method,
        path: &str,
        requirement: RouteRequirement,
        endpoint: MethodRouter<AppState>,
    ) -> Self {
        let full_path = format!("{API_PREFIX}{path}");
        self.table.declare(method.as_str(), &full_path, requirement);
        self.router = self.router.route(&full_path, endpoint);
        self
    }

    fn get<H, T>(self, path: &str, requirement: RouteRequirement, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        self.register(Method::GET, path, requirement, routing::get(handler))
    }

    fn post<H, T>(self, path: &str, requirement: RouteRequirement, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        self.register(Method::POST, path, requirement, routing::post(handler))
    }

    fn patch<H, T>(self, path: &str, requirement: RouteRequirement, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        self.register(Method::PATCH, path, requirement, routing::patch(handler))
    }

    fn delete<H, T>(self, path: &str, requirement: RouteRequirement, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        self.register(Method::DELETE, path, requirement, routing::delete(handler))
    }
}

/// Auth endpoints: login, register, refresh, account, logout
fn auth_routes(r: RouteRegistrar) -> RouteRegistrar {
    r.post(
        "/auth/login",
        RouteRequirement::public(),
        handlers::auth::login,
    )
    .post(
        "/auth/register",
        RouteRequirement::public(),
        handlers::auth::register,
    )
    .get(
        "/auth/refresh",
        RouteRequirement::public(),
        handlers::auth::refresh,
    )
    .get(
        "/auth/account",
        RouteRequirement::authenticated(),
        handlers::auth::account,
    )
    .post(
        "/auth/logout",
        RouteRequirement::authenticated(),
        handlers::auth::logout,
    )
}

/// Account endpoints: admin management plus self-service profile and password
fn account_routes(r: RouteRegistrar) -> RouteRegistrar {
    let admin = || RouteRequirement::with_roles([AccountRole::Admin]);

    r.post("/users", admin(), handlers::account::create)
        .post("/users/bulk", admin(), handlers::account::bulk_create)
        .get("/users", admin(), handlers::account::list)
        .patch(
            "/users",
            RouteRequirement::authenticated(),
            handlers::account::update_profile,
        )
        .post(
            "/users/change-password",
            RouteRequirement::authenticated(),
            handlers::account::change_password,
        )
        .get(
            "/users/{id}",
            RouteRequirement::authenticated(),
            handlers::account::get,
        )
        .post("/users/{id}", admin(), handlers::account::activate)
        .delete("/users/{id}", admin(), handlers::account::deactivate)
}

/// Health check
fn health_routes(r: RouteRegistrar) -> RouteRegistrar {
    r.get("/health", RouteRequirement::public(), handlers::health::health)
}

/// Returns the API routes and their access requirements.
pub fn api_routes() -> (Router<AppState>, RouteTable) {
    let registrar = [auth_routes, account_routes, health_routes]
        .into_iter()
        .fold(RouteRegistrar::default(), |r, group| group(r));
    (registrar.router, registrar.table)
}

/// Build the API router with the gate middleware applied to every route.
pub fn build_router(state: AppState) -> Router {
    let (router, table) = api_routes();
    let gate_state = GateState {
        gate: state.auth_gate.clone(),
        routes: Arc::new(table),
    };

    router
        .route_layer(axum_middleware::from_fn_with_state(gate_state, request_gate))
        .with_state(state)
}
