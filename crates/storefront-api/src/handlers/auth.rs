//! Auth handlers: login, register, refresh, account, logout.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use storefront_auth::session::{RefreshCookie, RegisterAccount, SessionGrant};
use storefront_entity::account::AccountProfile;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, CreatedAccountResponse, LoginResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// Builds the http-only refresh cookie from a session directive.
///
/// A removal directive yields an empty, already-expired cookie, which clears
/// the client's copy whether or not the request carried one.
fn refresh_cookie(directive: RefreshCookie, secure: bool) -> Cookie<'static> {
    let max_age = i64::try_from(directive.max_age.as_secs()).unwrap_or(i64::MAX);
    Cookie::build((directive.name, directive.value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(max_age))
        .build()
}

fn grant_response(
    state: &AppState,
    jar: CookieJar,
    grant: SessionGrant,
    message: &str,
) -> (CookieJar, Json<ApiResponse<LoginResponse>>) {
    let secure = state.config.auth.refresh_cookie_secure;
    let jar = jar.add(refresh_cookie(grant.refresh_cookie, secure));
    let body = ApiResponse::ok(
        message,
        LoginResponse {
            access_token: grant.access_token,
            user: grant.user,
        },
    );
    (jar, Json(body))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<LoginResponse>>), ApiError> {
    let grant = state.session_manager.login(&req.email, &req.password).await?;
    Ok(grant_response(&state, jar, grant, "User login"))
}

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<Json<ApiResponse<CreatedAccountResponse>>, ApiError> {
    let account = state
        .session_manager
        .register(RegisterAccount {
            name: req.name,
            email: req.email,
            password: req.password,
            phone: req.phone,
            address: req.address,
        })
        .await?;

    Ok(Json(ApiResponse::ok(
        "Register a new user",
        CreatedAccountResponse::from(&account),
    )))
}

/// GET /api/v1/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<LoginResponse>>), ApiError> {
    let presented = jar
        .get(state.session_manager.cookie_name())
        .map(|c| c.value().to_string());

    let grant = state.session_manager.refresh(presented.as_deref()).await?;
    Ok(grant_response(&state, jar, grant, "Get user by refresh token"))
}

/// GET /api/v1/auth/account
pub async fn account(auth: AuthUser) -> Json<ApiResponse<AccountProfile>> {
    Json(ApiResponse::ok("Get user information", auth.profile().clone()))
}

/// POST /api/v1/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    auth: AuthUser,
) -> Result<(CookieJar, Json<ApiResponse<()>>), ApiError> {
    let directive = state.session_manager.logout(auth.identity()).await?;
    let removal = refresh_cookie(directive, state.config.auth.refresh_cookie_secure);

    Ok((jar.add(removal), Json(ApiResponse::ok("Logout user", ()))))
}
