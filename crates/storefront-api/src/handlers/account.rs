//! Account handlers: admin management, lookup, profile and password updates.

use axum::Json;
use axum::extract::{Path, Query, State};

use storefront_entity::account::UpdateAccount;
use storefront_service::NewAccount;

use crate::dto::request::{
    BulkCreateAccountsRequest, ChangePasswordRequest, CreateAccountRequest, UpdateProfileRequest,
    validate_request,
};
use crate::dto::response::{
    AccountPageResponse, AccountResponse, ApiResponse, BulkCreateResponse, CreatedAccountResponse,
};
use crate::error::ApiError;
use crate::extractors::path::parse_uuid;
use crate::extractors::{AuthUser, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// POST /api/v1/users
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateAccountRequest>,
) -> Result<Json<ApiResponse<CreatedAccountResponse>>, ApiError> {
    let account = state
        .account_service
        .create_by_admin(auth.identity(), NewAccount::from(req))
        .await?;

    Ok(Json(ApiResponse::ok(
        "Create a new user",
        CreatedAccountResponse::from(&account),
    )))
}

/// POST /api/v1/users/bulk
///
/// Entries that fail field validation are counted as failures alongside
/// those the service skips.
pub async fn bulk_create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<BulkCreateAccountsRequest>,
) -> Result<Json<ApiResponse<BulkCreateResponse>>, ApiError> {
    let submitted = req.accounts.len();
    let accepted: Vec<NewAccount> = req
        .accounts
        .into_iter()
        .filter(|item| validate_request(item).is_ok())
        .map(NewAccount::from)
        .collect();
    let rejected = submitted - accepted.len();

    let outcome = state
        .account_service
        .bulk_create(auth.identity(), accepted)
        .await?;

    Ok(Json(ApiResponse::ok(
        "Create a list of users",
        BulkCreateResponse {
            success: outcome.success,
            fail: outcome.fail + rejected,
        },
    )))
}

/// GET /api/v1/users?current=&pageSize=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<AccountPageResponse>>, ApiError> {
    let page = params.into_page_request()?;
    let accounts = state.account_service.list(page).await?;

    Ok(Json(ApiResponse::ok(
        "Fetch list user with paginate",
        AccountPageResponse {
            meta: accounts.meta,
            result: accounts.data.into_iter().map(AccountResponse::from).collect(),
        },
    )))
}

/// GET /api/v1/users/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    let account = state.account_service.get(parse_uuid(&id)?).await?;
    Ok(Json(ApiResponse::ok(
        "Fetch user by id",
        AccountResponse::from(account),
    )))
}

/// PATCH /api/v1/users
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    let account = state
        .account_service
        .update_profile(
            auth.identity(),
            UpdateAccount {
                id: req.id,
                name: req.name,
                phone: req.phone,
                address: req.address,
                avatar: req.avatar,
                updated_by: None,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(
        "Update a user",
        AccountResponse::from(account),
    )))
}

/// POST /api/v1/users/change-password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .account_service
        .change_password(auth.identity(), &req.current_password, &req.new_password)
        .await?;

    Ok(Json(ApiResponse::ok("Change password", ())))
}

/// POST /api/v1/users/{id}
pub async fn activate(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .account_service
        .activate(auth.identity(), parse_uuid(&id)?)
        .await?;
    Ok(Json(ApiResponse::ok("Activate a user", ())))
}

/// DELETE /api/v1/users/{id}
pub async fn deactivate(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .account_service
        .deactivate(auth.identity(), parse_uuid(&id)?)
        .await?;
    Ok(Json(ApiResponse::ok("Delete a user", ())))
}
