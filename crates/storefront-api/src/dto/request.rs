//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use storefront_core::error::AppError;
use storefront_service::NewAccount;

/// Runs `validator` rules and maps the first failure to a `Validation` error.
pub fn validate_request<T: Validate>(req: &T) -> Result<(), AppError> {
    req.validate().map_err(|errors| {
        let detail = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{field} is invalid"))
                })
            })
            .next()
            .unwrap_or_else(|| "Invalid request".to_string());
        AppError::validation(detail)
    })
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login identifier.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Self-service registration body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    /// Login identifier.
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    /// Password; the length policy is enforced by the session manager.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Shipping address.
    pub address: Option<String>,
}

/// Admin account creation body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAccountRequest {
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    /// Login identifier.
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    /// Initial password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Shipping address.
    pub address: Option<String>,
}

impl From<CreateAccountRequest> for NewAccount {
    fn from(req: CreateAccountRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
            phone: req.phone,
            address: req.address,
        }
    }
}

/// Bulk creation body: a JSON array of account entries.
///
/// Entries are validated one by one in the handler so a bad entry only
/// counts as a failure.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(transparent)]
pub struct BulkCreateAccountsRequest {
    /// Entries in submission order.
    #[validate(length(min = 1, message = "At least one user is required"))]
    pub accounts: Vec<CreateAccountRequest>,
}

/// Profile update body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// Account to update.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Shipping address.
    pub address: Option<String>,
    /// Avatar file name.
    pub avatar: Option<String>,
}

/// Password change body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    /// New password.
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}
