//! Account management configuration.

use serde::{Deserialize, Serialize};

/// Account management settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountsConfig {
    /// Email of the built-in admin account. It can never be deactivated.
    #[serde(default = "default_protected_email")]
    pub protected_email: String,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            protected_email: default_protected_email(),
        }
    }
}

fn default_protected_email() -> String {
    "admin@gmail.com".to_string()
}
