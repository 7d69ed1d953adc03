//! Session lifecycle: login, refresh, logout and register.

pub mod manager;

pub use manager::{RefreshCookie, RegisterAccount, SessionGrant, SessionManager};
