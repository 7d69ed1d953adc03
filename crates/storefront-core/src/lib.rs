//! # storefront-core
//!
//! Core crate for the Storefront backend. Contains configuration schemas,
//! pagination types, and the unified error system shared by every other
//! crate in the workspace.
//!
//! This crate has **no** internal dependencies on other Storefront crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
