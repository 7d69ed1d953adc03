//! Account administration and self-service profile operations.

pub mod service;

pub use service::{AccountService, BulkOutcome, NewAccount};
