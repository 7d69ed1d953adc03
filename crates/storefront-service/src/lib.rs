//! # storefront-service
//!
//! Account administration on top of the credential store. Services follow
//! constructor injection: every dependency is provided at construction time
//! via `Arc` references.

pub mod account;

pub use account::{AccountService, BulkOutcome, NewAccount};
