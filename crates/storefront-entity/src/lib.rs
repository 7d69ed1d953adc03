//! # storefront-entity
//!
//! Domain entity models for the Storefront credential store. Every struct in
//! this crate represents a database row or a domain value object. Database
//! entities additionally derive `sqlx::FromRow`.

pub mod account;
