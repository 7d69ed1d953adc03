//! Core type definitions used across the Storefront workspace.

pub mod pagination;

pub use pagination::{PageMeta, PageRequest, PageResponse};
