//! # storefront-database
//!
//! The credential store: the [`CredentialStore`] trait consumed by the auth
//! crates, its PostgreSQL implementation, an in-memory implementation, and
//! the connection pool and migration runner.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod provider;
pub mod repositories;
pub mod store;

pub use connection::connect_pool;
pub use memory::MemoryCredentialStore;
pub use provider::connect_store;
pub use repositories::account::AccountRepository;
pub use store::CredentialStore;
