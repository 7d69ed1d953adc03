//! Concrete PostgreSQL repositories.

pub mod account;

pub use account::AccountRepository;
