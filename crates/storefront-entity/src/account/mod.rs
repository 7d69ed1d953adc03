//! Account domain entities.

pub mod model;
pub mod profile;
pub mod role;

pub use model::{Account, CreateAccount, UpdateAccount, normalize_email};
pub use profile::AccountProfile;
pub use role::AccountRole;
