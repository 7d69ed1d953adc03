//! Request and response bodies.

pub mod request;
pub mod response;

pub use request::validate_request;
pub use response::ApiResponse;
