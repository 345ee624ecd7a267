pub mod auth;
pub mod client;
pub mod error;

pub use auth::{clear_session, load_session, store_session, AuthClient, AuthSession};
pub use client::{ApiClient, DateOrder};
pub use error::ApiError;
