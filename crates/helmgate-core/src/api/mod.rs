//! HTTP client for the console's identity endpoint.

pub mod client;
pub mod error;

pub use client::{ApiClient, LoginPayload};
pub use error::{ApiError, GENERIC_AUTH_MESSAGE};
