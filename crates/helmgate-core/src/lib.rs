//! Core library for the Helmgate admin console client.
//!
//! This crate owns the whole login flow a shell must drive: credential
//! validation, the single-submission state machine, session establishment
//! and storage, failure classification, and post-login redirect resolution.
//! Rendering is a collaborator, not a concern - the flow exposes a snapshot
//! per render cycle and accepts field-change and submit events in return.

pub mod api;
pub mod auth;
pub mod config;
pub mod flow;
pub mod models;

pub use api::{ApiClient, ApiError};
pub use auth::{AuthSession, Credentials, FieldError, FieldErrors, SessionVault};
pub use config::Config;
pub use flow::{AuthOutcome, Effect, FormEvent, FormSnapshot, LoginFlow};
pub use models::UserRecord;
