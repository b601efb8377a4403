//! The login flow: a single-submission state machine wired between the
//! rendering collaborator and the identity endpoint.
//!
//! The shell feeds `FormEvent`s in and reads a `FormSnapshot` per render
//! cycle; the flow answers with `Effect`s (navigation, locale changes) that
//! the shell executes. Session writes happen inside the flow, on the
//! success path only.

pub mod controller;
pub mod establish;
pub mod redirect;

use crate::auth::AuthSession;

pub use controller::{FormSnapshot, LoginFlow};
pub use redirect::DEFAULT_LANDING_PATH;

/// Inputs the rendering layer may send to the flow.
#[derive(Debug, Clone)]
pub enum FormEvent {
    EmailChanged(String),
    PasswordChanged(String),
    RememberMeToggled(bool),
}

/// Result of one submission attempt. Produced exactly once per accepted
/// submit; never retried automatically.
#[derive(Debug, Clone)]
pub enum AuthOutcome {
    Success(AuthSession),
    Failure(String),
}

/// Outbound commands to collaborators outside the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Switch the application locale to the given language code
    ChangeLocale(String),
    /// Navigate to the given path
    Navigate(String),
}
