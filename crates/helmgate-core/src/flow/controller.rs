//! The login flow controller.
//!
//! `LoginFlow` owns the form draft and the single in-flight submission.
//! An accepted submit spawns one request task; its outcome comes back
//! through a channel and is folded into state the next time the shell
//! pumps `process_outcomes`. Re-entrant submits while a request is in
//! flight are no-ops.

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::api::ApiClient;
use crate::auth::classify::{self, AuthFailure};
use crate::auth::{AuthSession, Credentials, FieldErrors, SessionVault, ACCOUNT_INACTIVE_PATH};

use super::{establish, redirect, AuthOutcome, Effect, FormEvent};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the outcome channel.
/// Each accepted submission produces exactly one outcome; 4 leaves headroom
/// for a shell that pumps infrequently.
const OUTCOME_CHANNEL_SIZE: usize = 4;

/// Submission state. `Succeeded`/`Failed` are transient - the flow returns
/// to `Idle` in the same pump that handles the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlowState {
    Idle,
    Submitting,
}

/// What the rendering collaborator sees each cycle.
#[derive(Debug)]
pub struct FormSnapshot<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub remember_me: bool,
    pub field_errors: &'a FieldErrors,
    pub submitting: bool,
    /// User-visible alert text; the shell owns the accessible region it
    /// lands in and is responsible for moving focus to it.
    pub error: Option<&'a str>,
}

/// Orchestrates validation, submission, session establishment, failure
/// classification, and redirect resolution for one login form.
pub struct LoginFlow {
    api: ApiClient,
    vault: SessionVault,
    /// Raw query string of the navigational context, if any
    redirect_query: Option<String>,

    state: FlowState,
    email: String,
    password: String,
    remember_me: bool,
    field_errors: FieldErrors,
    login_error: Option<String>,

    outcome_tx: mpsc::Sender<AuthOutcome>,
    outcome_rx: mpsc::Receiver<AuthOutcome>,
}

impl LoginFlow {
    pub fn new(api: ApiClient, vault: SessionVault, redirect_query: Option<String>) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::channel(OUTCOME_CHANNEL_SIZE);

        Self {
            api,
            vault,
            redirect_query,
            state: FlowState::Idle,
            email: String::new(),
            password: String::new(),
            remember_me: false,
            field_errors: FieldErrors::default(),
            login_error: None,
            outcome_tx,
            outcome_rx,
        }
    }

    /// Apply a field-change event from the rendering layer
    pub fn apply(&mut self, event: FormEvent) {
        match event {
            FormEvent::EmailChanged(email) => self.email = email,
            FormEvent::PasswordChanged(password) => self.password = password,
            FormEvent::RememberMeToggled(remember_me) => self.remember_me = remember_me,
        }
    }

    /// Submit the current draft.
    ///
    /// Validation runs first; a rejected draft never reaches the network.
    /// A valid draft spawns exactly one request task and moves the flow to
    /// `Submitting`. Calling this while a submission is in flight does
    /// nothing.
    pub fn submit(&mut self) {
        if self.state == FlowState::Submitting {
            debug!("Submit ignored - a submission is already in flight");
            return;
        }

        let credentials = Credentials::new(
            self.email.clone(),
            self.password.clone(),
            self.remember_me,
        );

        if let Err(errors) = credentials.validate() {
            debug!(?errors, "Submission blocked by validation");
            self.field_errors = errors;
            return;
        }

        self.field_errors.clear();
        self.login_error = None;
        self.state = FlowState::Submitting;

        let api = self.api.clone();
        let tx = self.outcome_tx.clone();

        tokio::spawn(async move {
            let outcome = match api.login(&credentials.email, &credentials.password).await {
                Ok(payload) => AuthOutcome::Success(AuthSession::new(
                    payload.token,
                    payload.user,
                    credentials.remember_me,
                )),
                Err(e) => {
                    error!(error = %e, "Login request failed");
                    AuthOutcome::Failure(e.user_message())
                }
            };

            if tx.send(outcome).await.is_err() {
                error!("Failed to deliver login outcome - channel closed");
            }
        });
    }

    /// Drain pending outcomes into state changes and outbound effects.
    /// The shell calls this once per cycle, like any other background task
    /// check.
    pub fn process_outcomes(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.handle_outcome(outcome, &mut effects);
        }
        effects
    }

    fn handle_outcome(&mut self, outcome: AuthOutcome, effects: &mut Vec<Effect>) {
        // The draft password is discarded as soon as the attempt is settled
        self.password.clear();
        self.state = FlowState::Idle;

        match outcome {
            AuthOutcome::Success(session) => {
                info!(user = %session.user.display_name(), "Login succeeded");
                effects.extend(establish::establish(&session, &self.vault));
                effects.push(Effect::Navigate(redirect::resolve(
                    self.redirect_query.as_deref(),
                )));
            }
            AuthOutcome::Failure(message) => {
                warn!(message = %message, "Login failed");
                match classify::classify(&message) {
                    AuthFailure::AccountInactive => {
                        self.login_error = None;
                        effects.push(Effect::Navigate(ACCOUNT_INACTIVE_PATH.to_string()));
                    }
                    AuthFailure::Generic(message) => {
                        self.login_error = Some(message);
                    }
                }
            }
        }
    }

    /// Render-cycle view of the form
    pub fn snapshot(&self) -> FormSnapshot<'_> {
        FormSnapshot {
            email: &self.email,
            password: &self.password,
            remember_me: self.remember_me,
            field_errors: &self.field_errors,
            submitting: self.state == FlowState::Submitting,
            error: self.login_error.as_deref(),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.state == FlowState::Submitting
    }

    pub fn vault(&self) -> &SessionVault {
        &self.vault
    }
}
