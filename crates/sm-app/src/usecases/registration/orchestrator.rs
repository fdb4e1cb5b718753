//! Registration orchestrator.
//!
//! This module coordinates the registration state machine and its side
//! effects: alerts, navigation and the asynchronous account creation.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, info_span, warn, Instrument};

use sm_core::{
    ports::{IdentityProviderPort, NavigationPort, NotificationPort, RegistrationEventPort},
    registration::{
        review_lines, AccountRequest, FieldError, FormField, RegistrationAction,
        RegistrationError, RegistrationEvent, RegistrationState, RegistrationStateMachine,
        ReviewLine, TransitionError,
    },
};

use crate::usecases::registration::context::RegistrationContext;

/// Reason reported when the identity provider does not answer in time.
pub const SUBMISSION_TIMEOUT_REASON: &str =
    "Le serveur ne répond pas. Veuillez réessayer plus tard.";

/// Title of the alert shown when a step is rejected.
const VALIDATION_ALERT_TITLE: &str = "Erreur";

/// Errors produced by the registration wizard.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationWizardError {
    /// The current step failed validation; the reason was shown to the user.
    #[error(transparent)]
    Rejected(#[from] RegistrationError),
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error("L'inscription est déjà terminée.")]
    Completed,
}

impl From<TransitionError> for RegistrationWizardError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::Invalid(reason) => RegistrationWizardError::Rejected(reason),
            TransitionError::Field(err) => RegistrationWizardError::Field(err),
        }
    }
}

/// Orchestrator that drives the registration state and side effects.
#[derive(Clone)]
pub struct RegistrationWizard {
    context: Arc<RegistrationContext>,
    identity: Arc<dyn IdentityProviderPort>,
    navigation: Arc<dyn NavigationPort>,
    notifier: Arc<dyn NotificationPort>,
    event_port: Arc<dyn RegistrationEventPort>,
    submit_timeout: Duration,
}

impl RegistrationWizard {
    pub fn new(
        identity: Arc<dyn IdentityProviderPort>,
        navigation: Arc<dyn NavigationPort>,
        notifier: Arc<dyn NotificationPort>,
        event_port: Arc<dyn RegistrationEventPort>,
        submit_timeout: Duration,
    ) -> Self {
        Self {
            context: RegistrationContext::new(RegistrationState::new()).arc(),
            identity,
            navigation,
            notifier,
            event_port,
            submit_timeout,
        }
    }

    pub async fn edit_field(
        &self,
        field: FormField,
        value: impl Into<String>,
    ) -> Result<RegistrationState, RegistrationWizardError> {
        let event = RegistrationEvent::EditField {
            field,
            value: value.into(),
        };
        self.dispatch(event).await
    }

    /// "Suivant" on steps 1 to 3, "Terminer" on the review step.
    pub async fn advance(&self) -> Result<RegistrationState, RegistrationWizardError> {
        self.dispatch(RegistrationEvent::Advance).await
    }

    pub async fn retreat(&self) -> Result<RegistrationState, RegistrationWizardError> {
        self.dispatch(RegistrationEvent::Retreat).await
    }

    pub async fn transition_finished(&self) -> Result<RegistrationState, RegistrationWizardError> {
        self.dispatch(RegistrationEvent::TransitionFinished).await
    }

    pub async fn abandon(&self) -> Result<RegistrationState, RegistrationWizardError> {
        self.dispatch(RegistrationEvent::Abandon).await
    }

    pub async fn get_state(&self) -> RegistrationState {
        self.context.get_state().await
    }

    pub async fn review(&self) -> Vec<ReviewLine> {
        review_lines(&self.context.get_state().await.form)
    }

    /// Start a fresh registration, e.g. when the register screen is opened
    /// again after a completed one. Ignored while a submission is in flight.
    pub async fn restart(&self) -> RegistrationState {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        let current = self.context.get_state().await;
        if current.is_submitting() {
            debug!("restart ignored while submission is in flight");
            return current;
        }
        let fresh = RegistrationState::new();
        self.set_state_and_emit(fresh.clone()).await;
        fresh
    }

    /// Wait until the outstanding submission, if any, has delivered its outcome.
    pub async fn wait_for_submission(&self) {
        if let Some(handle) = self.context.take_submission().await {
            if let Err(err) = handle.await {
                error!(error = %err, "registration submission task failed");
            }
        }
    }

    async fn dispatch(
        &self,
        event: RegistrationEvent,
    ) -> Result<RegistrationState, RegistrationWizardError> {
        // Serializes user events with submission outcomes.
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;

        let span = info_span!("usecase.registration.dispatch", event = ?event);
        async {
            let current = self.context.get_state().await;
            if current.is_completed() {
                debug!("registration already completed, event ignored");
                return Err(RegistrationWizardError::Completed);
            }

            let event_name = format!("{:?}", event);
            let (next, actions) = match RegistrationStateMachine::transition(&current, event) {
                Ok(transition) => transition,
                Err(err) => {
                    warn!(step = current.step.number(), error = %err, "registration event rejected");
                    if let TransitionError::Invalid(reason) = &err {
                        self.notifier
                            .show_message(VALIDATION_ALERT_TITLE, &reason.to_string());
                    }
                    return Err(err.into());
                }
            };
            info!(
                from = ?current.step,
                to = ?next.step,
                submission = ?next.submission,
                event = %event_name,
                "registration state transition"
            );
            self.set_state_and_emit(next.clone()).await;
            self.execute_actions(&next, actions).await;

            Ok(next)
        }
        .instrument(span)
        .await
    }

    async fn execute_actions(&self, state: &RegistrationState, actions: Vec<RegistrationAction>) {
        let mut feedback = Vec::new();
        for action in actions {
            match action {
                RegistrationAction::SubmitAccount => {
                    debug!(action = "SubmitAccount", "registration executing action");
                    self.spawn_submission(AccountRequest::from_form(&state.form))
                        .await;
                }
                other => feedback.push(other),
            }
        }
        self.apply_feedback(feedback);
    }

    /// Alerts and navigation. Never starts a submission.
    fn apply_feedback(&self, actions: Vec<RegistrationAction>) {
        for action in actions {
            debug!(?action, "registration executing action");
            match action {
                RegistrationAction::ShowMessage { title, body } => {
                    self.notifier.show_message(&title, &body);
                }
                RegistrationAction::NavigateTo(screen) => {
                    self.navigation.navigate_to(screen);
                }
                RegistrationAction::SubmitAccount => {
                    error!("submission requested outside of a user dispatch");
                }
            }
        }
    }

    async fn spawn_submission(&self, request: AccountRequest) {
        let wizard = self.clone();
        let span = info_span!("usecase.registration.submit", email = %request.email);
        let handle = tokio::spawn(
            async move {
                let outcome = wizard.submit(request).await;
                wizard.on_submission_outcome(outcome).await;
            }
            .instrument(span),
        );
        self.context.track_submission(handle).await;
    }

    async fn submit(&self, request: AccountRequest) -> RegistrationEvent {
        match tokio::time::timeout(self.submit_timeout, self.identity.create_account(request))
            .await
        {
            Ok(Ok(account_id)) => {
                info!(%account_id, "account created");
                RegistrationEvent::SubmissionSucceeded { account_id }
            }
            Ok(Err(err)) => {
                warn!(error = %err, "identity provider refused the account");
                RegistrationEvent::SubmissionFailed {
                    reason: err.to_string(),
                }
            }
            Err(_) => {
                warn!(timeout = ?self.submit_timeout, "account creation timed out");
                RegistrationEvent::SubmissionFailed {
                    reason: SUBMISSION_TIMEOUT_REASON.to_string(),
                }
            }
        }
    }

    async fn on_submission_outcome(&self, event: RegistrationEvent) {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        let current = self.context.get_state().await;
        let event_name = format!("{:?}", event);

        match RegistrationStateMachine::transition(&current, event) {
            Ok((next, actions)) => {
                info!(
                    from = ?current.submission,
                    to = ?next.submission,
                    event = %event_name,
                    "registration submission settled"
                );
                self.set_state_and_emit(next).await;
                self.apply_feedback(actions);
            }
            Err(err) => {
                error!(error = %err, event = %event_name, "submission outcome rejected");
            }
        }
    }

    async fn set_state_and_emit(&self, state: RegistrationState) {
        self.context.set_state(state.clone()).await;
        self.event_port.emit_registration_state_changed(state).await;
    }
}
