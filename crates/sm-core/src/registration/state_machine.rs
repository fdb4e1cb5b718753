//! Registration state machine.
//!
//! Defines a pure state transition function for the registration wizard.
//! Side effects are returned as [`RegistrationAction`]s and executed by the
//! application layer.

use std::fmt;

use serde::Serialize;

use crate::ids::AccountId;
use crate::ports::navigation::Screen;
use crate::registration::form::{FieldError, FormField, RegistrationForm};
use crate::registration::step::RegistrationStep;
use crate::registration::validation::{validate_step, RegistrationError};

/// Progress of the final account-creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SubmissionStatus {
    /// Nothing sent yet.
    Idle,
    /// Request handed to the identity provider, waiting for its answer.
    InFlight,
    /// The provider refused or could not be reached.
    Failed { reason: String },
    /// Account created. Terminal.
    Completed { account_id: AccountId },
}

/// Display-only fade of the step content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContentFade {
    Settled,
    /// The step just changed and its content is fading in.
    FadingIn,
}

/// Wizard state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistrationState {
    pub step: RegistrationStep,
    pub form: RegistrationForm,
    pub submission: SubmissionStatus,
    pub fade: ContentFade,
}

impl Default for RegistrationState {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationState {
    pub fn new() -> Self {
        Self {
            step: RegistrationStep::FIRST,
            form: RegistrationForm::new(),
            submission: SubmissionStatus::Idle,
            fade: ContentFade::Settled,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.submission, SubmissionStatus::InFlight)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.submission, SubmissionStatus::Completed { .. })
    }

    /// Opacity of the step content at the start of the current animation.
    pub fn content_opacity(&self) -> f32 {
        match self.fade {
            ContentFade::Settled => 1.0,
            ContentFade::FadingIn => 0.0,
        }
    }

    /// Fraction of the wizard already covered, from `0.0` on the first step to `1.0` on review.
    pub fn progress(&self) -> f32 {
        let done = f32::from(self.step.number() - RegistrationStep::FIRST.number());
        let total = f32::from(RegistrationStep::LAST.number() - RegistrationStep::FIRST.number());
        done / total
    }

    fn moved_to(mut self, step: RegistrationStep) -> Self {
        self.step = step;
        self.fade = ContentFade::FadingIn;
        self
    }
}

/// Events that drive the wizard.
#[derive(Clone, PartialEq, Eq)]
pub enum RegistrationEvent {
    /// User edited an input.
    EditField { field: FormField, value: String },
    /// User pressed "Suivant" / "Terminer".
    Advance,
    /// User pressed "Retour".
    Retreat,
    /// Step content finished fading in.
    TransitionFinished,
    /// Identity provider accepted the account (async result).
    SubmissionSucceeded { account_id: AccountId },
    /// Identity provider refused the account (async result).
    SubmissionFailed { reason: String },
    /// User left the registration screen.
    Abandon,
}

impl fmt::Debug for RegistrationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationEvent::EditField { field, value } => {
                let value: &dyn fmt::Debug = if field.is_secret() {
                    &"[REDACTED]"
                } else {
                    value
                };
                f.debug_struct("EditField")
                    .field("field", field)
                    .field("value", value)
                    .finish()
            }
            RegistrationEvent::Advance => f.write_str("Advance"),
            RegistrationEvent::Retreat => f.write_str("Retreat"),
            RegistrationEvent::TransitionFinished => f.write_str("TransitionFinished"),
            RegistrationEvent::SubmissionSucceeded { account_id } => f
                .debug_struct("SubmissionSucceeded")
                .field("account_id", account_id)
                .finish(),
            RegistrationEvent::SubmissionFailed { reason } => f
                .debug_struct("SubmissionFailed")
                .field("reason", reason)
                .finish(),
            RegistrationEvent::Abandon => f.write_str("Abandon"),
        }
    }
}

/// Side-effects produced by state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationAction {
    /// Hand the completed form to the identity provider.
    SubmitAccount,
    /// Show an alert to the user.
    ShowMessage { title: String, body: String },
    /// Leave the wizard.
    NavigateTo(Screen),
}

impl RegistrationAction {
    fn message(title: &str, body: impl Into<String>) -> Self {
        RegistrationAction::ShowMessage {
            title: title.to_string(),
            body: body.into(),
        }
    }
}

/// Why an event was refused. The state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error(transparent)]
    Invalid(#[from] RegistrationError),
    #[error(transparent)]
    Field(#[from] FieldError),
}

pub type Transition = (RegistrationState, Vec<RegistrationAction>);

/// Pure registration state machine.
pub struct RegistrationStateMachine;

impl RegistrationStateMachine {
    pub fn transition(
        state: &RegistrationState,
        event: RegistrationEvent,
    ) -> Result<Transition, TransitionError> {
        if state.is_completed() {
            return Ok(Self::unchanged(state));
        }

        match event {
            RegistrationEvent::EditField { field, value } => {
                let mut next = state.clone();
                next.form.set(field, &value)?;
                Ok((next, Vec::new()))
            }
            RegistrationEvent::Advance => {
                if state.is_submitting() {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("advance ignored while submission is in flight");
                    return Ok(Self::unchanged(state));
                }
                if let Err(err) = validate_step(state.step, &state.form) {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(step = state.step.number(), error = %err, "step rejected");
                    return Err(err.into());
                }
                match state.step.next() {
                    Some(step) => Ok((state.clone().moved_to(step), Vec::new())),
                    None => {
                        let mut next = state.clone();
                        next.submission = SubmissionStatus::InFlight;
                        Ok((next, vec![RegistrationAction::SubmitAccount]))
                    }
                }
            }
            RegistrationEvent::Retreat => {
                if state.is_submitting() {
                    return Ok(Self::unchanged(state));
                }
                match state.step.previous() {
                    Some(step) => {
                        let mut next = state.clone().moved_to(step);
                        next.submission = SubmissionStatus::Idle;
                        Ok((next, Vec::new()))
                    }
                    None => Ok(Self::unchanged(state)),
                }
            }
            RegistrationEvent::TransitionFinished => {
                let mut next = state.clone();
                next.fade = ContentFade::Settled;
                Ok((next, Vec::new()))
            }
            RegistrationEvent::SubmissionSucceeded { account_id } => {
                if !state.is_submitting() {
                    return Ok(Self::unchanged(state));
                }
                let body = format!("Inscription terminée pour {}", state.form.email);
                let next = RegistrationState {
                    step: state.step,
                    form: RegistrationForm::new(),
                    submission: SubmissionStatus::Completed { account_id },
                    fade: state.fade,
                };
                Ok((
                    next,
                    vec![
                        RegistrationAction::message("Succès", body),
                        RegistrationAction::NavigateTo(Screen::Login),
                    ],
                ))
            }
            RegistrationEvent::SubmissionFailed { reason } => {
                if !state.is_submitting() {
                    return Ok(Self::unchanged(state));
                }
                let mut next = state.clone();
                next.submission = SubmissionStatus::Failed {
                    reason: reason.clone(),
                };
                Ok((next, vec![RegistrationAction::message("Erreur", reason)]))
            }
            RegistrationEvent::Abandon => {
                if state.is_submitting() {
                    return Ok(Self::unchanged(state));
                }
                Ok((
                    RegistrationState::new(),
                    vec![RegistrationAction::NavigateTo(Screen::Login)],
                ))
            }
        }
    }

    fn unchanged(state: &RegistrationState) -> Transition {
        (state.clone(), Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::form::Answer;

    fn edit(state: &RegistrationState, field: FormField, value: &str) -> RegistrationState {
        let (next, actions) = RegistrationStateMachine::transition(
            state,
            RegistrationEvent::EditField {
                field,
                value: value.to_string(),
            },
        )
        .unwrap();
        assert!(actions.is_empty());
        next
    }

    fn advance(state: &RegistrationState) -> Result<Transition, TransitionError> {
        RegistrationStateMachine::transition(state, RegistrationEvent::Advance)
    }

    fn at_step(step: RegistrationStep) -> RegistrationState {
        RegistrationState {
            step,
            ..RegistrationState::new()
        }
    }

    fn filled_identity() -> RegistrationState {
        let mut state = RegistrationState::new();
        for (field, value) in [
            (FormField::Name, "Jeanne Martin"),
            (FormField::Email, "jeanne@example.fr"),
            (FormField::Phone, "0612345678"),
            (FormField::Password, "abc123"),
            (FormField::ConfirmPassword, "abc123"),
        ] {
            state = edit(&state, field, value);
        }
        state
    }

    fn submitting() -> RegistrationState {
        let mut state = filled_identity();
        state.step = RegistrationStep::Review;
        state.submission = SubmissionStatus::InFlight;
        state
    }

    #[test]
    fn registration_state_machine_starts_on_identity_step() {
        let state = RegistrationState::new();
        assert_eq!(state.step, RegistrationStep::Identity);
        assert_eq!(state.submission, SubmissionStatus::Idle);
        assert_eq!(state.progress(), 0.0);
        assert_eq!(state.content_opacity(), 1.0);
    }

    #[test]
    fn advance_with_missing_field_is_rejected_and_state_kept() {
        let state = edit(&RegistrationState::new(), FormField::Name, "Jeanne");

        let err = advance(&state).unwrap_err();

        assert_eq!(
            err,
            TransitionError::Invalid(RegistrationError::MissingField(FormField::Email))
        );
        assert_eq!(state.step, RegistrationStep::Identity);
    }

    #[test]
    fn advance_moves_to_next_step_and_starts_fade() {
        let (next, actions) = advance(&filled_identity()).unwrap();

        assert_eq!(next.step, RegistrationStep::Health);
        assert_eq!(next.fade, ContentFade::FadingIn);
        assert_eq!(next.content_opacity(), 0.0);
        assert!(actions.is_empty());

        let (settled, _) =
            RegistrationStateMachine::transition(&next, RegistrationEvent::TransitionFinished)
                .unwrap();
        assert_eq!(settled.content_opacity(), 1.0);
    }

    #[test]
    fn diabetic_patient_must_give_diabetes_type() {
        let mut state = at_step(RegistrationStep::Health);
        state = edit(&state, FormField::BloodType, "O+");
        state = edit(&state, FormField::HasDiabetes, "oui");

        assert_eq!(
            advance(&state).unwrap_err(),
            TransitionError::Invalid(RegistrationError::DiabetesTypeRequired)
        );

        state = edit(&state, FormField::DiabetesType, "Type 2");
        let (next, _) = advance(&state).unwrap();
        assert_eq!(next.step, RegistrationStep::Medication);
    }

    #[test]
    fn retreat_from_first_step_is_noop() {
        let state = RegistrationState::new();
        let (next, actions) =
            RegistrationStateMachine::transition(&state, RegistrationEvent::Retreat).unwrap();
        assert_eq!(next, state);
        assert!(actions.is_empty());
    }

    #[test]
    fn retreat_does_not_validate_current_step() {
        let state = at_step(RegistrationStep::Medication);
        assert_eq!(state.form.takes_medicine, Answer::Unset);

        let (next, _) =
            RegistrationStateMachine::transition(&state, RegistrationEvent::Retreat).unwrap();

        assert_eq!(next.step, RegistrationStep::Health);
    }

    #[test]
    fn advance_from_review_requests_submission_once() {
        let state = at_step(RegistrationStep::Review);

        let (next, actions) = advance(&state).unwrap();
        assert_eq!(next.submission, SubmissionStatus::InFlight);
        assert_eq!(actions, vec![RegistrationAction::SubmitAccount]);

        let (again, actions) = advance(&next).unwrap();
        assert_eq!(again, next);
        assert!(actions.is_empty());
    }

    #[test]
    fn retreat_is_ignored_while_submitting() {
        let state = submitting();
        let (next, _) =
            RegistrationStateMachine::transition(&state, RegistrationEvent::Retreat).unwrap();
        assert_eq!(next.step, RegistrationStep::Review);
    }

    #[test]
    fn edit_while_submitting_updates_form_and_keeps_submission() {
        let state = submitting();

        let next = edit(&state, FormField::Phone, "07 00 00 00 00");

        assert_eq!(next.submission, SubmissionStatus::InFlight);
        assert_eq!(next.step, RegistrationStep::Review);
        assert_eq!(next.form.phone, "07 00 00 00 00");
        assert_eq!(next.form.email, state.form.email);
    }

    #[test]
    fn retreat_after_failure_clears_the_failure() {
        let mut state = submitting();
        state.submission = SubmissionStatus::Failed {
            reason: "EMAIL_EXISTS".to_string(),
        };

        let (next, actions) =
            RegistrationStateMachine::transition(&state, RegistrationEvent::Retreat).unwrap();

        assert_eq!(next.step, RegistrationStep::Medication);
        assert_eq!(next.submission, SubmissionStatus::Idle);
        assert_eq!(next.form, state.form);
        assert!(actions.is_empty());
    }

    #[test]
    fn submission_success_completes_and_discards_form() {
        let state = submitting();

        let (next, actions) = RegistrationStateMachine::transition(
            &state,
            RegistrationEvent::SubmissionSucceeded {
                account_id: AccountId::new("uid-1"),
            },
        )
        .unwrap();

        assert!(next.is_completed());
        assert_eq!(next.form, RegistrationForm::new());
        assert_eq!(
            actions,
            vec![
                RegistrationAction::ShowMessage {
                    title: "Succès".to_string(),
                    body: "Inscription terminée pour jeanne@example.fr".to_string(),
                },
                RegistrationAction::NavigateTo(Screen::Login),
            ]
        );
    }

    #[test]
    fn completed_wizard_ignores_further_events() {
        let (completed, _) = RegistrationStateMachine::transition(
            &submitting(),
            RegistrationEvent::SubmissionSucceeded {
                account_id: AccountId::new("uid-1"),
            },
        )
        .unwrap();

        for event in [
            RegistrationEvent::Advance,
            RegistrationEvent::Retreat,
            RegistrationEvent::SubmissionSucceeded {
                account_id: AccountId::new("uid-2"),
            },
        ] {
            let (next, actions) = RegistrationStateMachine::transition(&completed, event).unwrap();
            assert_eq!(next, completed);
            assert!(actions.is_empty());
        }
    }

    #[test]
    fn submission_failure_keeps_review_step_and_reports_reason_verbatim() {
        let state = submitting();

        let (next, actions) = RegistrationStateMachine::transition(
            &state,
            RegistrationEvent::SubmissionFailed {
                reason: "EMAIL_EXISTS".to_string(),
            },
        )
        .unwrap();

        assert_eq!(next.step, RegistrationStep::Review);
        assert_eq!(
            next.submission,
            SubmissionStatus::Failed {
                reason: "EMAIL_EXISTS".to_string()
            }
        );
        assert_eq!(next.form, state.form);
        assert_eq!(
            actions,
            vec![RegistrationAction::ShowMessage {
                title: "Erreur".to_string(),
                body: "EMAIL_EXISTS".to_string(),
            }]
        );

        let (retry, actions) = advance(&next).unwrap();
        assert_eq!(retry.submission, SubmissionStatus::InFlight);
        assert_eq!(actions, vec![RegistrationAction::SubmitAccount]);
    }

    #[test]
    fn stale_submission_result_is_ignored() {
        let state = at_step(RegistrationStep::Review);
        let (next, actions) = RegistrationStateMachine::transition(
            &state,
            RegistrationEvent::SubmissionFailed {
                reason: "late".to_string(),
            },
        )
        .unwrap();
        assert_eq!(next, state);
        assert!(actions.is_empty());
    }

    #[test]
    fn abandon_discards_form_and_leaves() {
        let state = filled_identity();
        let (next, actions) =
            RegistrationStateMachine::transition(&state, RegistrationEvent::Abandon).unwrap();

        assert_eq!(next, RegistrationState::new());
        assert_eq!(actions, vec![RegistrationAction::NavigateTo(Screen::Login)]);
    }

    #[test]
    fn unknown_choice_is_a_field_error() {
        let err = RegistrationStateMachine::transition(
            &RegistrationState::new(),
            RegistrationEvent::EditField {
                field: FormField::TakesMedicine,
                value: "souvent".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, TransitionError::Field(_)));
    }

    #[test]
    fn edit_event_debug_redacts_passwords() {
        let event = RegistrationEvent::EditField {
            field: FormField::ConfirmPassword,
            value: "abc123".to_string(),
        };
        assert!(!format!("{event:?}").contains("abc123"));
    }

    #[test]
    fn progress_follows_step() {
        assert_eq!(at_step(RegistrationStep::Review).progress(), 1.0);
        let third = at_step(RegistrationStep::Medication).progress();
        assert!((third - 2.0 / 3.0).abs() < f32::EPSILON);
    }
}
