//! Registration domain module.
//!
//! This module defines the four-step registration wizard: the form record,
//! per-step validators, the pure state machine and the review summary.

pub mod form;
pub mod profile;
pub mod state_machine;
pub mod step;
pub mod summary;
pub mod validation;

pub use form::{Answer, FieldError, FormField, MedicineType, RegistrationForm};
pub use profile::{AccountRequest, MedicalProfile};
pub use state_machine::{
    ContentFade, RegistrationAction, RegistrationEvent, RegistrationState,
    RegistrationStateMachine, SubmissionStatus, Transition, TransitionError,
};
pub use step::RegistrationStep;
pub use summary::{review_lines, ReviewLine};
pub use validation::{is_valid_email, is_valid_phone_number, validate_step, RegistrationError};
