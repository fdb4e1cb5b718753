//! Suivi Médical Application Layer
//!
//! This crate contains the use cases that drive the domain through its ports.

pub mod usecases;

pub use usecases::{
    ContactCareProvider, ManageCareRecords, RegistrationWizard, RegistrationWizardError, SignIn,
    SignInError,
};
