//! # sm-core
//!
//! Core domain models and business logic for Suivi Médical.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod care;
pub mod config;
pub mod ids;
pub mod login;
pub mod ports;
pub mod registration;
pub mod security;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use ids::AccountId;
pub use login::{LoginError, LoginForm};
pub use registration::{
    FormField, RegistrationAction, RegistrationEvent, RegistrationForm, RegistrationState,
    RegistrationStateMachine, RegistrationStep,
};
pub use security::SecretString;
