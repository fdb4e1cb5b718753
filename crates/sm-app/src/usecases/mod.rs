//! Business logic use cases

pub mod care;
pub mod contact;
pub mod registration;
pub mod sign_in;

pub use care::ManageCareRecords;
pub use contact::ContactCareProvider;
pub use registration::{RegistrationWizard, RegistrationWizardError};
pub use sign_in::{SignIn, SignInError};
