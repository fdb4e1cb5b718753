//! # Use Cases Accessor
//!
//! [`AppRuntime`] owns the wired use cases and the console adapters.
//! Commands call `runtime.usecases().xxx()` to reach a use case.

use std::sync::Arc;
use std::time::Duration;

use sm_app::{ContactCareProvider, ManageCareRecords, RegistrationWizard, SignIn};
use sm_core::ports::{IdentityProviderPort, Screen};

use crate::adapters::{ConsoleNavigator, ConsoleNotifier, TracingRegistrationEventPort};

/// Application runtime with dependencies.
pub struct AppRuntime {
    registration_wizard: RegistrationWizard,
    sign_in: SignIn,
    care_records: ManageCareRecords,
    contact: ContactCareProvider,
    notifier: Arc<ConsoleNotifier>,
    navigator: Arc<ConsoleNavigator>,
}

impl AppRuntime {
    /// Build the runtime around an identity provider. The console starts on
    /// the login screen.
    pub fn new(
        identity: Arc<dyn IdentityProviderPort>,
        submit_timeout: Duration,
        request_timeout: Duration,
    ) -> Self {
        let notifier = Arc::new(ConsoleNotifier::new());
        let navigator = Arc::new(ConsoleNavigator::new(Screen::Login));
        let registration_wizard = RegistrationWizard::new(
            identity.clone(),
            navigator.clone(),
            notifier.clone(),
            Arc::new(TracingRegistrationEventPort),
            submit_timeout,
        );
        let sign_in = SignIn::new(identity, navigator.clone(), notifier.clone(), request_timeout);
        let contact = ContactCareProvider::new(notifier.clone());

        Self {
            registration_wizard,
            sign_in,
            care_records: ManageCareRecords::new(),
            contact,
            notifier,
            navigator,
        }
    }

    pub fn usecases(&self) -> UseCases<'_> {
        UseCases { runtime: self }
    }

    pub fn notifier(&self) -> &ConsoleNotifier {
        &self.notifier
    }

    pub fn navigator(&self) -> &ConsoleNavigator {
        &self.navigator
    }
}

/// Use cases accessor.
pub struct UseCases<'a> {
    runtime: &'a AppRuntime,
}

impl<'a> UseCases<'a> {
    pub fn registration_wizard(&self) -> &'a RegistrationWizard {
        &self.runtime.registration_wizard
    }

    pub fn sign_in(&self) -> &'a SignIn {
        &self.runtime.sign_in
    }

    pub fn care_records(&self) -> &'a ManageCareRecords {
        &self.runtime.care_records
    }

    pub fn contact(&self) -> &'a ContactCareProvider {
        &self.runtime.contact
    }
}
