//! Sign-in use case.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, info_span, warn, Instrument};

use sm_core::ids::AccountId;
use sm_core::login::{LoginError, LoginForm};
use sm_core::ports::{IdentityProviderPort, NavigationPort, NotificationPort, Screen};

use crate::usecases::registration::SUBMISSION_TIMEOUT_REASON;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignInError {
    #[error(transparent)]
    Invalid(#[from] LoginError),
    /// Provider message, verbatim.
    #[error("{0}")]
    Provider(String),
}

/// Checks the credentials with the identity provider and opens the home
/// screen on success.
pub struct SignIn {
    identity: Arc<dyn IdentityProviderPort>,
    navigation: Arc<dyn NavigationPort>,
    notifier: Arc<dyn NotificationPort>,
    timeout: Duration,
}

impl SignIn {
    pub fn new(
        identity: Arc<dyn IdentityProviderPort>,
        navigation: Arc<dyn NavigationPort>,
        notifier: Arc<dyn NotificationPort>,
        timeout: Duration,
    ) -> Self {
        Self {
            identity,
            navigation,
            notifier,
            timeout,
        }
    }

    pub async fn execute(&self, form: LoginForm) -> Result<AccountId, SignInError> {
        let span = info_span!("usecase.sign_in.execute", email = %form.email);
        async {
            if let Err(err) = form.validate() {
                self.notifier.show_message("Erreur", &err.to_string());
                return Err(err.into());
            }

            let outcome = tokio::time::timeout(
                self.timeout,
                self.identity.sign_in(&form.email, &form.password),
            )
            .await;
            let reason = match outcome {
                Ok(Ok(account_id)) => {
                    info!(%account_id, "signed in");
                    self.notifier.show_message(
                        "Connexion réussie",
                        &format!("Bienvenue, {}!", form.email),
                    );
                    self.navigation.navigate_to(Screen::Home);
                    return Ok(account_id);
                }
                Ok(Err(err)) => err.to_string(),
                Err(_) => SUBMISSION_TIMEOUT_REASON.to_string(),
            };

            warn!(reason = %reason, "sign-in failed");
            self.notifier.show_message("Erreur", &reason);
            Err(SignInError::Provider(reason))
        }
        .instrument(span)
        .await
    }
}
