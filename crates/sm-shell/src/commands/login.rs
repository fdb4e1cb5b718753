//! Login command.

use sm_core::login::LoginForm;
use sm_core::security::SecretString;
use tracing::{info_span, Instrument};

use crate::bootstrap::AppRuntime;
use crate::commands::error::map_err;

pub async fn login(runtime: &AppRuntime, email: String, password: String) -> Result<String, String> {
    let span = info_span!("command.login", email = %email);
    async {
        let form = LoginForm::new(email, SecretString::new(password));
        let account = runtime
            .usecases()
            .sign_in()
            .execute(form)
            .await
            .map_err(map_err)?;
        Ok(format!("Compte {}", account))
    }
    .instrument(span)
    .await
}
