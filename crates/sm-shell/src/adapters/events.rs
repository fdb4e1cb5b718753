use async_trait::async_trait;
use sm_core::ports::RegistrationEventPort;
use sm_core::registration::RegistrationState;
use tracing::{debug, warn};

/// Records every wizard state change in the log.
///
/// The serialized form never contains the passwords.
#[derive(Default)]
pub struct TracingRegistrationEventPort;

#[async_trait]
impl RegistrationEventPort for TracingRegistrationEventPort {
    async fn emit_registration_state_changed(&self, state: RegistrationState) {
        match serde_json::to_string(&state) {
            Ok(payload) => debug!(%payload, "registration state changed"),
            Err(err) => warn!(error = %err, "failed to serialize registration state"),
        }
    }
}
