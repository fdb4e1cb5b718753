use crate::registration::RegistrationState;

#[async_trait::async_trait]
pub trait RegistrationEventPort: Send + Sync {
    async fn emit_registration_state_changed(&self, state: RegistrationState);
}
