//! In-memory identity provider.
//!
//! Keeps accounts for the lifetime of the process. Used when no remote
//! provider is configured and in tests. Error messages follow the codes the
//! Firebase REST API returns.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use sm_core::ids::AccountId;
use sm_core::ports::{IdentityError, IdentityProviderPort};
use sm_core::registration::{AccountRequest, MedicalProfile};
use sm_core::security::SecretString;

const MIN_PASSWORD_LEN: usize = 6;

struct StoredAccount {
    id: AccountId,
    password: SecretString,
    profile: MedicalProfile,
}

#[derive(Default)]
pub struct InMemoryIdentityProvider {
    accounts: Mutex<HashMap<String, StoredAccount>>,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn account_count(&self) -> usize {
        self.accounts.lock().await.len()
    }

    /// Medical profile stored with the account, if the email is known.
    pub async fn profile(&self, email: &str) -> Option<MedicalProfile> {
        self.accounts
            .lock()
            .await
            .get(&email.to_lowercase())
            .map(|account| account.profile.clone())
    }
}

#[async_trait]
impl IdentityProviderPort for InMemoryIdentityProvider {
    async fn create_account(&self, request: AccountRequest) -> Result<AccountId, IdentityError> {
        let mut accounts = self.accounts.lock().await;
        let key = request.email.to_lowercase();
        if accounts.contains_key(&key) {
            return Err(IdentityError::Rejected("EMAIL_EXISTS".to_string()));
        }
        if request.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(IdentityError::Rejected(format!(
                "WEAK_PASSWORD : Password should be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        let id = AccountId::new(Uuid::new_v4().simple().to_string());
        debug!(account_id = %id, "in-memory account created");
        accounts.insert(
            key,
            StoredAccount {
                id: id.clone(),
                password: request.password,
                profile: request.profile,
            },
        );
        Ok(id)
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AccountId, IdentityError> {
        let accounts = self.accounts.lock().await;
        match accounts.get(&email.to_lowercase()) {
            Some(account) if account.password.expose() == password.expose() => {
                Ok(account.id.clone())
            }
            _ => Err(IdentityError::Rejected(
                "INVALID_LOGIN_CREDENTIALS".to_string(),
            )),
        }
    }
}
