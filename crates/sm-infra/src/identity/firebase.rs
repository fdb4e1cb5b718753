//! Firebase identity provider over the public REST API.
//!
//! Accounts are created with the Identity Toolkit `accounts:signUp`
//! endpoint; the medical profile is then written to the Firestore
//! `users/<localId>` document using the returned id token. If that write
//! fails the new account is deleted again, so the same email can be retried.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, error, warn};

use sm_core::ids::AccountId;
use sm_core::ports::{IdentityError, IdentityProviderPort};
use sm_core::registration::{AccountRequest, MedicalProfile};
use sm_core::security::SecretString;

pub const DEFAULT_AUTH_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";
pub const DEFAULT_FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";

#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    pub api_key: String,
    pub project_id: String,
    pub auth_base_url: String,
    pub firestore_base_url: String,
    pub request_timeout: Duration,
}

impl FirebaseConfig {
    pub fn new(api_key: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            project_id: project_id.into(),
            auth_base_url: DEFAULT_AUTH_BASE_URL.to_string(),
            firestore_base_url: DEFAULT_FIRESTORE_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(15),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    local_id: String,
    id_token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

pub struct FirebaseIdentityProvider {
    client: Client,
    config: FirebaseConfig,
}

impl FirebaseIdentityProvider {
    pub fn new(config: FirebaseConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("failed to build HTTP client for Firebase")?;
        Ok(Self { client, config })
    }

    fn auth_url(&self, action: &str) -> String {
        format!(
            "{}/accounts:{}",
            self.config.auth_base_url.trim_end_matches('/'),
            action
        )
    }

    fn user_document_url(&self, local_id: &str) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents/users/{}",
            self.config.firestore_base_url.trim_end_matches('/'),
            self.config.project_id,
            local_id
        )
    }

    async fn authenticate(
        &self,
        action: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthResponse, IdentityError> {
        let response = self
            .client
            .post(self.auth_url(action))
            .query(&[("key", self.config.api_key.as_str())])
            .json(&json!({
                "email": email,
                "password": password.expose(),
                "returnSecureToken": true,
            }))
            .send()
            .await
            .map_err(transport_error)?;

        let response = ensure_success(response).await?;
        response.json::<AuthResponse>().await.map_err(transport_error)
    }

    async fn write_profile(
        &self,
        auth: &AuthResponse,
        request: &AccountRequest,
    ) -> Result<(), IdentityError> {
        let response = self
            .client
            .patch(self.user_document_url(&auth.local_id))
            .bearer_auth(&auth.id_token)
            .json(&user_document(request))
            .send()
            .await
            .map_err(transport_error)?;

        ensure_success(response).await.map(|_| ())
    }

    async fn delete_account(&self, auth: &AuthResponse) -> Result<(), IdentityError> {
        let response = self
            .client
            .post(self.auth_url("delete"))
            .query(&[("key", self.config.api_key.as_str())])
            .json(&json!({ "idToken": auth.id_token }))
            .send()
            .await
            .map_err(transport_error)?;

        ensure_success(response).await.map(|_| ())
    }
}

#[async_trait]
impl IdentityProviderPort for FirebaseIdentityProvider {
    async fn create_account(&self, request: AccountRequest) -> Result<AccountId, IdentityError> {
        let auth = self
            .authenticate("signUp", &request.email, &request.password)
            .await?;
        debug!(local_id = %auth.local_id, "firebase account created, writing profile");
        if let Err(err) = self.write_profile(&auth, &request).await {
            warn!(local_id = %auth.local_id, error = %err, "profile write failed, deleting account");
            if let Err(rollback) = self.delete_account(&auth).await {
                error!(local_id = %auth.local_id, error = %rollback, "failed to delete account after profile write failure");
            }
            return Err(err);
        }
        Ok(AccountId::new(auth.local_id))
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AccountId, IdentityError> {
        let auth = self
            .authenticate("signInWithPassword", email, password)
            .await?;
        Ok(AccountId::new(auth.local_id))
    }
}

/// Firestore document for the `users` collection. The password is never stored.
fn user_document(request: &AccountRequest) -> Value {
    let MedicalProfile {
        blood_type,
        has_diabetes,
        diabetes_type,
        takes_medicine,
        medicine_type,
    } = &request.profile;

    let mut fields = Map::new();
    fields.insert("name".into(), string_value(&request.name));
    fields.insert("email".into(), string_value(&request.email));
    fields.insert("phone".into(), string_value(&request.phone));
    fields.insert("bloodType".into(), string_value(blood_type));
    fields.insert("hasDiabetes".into(), json!({ "booleanValue": has_diabetes }));
    fields.insert("takesMedicine".into(), json!({ "booleanValue": takes_medicine }));
    if let Some(diabetes_type) = diabetes_type {
        fields.insert("diabetesType".into(), string_value(diabetes_type));
    }
    if let Some(medicine_type) = medicine_type {
        fields.insert("medicineType".into(), string_value(medicine_type.as_str()));
    }
    json!({ "fields": fields })
}

fn string_value(value: &str) -> Value {
    json!({ "stringValue": value })
}

async fn ensure_success(response: Response) -> Result<Response, IdentityError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) => {
            warn!(%status, message = %envelope.error.message, "firebase refused the request");
            Err(IdentityError::Rejected(envelope.error.message))
        }
        Err(_) => {
            warn!(%status, "firebase returned an unreadable error");
            Err(IdentityError::Unavailable(format!("HTTP {}", status)))
        }
    }
}

fn transport_error(error: reqwest::Error) -> IdentityError {
    if error.is_timeout() {
        IdentityError::Unavailable("Délai d'attente dépassé".to_string())
    } else {
        IdentityError::Unavailable(error.to_string())
    }
}
