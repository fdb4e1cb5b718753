//! # Wiring
//!
//! Turns the configuration DTO into concrete settings and builds the
//! runtime. This is the only place where defaults are decided.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use sm_core::config::{AppConfig, IdentityProviderKind};
use sm_core::ports::IdentityProviderPort;
use sm_infra::identity::firebase::{DEFAULT_AUTH_BASE_URL, DEFAULT_FIRESTORE_BASE_URL};
use sm_infra::{FirebaseConfig, FirebaseIdentityProvider, InMemoryIdentityProvider};
use tracing::info;

use crate::bootstrap::runtime::AppRuntime;

pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(20);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const APP_DIR_NAME: &str = "suivi-medical";

/// Settings after defaults have been applied.
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub data_dir: PathBuf,
    pub logs_dir: PathBuf,
    pub identity: IdentityProviderKind,
    /// Present when `identity` is Firebase.
    pub firebase: Option<FirebaseConfig>,
    pub submit_timeout: Duration,
    pub request_timeout: Duration,
}

impl ResolvedSettings {
    /// Apply defaults to `config`. `system_data_dir` is used when the file
    /// leaves `data_dir` empty.
    pub fn resolve(config: &AppConfig, system_data_dir: PathBuf) -> anyhow::Result<Self> {
        let data_dir = if config.data_dir.as_os_str().is_empty() {
            system_data_dir
        } else {
            config.data_dir.clone()
        };
        let request_timeout = secs_or(config.identity.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT);
        let submit_timeout = secs_or(config.submit_timeout_secs, DEFAULT_SUBMIT_TIMEOUT);

        let identity = config.identity.kind();
        let firebase = match identity {
            IdentityProviderKind::Memory => None,
            IdentityProviderKind::Firebase => {
                if config.identity.api_key.is_empty() || config.identity.project_id.is_empty() {
                    bail!("identity.api_key and identity.project_id are required for the firebase provider");
                }
                Some(FirebaseConfig {
                    api_key: config.identity.api_key.clone(),
                    project_id: config.identity.project_id.clone(),
                    auth_base_url: non_empty_or(&config.identity.auth_base_url, DEFAULT_AUTH_BASE_URL),
                    firestore_base_url: non_empty_or(
                        &config.identity.firestore_base_url,
                        DEFAULT_FIRESTORE_BASE_URL,
                    ),
                    request_timeout,
                })
            }
        };

        Ok(Self {
            logs_dir: data_dir.join("logs"),
            data_dir,
            identity,
            firebase,
            submit_timeout,
            request_timeout,
        })
    }
}

/// Platform data directory for the application, e.g.
/// `~/.local/share/suivi-medical` on Linux.
pub fn system_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Build the runtime for the resolved settings.
pub fn wire_runtime(settings: &ResolvedSettings) -> anyhow::Result<AppRuntime> {
    let identity: Arc<dyn IdentityProviderPort> = match &settings.firebase {
        Some(firebase) => {
            info!(project_id = %firebase.project_id, "using firebase identity provider");
            Arc::new(
                FirebaseIdentityProvider::new(firebase.clone())
                    .context("Failed to create firebase identity provider")?,
            )
        }
        None => {
            info!("using in-memory identity provider");
            Arc::new(InMemoryIdentityProvider::new())
        }
    };

    Ok(AppRuntime::new(
        identity,
        settings.submit_timeout,
        settings.request_timeout,
    ))
}

fn secs_or(secs: u64, default: Duration) -> Duration {
    if secs == 0 {
        default
    } else {
        Duration::from_secs(secs)
    }
}

fn non_empty_or(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}
