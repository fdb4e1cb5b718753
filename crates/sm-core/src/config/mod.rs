//! # Configuration DTO
//!
//! Maps the TOML configuration file onto plain data. This module holds no
//! policy: missing values become empty strings or zeros, and those are
//! facts. Defaults are resolved by the shell when the application is wired.

use std::path::PathBuf;

/// Which identity-provider adapter backs the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityProviderKind {
    /// Missing or empty `provider` maps here.
    Memory,
    Firebase,
}

/// Identity-provider settings (`[identity]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    /// Raw provider name as written in the file (may be empty)
    pub provider: String,
    pub api_key: String,
    pub project_id: String,
    pub auth_base_url: String,
    pub firestore_base_url: String,
    /// Zero means "not configured"
    pub request_timeout_secs: u64,
}

impl IdentityConfig {
    /// Anything other than `firebase` (case-insensitive) selects the
    /// in-memory provider.
    pub fn kind(&self) -> IdentityProviderKind {
        if self.provider.eq_ignore_ascii_case("firebase") {
            IdentityProviderKind::Firebase
        } else {
            IdentityProviderKind::Memory
        }
    }
}

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Data directory (empty when not configured)
    pub data_dir: PathBuf,

    pub identity: IdentityConfig,

    /// Registration submit timeout, zero when not configured
    pub submit_timeout_secs: u64,
}

impl AppConfig {
    /// Create AppConfig from a TOML value.
    ///
    /// Must not validate or compute defaults. Negative integers are read as
    /// zero.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let str_at = |section: &str, key: &str| -> String {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };
        let secs_at = |section: &str, key: &str| -> u64 {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_integer())
                .and_then(|v| u64::try_from(v).ok())
                .unwrap_or(0)
        };

        Ok(Self {
            data_dir: PathBuf::from(str_at("general", "data_dir")),
            identity: IdentityConfig {
                provider: str_at("identity", "provider"),
                api_key: str_at("identity", "api_key"),
                project_id: str_at("identity", "project_id"),
                auth_base_url: str_at("identity", "auth_base_url"),
                firestore_base_url: str_at("identity", "firestore_base_url"),
                request_timeout_secs: secs_at("identity", "request_timeout_secs"),
            },
            submit_timeout_secs: secs_at("registration", "submit_timeout_secs"),
        })
    }

    /// Create an empty AppConfig; every value is an "unset" fact.
    pub fn empty() -> Self {
        Self {
            data_dir: PathBuf::new(),
            identity: IdentityConfig {
                provider: String::new(),
                api_key: String::new(),
                project_id: String::new(),
                auth_base_url: String::new(),
                firestore_base_url: String::new(),
                request_timeout_secs: 0,
            },
            submit_timeout_secs: 0,
        }
    }

    /// Empty configuration rooted at a caller-computed data directory.
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            ..Self::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::Value;

    #[test]
    fn test_from_toml_reads_all_sections() {
        let toml_str = r#"
            [general]
            data_dir = "/var/lib/suivi"

            [identity]
            provider = "firebase"
            api_key = "key-123"
            project_id = "suivi-medical"
            request_timeout_secs = 5

            [registration]
            submit_timeout_secs = 30
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/suivi"));
        assert_eq!(config.identity.kind(), IdentityProviderKind::Firebase);
        assert_eq!(config.identity.api_key, "key-123");
        assert_eq!(config.identity.project_id, "suivi-medical");
        assert_eq!(config.identity.auth_base_url, "");
        assert_eq!(config.identity.request_timeout_secs, 5);
        assert_eq!(config.submit_timeout_secs, 30);
    }

    #[test]
    fn test_from_toml_missing_values_are_empty_facts() {
        let toml_value: Value = toml::from_str("[general]").unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config, AppConfig::empty());
        assert_eq!(config.identity.kind(), IdentityProviderKind::Memory);
    }

    #[test]
    fn test_from_toml_negative_timeout_reads_as_zero() {
        let toml_value: Value = toml::from_str(
            r#"
            [registration]
            submit_timeout_secs = -4
        "#,
        )
        .unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.submit_timeout_secs, 0);
    }

    #[test]
    fn test_unknown_provider_falls_back_to_memory() {
        let mut config = AppConfig::empty();
        config.identity.provider = "auth0".to_string();
        assert_eq!(config.identity.kind(), IdentityProviderKind::Memory);

        config.identity.provider = "Firebase".to_string();
        assert_eq!(config.identity.kind(), IdentityProviderKind::Firebase);
    }

    #[test]
    fn test_with_system_defaults_keeps_data_dir() {
        let config = AppConfig::with_system_defaults(PathBuf::from("/tmp/test"));

        assert_eq!(config.data_dir, PathBuf::from("/tmp/test"));
        assert_eq!(config.submit_timeout_secs, 0);
    }
}
