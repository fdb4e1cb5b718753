//! Identity provider port
//!
//! The hosted authentication / account-storage service is an opaque
//! collaborator: it creates accounts and checks credentials, nothing else.

use async_trait::async_trait;

use crate::ids::AccountId;
use crate::registration::AccountRequest;
use crate::security::SecretString;

/// Failure reported by the identity provider.
///
/// The display text is the provider's own message and is shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// The provider answered and refused (duplicate email, weak password, bad credentials...).
    #[error("{0}")]
    Rejected(String),
    /// The provider could not be reached or answered something unreadable.
    #[error("{0}")]
    Unavailable(String),
}

#[async_trait]
pub trait IdentityProviderPort: Send + Sync {
    /// Create an account and attach the medical profile to it.
    async fn create_account(&self, request: AccountRequest) -> Result<AccountId, IdentityError>;

    /// Check credentials of an existing account.
    async fn sign_in(&self, email: &str, password: &SecretString)
        -> Result<AccountId, IdentityError>;
}
