//! Infrastructure adapters for Suivi Médical.
//!
//! Implementations of the identity-provider port defined in `sm-core`.

pub mod identity;

pub use identity::{FirebaseConfig, FirebaseIdentityProvider, InMemoryIdentityProvider};
