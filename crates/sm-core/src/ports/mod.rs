//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases and the collaborators
//! the wizard talks to: the identity provider, navigation, alerts and the
//! state-change sink used by the presentation layer.

pub mod identity;
pub mod navigation;
pub mod notification;
mod registration_event_port;

pub use identity::{IdentityError, IdentityProviderPort};
pub use navigation::{NavigationPort, Screen};
pub use notification::NotificationPort;
pub use registration_event_port::RegistrationEventPort;
