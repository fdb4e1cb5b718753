//! Console implementations of the presentation ports.

pub mod console;
pub mod events;

pub use console::{ConsoleNavigator, ConsoleNotifier};
pub use events::TracingRegistrationEventPort;
