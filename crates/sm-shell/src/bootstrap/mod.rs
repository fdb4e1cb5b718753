pub mod config;
pub mod run;
pub mod runtime;
pub mod tracing;
pub mod wiring;

pub use config::load_config;
pub use run::run_console;
pub use runtime::AppRuntime;
pub use wiring::{wire_runtime, ResolvedSettings};
