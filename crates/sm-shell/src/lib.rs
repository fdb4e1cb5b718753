//! Console adapter layer for Suivi Médical.
//!
//! Bootstraps configuration, tracing and wiring, and exposes the use cases
//! through line commands.

pub mod adapters;
pub mod bootstrap;
pub mod commands;
