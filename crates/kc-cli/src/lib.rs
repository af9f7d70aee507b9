//! KubeClaw CLI: library half of the `kubeclaw` binary.
//!
//! Exposes configuration loading, result rendering and the prompt loop so
//! `kc-e2e-tests` can drive them without a terminal.

pub mod config;
pub mod render;
pub mod repl;
