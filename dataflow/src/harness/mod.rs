//! The verification harness around the pipeline.
//!
//! The harness generates partition files, applies a program to them to
//! produce a reference result, and validates a result file against an
//! expected one. The same actions back both the interactive menu and the
//! non-interactive subcommands of the binary.

mod config;
mod generator;
mod menu;
mod runner;
mod validate;

pub use config::HarnessConfig;
pub use generator::{generate, GeneratorConfig};
pub use menu::{Menu, Session};
pub use runner::{apply_operations, ApplyOutcome};
pub use validate::{compare, validate, Validation};
