//! Command-line Lightning Address resolver.
//!
//! # Modules
//!
//! - [`app`] - Wiring between arguments, configuration and the resolver
//! - [`cli`] - Command-line arguments
//! - [`config`] - TOML configuration with environment variable expansion
//! - [`error`] - CLI error types

pub mod app;
pub mod cli;
pub mod config;
pub mod error;

pub use cli::Cli;
pub use error::CliError;
