//! Command-line entry point for the product showcase.
//!
//! Loads [`ShowcaseConfig`], then either serves the site, prints the
//! catalog fetched from the CMS, or inspects the schema migrations.
//!
//! # Modules
//!
//! - [`cli`]: clap argument types
//! - [`config`]: layered configuration via `confyg`
//! - [`app`]: logging setup and command dispatch

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod migration_handlers;

pub use app::{init_logging, run};
pub use cli::CliArgs;
pub use config::ShowcaseConfig;
