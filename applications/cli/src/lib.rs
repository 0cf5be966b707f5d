//! Sworn Player command line library
//!
//! Configuration loading and the headless commands behind the `sworn`
//! binary.

pub mod config;
pub mod error;
pub mod walk;

pub use config::SwornConfig;
pub use error::{CliError, Result};
