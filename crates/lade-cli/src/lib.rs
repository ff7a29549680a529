//! lade CLI - declarative asset pipeline for single-page apps.
//!
//! This crate provides the command-line interface on top of `lade-config`
//! and `lade-pipeline`.
//!
//! # Architecture
//!
//! - [`cli`] - clap argument definitions
//! - [`commands`] - individual command implementations
//! - [`error`] - CLI error types and miette conversion
//! - [`logger`] - structured logging with tracing
//! - [`ui`] - terminal status messages and formatting

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
