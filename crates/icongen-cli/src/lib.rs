//! icongen CLI library.
//!
//! Exposes the pipeline, commands and formatters so they can be tested
//! and embedded (for example from a `build.rs`).

#![allow(clippy::format_push_string)]
#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod commands;
pub mod formatters;
pub mod pipeline;
pub mod runner;

pub use pipeline::{Generator, RunReport, RunStatus};
