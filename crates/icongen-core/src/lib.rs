//! Core types, traits, and errors for icongen.
//!
//! This crate provides the foundational types and abstractions shared by
//! the code generation, file synchronization and CLI crates.
//!
//! # Architecture
//!
//! The core consists of:
//! - Strong domain types (`IconAsset`, `Identifier`, `CanonicalIcon`,
//!   `GeneratedComponent`)
//! - Error hierarchy with contextual information
//! - Seam traits for asset discovery and filesystem access
//! - Generator configuration and host diagnostics

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;
mod types;

pub mod cli;
pub mod diagnostics;
pub mod traits;

pub use config::{
    CacheSettings, DEFAULT_RECOGNIZED_SIZES, GeneratorConfig, GeneratorConfigBuilder, RetryPolicy,
};
pub use diagnostics::{Diagnostic, DiagnosticSink, Severity};
pub use error::{Error, Result};
pub use types::{CanonicalIcon, GeneratedComponent, IconAsset, Identifier};
