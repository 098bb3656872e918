//! CLI command implementations.

pub mod common;
pub mod completions;
pub mod generate;
pub mod plan;
