//! Filesystem side of icongen.
//!
//! - [`FileSynchronizer`] reconciles the output directory with the desired
//!   component set, retrying transient failures
//! - [`DiskStore`] is the [`FileStore`](icongen_core::traits::FileStore)
//!   over the local disk, with atomic whole-document writes
//! - [`DirectorySource`] and [`EmbeddedSource`] supply icon assets
//!
//! All types are `Send + Sync` so the pipeline can run on a blocking task.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod retry;
pub mod source;
pub mod store;
pub mod sync;

pub use source::{DirectorySource, EmbeddedSource};
pub use store::DiskStore;
pub use sync::{FileSynchronizer, SyncFailure, SyncOperation, SyncPlan, SyncReport, WriteOutcome};
