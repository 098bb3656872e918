//! Seam traits for icongen.
//!
//! Everything that touches the outside world goes through one of these
//! traits, so the pipeline can be driven from a directory walk, embedded
//! data, a real disk, or a test double alike.
//!
//! # Module Structure
//!
//! - `source` - Icon asset discovery
//! - `store` - Filesystem access for the synchronizer

mod source;
mod store;

pub use source::AssetSource;
pub use store::FileStore;
