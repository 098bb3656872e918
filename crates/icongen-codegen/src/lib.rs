//! Code generation for icongen.
//!
//! Turns icon assets into component source text and builds the manifest
//! and gallery that index them:
//!
//! 1. [`resolver`] maps an asset name to an identifier and pixel size
//! 2. [`renderer`] binds size and colour parameters into the markup
//! 3. [`classifier`] buckets identifiers by recognized size
//! 4. [`manifest`] renders the C# index and the Razor gallery
//!
//! [`cache`] memoizes step 1 and 2 per asset content.
//!
//! # Examples
//!
//! ```
//! use std::collections::BTreeSet;
//! use icongen_codegen::{ComponentRenderer, ManifestBuilder, classify, resolve};
//! use icongen_core::IconAsset;
//!
//! let asset = IconAsset::new("alert-16", r#"<svg width="16"><path d="M0"/></svg>"#);
//! let icon = resolve(&asset).unwrap();
//!
//! let component = ComponentRenderer::new("#000").unwrap().render(&icon).unwrap();
//! assert_eq!(component.file_name("razor"), "Alert16.razor");
//!
//! let manifest = classify([(icon.identifier, icon.size_px)], &BTreeSet::from([16]));
//! let index = ManifestBuilder::new("BlazorOcticons", "Octicons")
//!     .unwrap()
//!     .build_index(&manifest)
//!     .unwrap();
//! assert!(index.contains("Alert16"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod cache;
pub mod classifier;
pub mod manifest;
pub mod renderer;
pub mod resolver;
pub mod template_engine;

pub use cache::{CacheKey, CacheLookup, CacheStatus, RenderCache, default_cache_path};
pub use classifier::{Manifest, SizeClassifier, classify};
pub use manifest::ManifestBuilder;
pub use renderer::ComponentRenderer;
pub use resolver::resolve;
pub use template_engine::TemplateEngine;
