//! Size classification.
//!
//! Builds the [`Manifest`]: the flat ordered list of identifiers plus one
//! bucket per recognized size. Icons whose size is not recognized stay in
//! `all` but land in no bucket.

use std::collections::{BTreeMap, BTreeSet};

use icongen_core::Identifier;
use serde::Serialize;

/// Ordered, size-partitioned index of every generated icon.
///
/// Both `all` and each bucket keep the order in which icons were pushed,
/// which the pipeline guarantees is sorted asset-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Manifest {
    /// Every identifier in run order
    pub all: Vec<Identifier>,
    /// Identifiers per recognized size; every recognized size is a key
    pub by_size: BTreeMap<u32, Vec<Identifier>>,
}

impl Manifest {
    /// Returns the number of icons in the manifest.
    #[must_use]
    pub fn len(&self) -> usize {
        self.all.len()
    }

    /// Returns `true` if the manifest lists no icons.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Returns the bucket for `size`, or an empty slice if the size is not
    /// recognized.
    #[must_use]
    pub fn bucket(&self, size: u32) -> &[Identifier] {
        self.by_size.get(&size).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Incremental builder for a [`Manifest`].
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use icongen_codegen::classifier::SizeClassifier;
/// use icongen_core::Identifier;
///
/// let recognized = BTreeSet::from([16, 24]);
/// let mut classifier = SizeClassifier::new(&recognized);
/// classifier.push(Identifier::new("Alert16"), 16);
/// classifier.push(Identifier::new("Mark20"), 20);
///
/// let manifest = classifier.finish();
/// assert_eq!(manifest.len(), 2);
/// assert_eq!(manifest.bucket(16), &[Identifier::new("Alert16")]);
/// assert!(manifest.bucket(24).is_empty());
/// assert!(manifest.bucket(20).is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct SizeClassifier {
    manifest: Manifest,
}

impl SizeClassifier {
    /// Creates a classifier with one empty bucket per recognized size.
    #[must_use]
    pub fn new(recognized: &BTreeSet<u32>) -> Self {
        let by_size = recognized.iter().map(|&size| (size, Vec::new())).collect();
        Self {
            manifest: Manifest {
                all: Vec::new(),
                by_size,
            },
        }
    }

    /// Appends an icon to `all` and, if its size is recognized, to its bucket.
    pub fn push(&mut self, identifier: Identifier, size_px: u32) {
        if let Some(bucket) = self.manifest.by_size.get_mut(&size_px) {
            bucket.push(identifier.clone());
        }
        self.manifest.all.push(identifier);
    }

    /// Returns the finished manifest.
    #[must_use]
    pub fn finish(self) -> Manifest {
        self.manifest
    }
}

/// Classifies `(identifier, size)` pairs in input order.
#[must_use]
pub fn classify<I>(icons: I, recognized: &BTreeSet<u32>) -> Manifest
where
    I: IntoIterator<Item = (Identifier, u32)>,
{
    let mut classifier = SizeClassifier::new(recognized);
    for (identifier, size_px) in icons {
        classifier.push(identifier, size_px);
    }
    classifier.finish()
}
