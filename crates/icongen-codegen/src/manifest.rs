//! Manifest and gallery generation.
//!
//! The manifest is a C# static class listing every icon: one constant per
//! icon, the flat `All` list and the `BySize` map. The gallery is a Razor
//! fragment showing each non-empty size bucket as a row of buttons.

use icongen_core::{Identifier, Result};
use serde::Serialize;

use crate::classifier::Manifest;
use crate::template_engine::TemplateEngine;

#[derive(Serialize)]
struct SizeGroup<'a> {
    size: u32,
    identifiers: &'a [Identifier],
}

#[derive(Serialize)]
struct ManifestContext<'a> {
    namespace: &'a str,
    class_name: &'a str,
    icon_count: usize,
    all: &'a [Identifier],
    by_size: Vec<SizeGroup<'a>>,
}

#[derive(Serialize)]
struct GalleryItem<'a> {
    identifier: &'a Identifier,
    size: u32,
}

#[derive(Serialize)]
struct GalleryGroup<'a> {
    size: u32,
    items: Vec<GalleryItem<'a>>,
}

#[derive(Serialize)]
struct GalleryContext<'a> {
    groups: Vec<GalleryGroup<'a>>,
}

/// Builds manifest and gallery source text from a [`Manifest`].
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use icongen_codegen::classifier::classify;
/// use icongen_codegen::manifest::ManifestBuilder;
/// use icongen_core::Identifier;
///
/// let manifest = classify([(Identifier::new("Alert16"), 16)], &BTreeSet::from([16]));
/// let builder = ManifestBuilder::new("BlazorOcticons", "Octicons").unwrap();
///
/// let source = builder.build_index(&manifest).unwrap();
/// assert!(source.contains(r#"public const string I0 = "Alert16";"#));
/// ```
#[derive(Debug)]
pub struct ManifestBuilder {
    engine: TemplateEngine<'static>,
    namespace: String,
    class_name: String,
}

impl ManifestBuilder {
    /// Creates a builder emitting into `namespace`.`class_name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in templates fail to register.
    pub fn new(namespace: impl Into<String>, class_name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
            namespace: namespace.into(),
            class_name: class_name.into(),
        })
    }

    /// Renders the C# manifest.
    ///
    /// Every key of `by_size` is emitted, including empty buckets.
    ///
    /// # Errors
    ///
    /// Returns [`icongen_core::Error::TemplateError`] if rendering fails.
    pub fn build_index(&self, manifest: &Manifest) -> Result<String> {
        let context = ManifestContext {
            namespace: &self.namespace,
            class_name: &self.class_name,
            icon_count: manifest.len(),
            all: &manifest.all,
            by_size: manifest
                .by_size
                .iter()
                .map(|(&size, identifiers)| SizeGroup { size, identifiers })
                .collect(),
        };

        self.engine.render("manifest/index", &context)
    }

    /// Renders the gallery fragment.
    ///
    /// Sizes without icons get no heading.
    ///
    /// # Errors
    ///
    /// Returns [`icongen_core::Error::TemplateError`] if rendering fails.
    pub fn build_gallery(&self, manifest: &Manifest) -> Result<String> {
        let groups = manifest
            .by_size
            .iter()
            .filter(|(_, identifiers)| !identifiers.is_empty())
            .map(|(&size, identifiers)| GalleryGroup {
                size,
                items: identifiers
                    .iter()
                    .map(|identifier| GalleryItem { identifier, size })
                    .collect(),
            })
            .collect();

        self.engine
            .render("manifest/gallery", &GalleryContext { groups })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;
    use std::collections::BTreeSet;

    fn sample_manifest() -> Manifest {
        classify(
            [
                (Identifier::new("Alert16"), 16),
                (Identifier::new("Alert24"), 24),
                (Identifier::new("AlertFill16"), 16),
                (Identifier::new("MarkGithub20"), 20),
            ],
            &BTreeSet::from([12, 16, 24]),
        )
    }

    fn builder() -> ManifestBuilder {
        ManifestBuilder::new("BlazorOcticons", "Octicons").unwrap()
    }

    #[test]
    fn test_index_declares_namespace_and_class() {
        let source = builder().build_index(&sample_manifest()).unwrap();

        assert!(source.contains("namespace BlazorOcticons"));
        assert!(source.contains("public static class Octicons"));
        assert!(source.contains("from 4 icons"));
    }

    #[test]
    fn test_index_constants_follow_all_order() {
        let source = builder().build_index(&sample_manifest()).unwrap();

        assert!(source.contains(r#"public const string I0 = "Alert16";"#));
        assert!(source.contains(r#"public const string I1 = "Alert24";"#));
        assert!(source.contains(r#"public const string I2 = "AlertFill16";"#));
        assert!(source.contains(r#"public const string I3 = "MarkGithub20";"#));
        assert!(!source.contains("I4"));
    }

    #[test]
    fn test_index_by_size_includes_empty_buckets() {
        let source = builder().build_index(&sample_manifest()).unwrap();

        assert!(source.contains(r#"[16] = new string[] { "Alert16", "AlertFill16" },"#));
        assert!(source.contains(r#"[24] = new string[] { "Alert24" },"#));
        assert!(source.contains("[12] = new string[] {  },"));
        assert!(!source.contains("[20]"));
    }

    #[test]
    fn test_index_unescaped_identifiers() {
        let manifest = classify([(Identifier::new("A&B16"), 16)], &BTreeSet::from([16]));
        let source = builder().build_index(&manifest).unwrap();
        assert!(source.contains(r#""A&B16""#));
    }

    #[test]
    fn test_gallery_skips_empty_sizes() {
        let gallery = builder().build_gallery(&sample_manifest()).unwrap();

        assert!(gallery.contains("<h3>16px</h3>"));
        assert!(gallery.contains("<h3>24px</h3>"));
        assert!(!gallery.contains("<h3>12px</h3>"));
        assert!(!gallery.contains("MarkGithub20"));
    }

    #[test]
    fn test_gallery_buttons_invoke_callback() {
        let gallery = builder().build_gallery(&sample_manifest()).unwrap();

        assert!(gallery.contains(r#"OnSelect.InvokeAsync("AlertFill16")"#));
        assert!(gallery.contains(r#"<AlertFill16 Size="16" />"#));
        assert!(gallery.contains("public EventCallback<string> OnSelect { get; set; }"));
    }

    #[test]
    fn test_gallery_for_empty_manifest() {
        let manifest = classify(std::iter::empty(), &BTreeSet::from([16]));
        let gallery = builder().build_gallery(&manifest).unwrap();

        assert!(!gallery.contains("<h3>"));
        assert!(gallery.contains("icongen-gallery"));
    }
}
