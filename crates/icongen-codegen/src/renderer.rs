//! Component rendering.
//!
//! Rewrites icon markup so its size and fill colour bind to component
//! parameters, then appends the parameter block.
//!
//! # Examples
//!
//! ```
//! use icongen_codegen::renderer::ComponentRenderer;
//! use icongen_codegen::resolver::resolve;
//! use icongen_core::IconAsset;
//!
//! let renderer = ComponentRenderer::new("#000").unwrap();
//! let icon = resolve(&IconAsset::new(
//!     "dot-16",
//!     r#"<svg width="16" height="16"><path d="M8 4"/></svg>"#,
//! ))
//! .unwrap();
//!
//! let component = renderer.render(&icon).unwrap();
//! assert!(component.source_text.starts_with(
//!     r#"<svg width="@Size" height="@Size"><path fill="@Color" d="M8 4"/></svg>"#
//! ));
//! ```

use std::sync::LazyLock;

use blake3::Hasher;
use icongen_core::{CanonicalIcon, GeneratedComponent, Result};
use regex::Regex;
use serde::Serialize;

use crate::template_engine::{COMPONENT_TEMPLATE, TemplateEngine};

// Unanchored: suffixed attributes such as `stroke-width` are bound too.
static WIDTH_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"width="[0-9]*""#).expect("valid width regex"));
static HEIGHT_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"height="[0-9]*""#).expect("valid height regex"));

#[derive(Serialize)]
struct ComponentContext<'a> {
    markup: &'a str,
    default_color: &'a str,
    size: u32,
}

/// Renders canonical icons into component source text.
#[derive(Debug)]
pub struct ComponentRenderer {
    engine: TemplateEngine<'static>,
    default_color: String,
}

impl ComponentRenderer {
    /// Creates a renderer whose `Color` parameter defaults to `default_color`.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in templates fail to register.
    pub fn new(default_color: impl Into<String>) -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
            default_color: default_color.into(),
        })
    }

    /// Returns the default colour baked into rendered components.
    #[must_use]
    pub fn default_color(&self) -> &str {
        &self.default_color
    }

    /// Renders one icon.
    ///
    /// Output is a pure function of the icon and the renderer settings.
    ///
    /// # Errors
    ///
    /// Returns [`icongen_core::Error::TemplateError`] if the parameter block
    /// fails to render.
    pub fn render(&self, icon: &CanonicalIcon) -> Result<GeneratedComponent> {
        let markup = bind_parameters(&icon.markup);
        let context = ComponentContext {
            markup: &markup,
            default_color: &self.default_color,
            size: icon.size_px,
        };
        let source_text = self.engine.render("component/parameters", &context)?;

        Ok(GeneratedComponent {
            identifier: icon.identifier.clone(),
            size_px: icon.size_px,
            source_text,
        })
    }

    /// Fingerprint of everything besides the asset that affects output.
    ///
    /// Persisted caches record it and are discarded when it changes.
    #[must_use]
    pub fn settings_fingerprint(&self) -> String {
        let mut hasher = Hasher::new();
        for part in [
            env!("CARGO_PKG_VERSION"),
            self.default_color.as_str(),
            COMPONENT_TEMPLATE,
        ] {
            hasher.update(&(part.len() as u64).to_le_bytes());
            hasher.update(part.as_bytes());
        }
        hasher.finalize().to_hex().to_string()
    }
}

/// Rewrites size attributes and path fills to reference `@Size`/`@Color`.
///
/// # Examples
///
/// ```
/// use icongen_codegen::renderer::bind_parameters;
///
/// assert_eq!(
///     bind_parameters(r#"<svg width="24"><path fill="red" d="M0"/></svg>"#),
///     r#"<svg width="@Size"><path fill="@Color" fill="red" d="M0"/></svg>"#,
/// );
/// ```
#[must_use]
pub fn bind_parameters(markup: &str) -> String {
    let sized = WIDTH_ATTR.replace_all(markup, r#"width="@Size""#);
    let sized = HEIGHT_ATTR.replace_all(&sized, r#"height="@Size""#);

    sized
        .replace("path fill", r#"path fill="@Color" fill"#)
        .replace("path d", r#"path fill="@Color" d"#)
}
