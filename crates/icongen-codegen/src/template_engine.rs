//! Template engine for code generation using Handlebars.
//!
//! Provides a wrapper around Handlebars with pre-registered templates for
//! component parameter blocks, the C# manifest and the gallery page.
//!
//! # Examples
//!
//! ```
//! use icongen_codegen::template_engine::TemplateEngine;
//! use serde_json::json;
//!
//! let engine = TemplateEngine::new().unwrap();
//! let context = json!({"markup": "<svg></svg>", "default_color": "#000", "size": 16});
//! let source = engine.render("component/parameters", &context).unwrap();
//! assert!(source.contains("public int Size { get; set; } = 16;"));
//! ```

use handlebars::Handlebars;
use icongen_core::{Error, Result};
use serde::Serialize;

/// Template appended to every component. Part of the render settings
/// fingerprint, so editing it invalidates persisted caches.
pub(crate) const COMPONENT_TEMPLATE: &str =
    include_str!("../templates/component/parameters.razor.hbs");

const MANIFEST_TEMPLATE: &str = include_str!("../templates/manifest/index.cs.hbs");
const GALLERY_TEMPLATE: &str = include_str!("../templates/manifest/gallery.razor.hbs");

/// Template engine for code generation.
///
/// Wraps Handlebars in strict mode with HTML escaping turned off: icon
/// markup is emitted verbatim and must not be entity-encoded.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`, allowing it to be used across
/// thread boundaries safely.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Creates a new template engine with registered templates.
    ///
    /// # Errors
    ///
    /// Returns error if template registration fails (should not happen
    /// with valid built-in templates).
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        Self::register_builtin_templates(&mut handlebars)?;

        Ok(Self { handlebars })
    }

    fn register_builtin_templates(handlebars: &mut Handlebars<'a>) -> Result<()> {
        for (name, source) in [
            ("component/parameters", COMPONENT_TEMPLATE),
            ("manifest/index", MANIFEST_TEMPLATE),
            ("manifest/gallery", GALLERY_TEMPLATE),
        ] {
            handlebars
                .register_template_string(name, source)
                .map_err(|e| Error::TemplateError {
                    message: format!("Failed to register {name} template: {e}"),
                })?;
        }

        Ok(())
    }

    /// Renders a template with the given context.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Template name is not registered
    /// - Context cannot be serialized
    /// - A variable referenced by the template is missing
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::TemplateError {
                message: format!("Template rendering failed: {e}"),
            })
    }

    /// Registers a custom template, replacing any template of the same name.
    ///
    /// # Errors
    ///
    /// Returns error if the template string is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use icongen_codegen::template_engine::TemplateEngine;
    ///
    /// let mut engine = TemplateEngine::new().unwrap();
    /// engine.register_template_string("custom", "// {{name}}").unwrap();
    /// ```
    pub fn register_template_string(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| Error::TemplateError {
                message: format!("Failed to register template '{name}': {e}"),
            })
    }
}

impl Default for TemplateEngine<'_> {
    fn default() -> Self {
        Self::new().expect("Failed to create default TemplateEngine")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_template_engine_creation() {
        assert!(TemplateEngine::new().is_ok());
    }

    #[test]
    fn test_component_template_keeps_markup_unescaped() {
        let engine = TemplateEngine::new().unwrap();
        let context = json!({
            "markup": r#"<svg width="@Size"><path fill="@Color" d="M0 0"/></svg>"#,
            "default_color": "#000",
            "size": 24,
        });

        let result = engine.render("component/parameters", &context).unwrap();

        assert!(result.starts_with(r#"<svg width="@Size"><path fill="@Color" d="M0 0"/></svg>"#));
        assert!(result.contains(r##"public string Color { get; set; } = "#000";"##));
        assert!(result.contains("public int Size { get; set; } = 24;"));
        assert!(!result.contains("&quot;"));
    }

    #[test]
    fn test_render_nonexistent_template() {
        let engine = TemplateEngine::new().unwrap();
        let err = engine.render("nonexistent", &json!({})).unwrap_err();
        assert!(err.is_template_error());
    }

    #[test]
    fn test_strict_mode_fails_on_missing_variable() {
        let engine = TemplateEngine::new().unwrap();
        let result = engine.render("component/parameters", &json!({"markup": "<svg/>"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_register_invalid_template_syntax() {
        let mut engine = TemplateEngine::new().unwrap();
        let err = engine
            .register_template_string("broken", "{{#each items}}")
            .unwrap_err();
        assert!(err.is_template_error());
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_custom_template_override() {
        let mut engine = TemplateEngine::new().unwrap();
        engine
            .register_template_string("component/parameters", "{{markup}}!")
            .unwrap();

        let result = engine
            .render("component/parameters", &json!({"markup": "<svg/>"}))
            .unwrap();
        assert_eq!(result, "<svg/>!");
    }

    #[test]
    fn test_template_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TemplateEngine<'_>>();
    }
}
