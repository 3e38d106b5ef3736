//! Error types for theme registration and rendering.
//!
//! Errors are split along the propagation boundary described in the crate
//! docs: [`RegistryError`] covers everything that can go wrong while themes
//! are being loaded, registered, and composed at startup, and is expected to
//! halt serving for the affected theme. [`RenderError`] covers per-request
//! failures and is returned to the calling request handler, which decides
//! what to show instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error raised while loading, registering, or composing themes.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The theme directory is missing or could not be listed.
    #[error("cannot read theme directory {}", .dir.display())]
    ThemeDir {
        /// The directory that failed to list.
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A template file failed to read from disk.
    #[error("cannot read template {}", .path.display())]
    TemplateRead {
        /// The file that failed to read.
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A template file is not syntactically valid.
    ///
    /// Registration of the owning theme aborts; there is no partial
    /// registration.
    #[error("template {} failed to parse", .path.display())]
    TemplateSyntax {
        /// The offending file.
        path: PathBuf,
        #[source]
        source: minijinja::Error,
    },

    /// Two files in the same theme directory fold to the same template name.
    #[error(
        "duplicate template \"{name}\":\n  - {}\n  - {}",
        .first.display(),
        .second.display()
    )]
    DuplicateTemplate {
        /// The folded template name both files claim.
        name: String,
        /// Path registered first.
        first: PathBuf,
        /// Path that collided with it.
        second: PathBuf,
    },

    /// The base-theme chain revisits a theme it already passed through.
    #[error("base theme chain cycles: {}", .path.join(" -> "))]
    BaseCycle {
        /// The chain as walked, ending with the repeated name.
        path: Vec<String>,
    },
}

/// Error raised while dispatching or executing a template for a data value.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The requested theme is not part of the frozen set.
    #[error("theme not found: \"{name}\"")]
    ThemeNotFound {
        /// The theme name the request asked for.
        name: String,
    },

    /// The selected template name is absent from the theme's composed set.
    ///
    /// Recoverable: the caller may fall back to a generic page. Nothing has
    /// been written to the sink.
    #[error("template not found: \"{name}\"")]
    TemplateNotFound {
        /// The name that was requested or derived.
        name: String,
    },

    /// The data value exposes no template name to dispatch on.
    ///
    /// Only reachable through the dynamic [`render_value`] path: the value
    /// is not an object, or carries no non-empty `Theme` key.
    ///
    /// [`render_value`]: crate::theme::ResolvedTheme::render_value
    #[error("value has no renderable view: expected an object with a non-empty \"Theme\" key")]
    UnrenderableValue,

    /// Template execution failed. Nothing has been written to the sink.
    #[error("template \"{name}\" failed to render")]
    Template {
        /// The template that was executing.
        name: String,
        #[source]
        source: minijinja::Error,
    },

    /// The output sink rejected the rendered bytes.
    #[error("failed to write rendered output")]
    Sink {
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_cycle_display_names_the_chain() {
        let err = RegistryError::BaseCycle {
            path: vec!["a".to_string(), "b".to_string(), "a".to_string()],
        };
        assert_eq!(err.to_string(), "base theme chain cycles: a -> b -> a");
    }

    #[test]
    fn test_duplicate_template_display_lists_both_paths() {
        let err = RegistryError::DuplicateTemplate {
            name: "page".to_string(),
            first: PathBuf::from("/themes/plain/Page.tpl"),
            second: PathBuf::from("/themes/plain/page.tpl"),
        };
        let msg = err.to_string();
        assert!(msg.contains("\"page\""));
        assert!(msg.contains("/themes/plain/Page.tpl"));
        assert!(msg.contains("/themes/plain/page.tpl"));
    }

    #[test]
    fn test_template_not_found_display() {
        let err = RenderError::TemplateNotFound {
            name: "missing".to_string(),
        };
        assert!(err.to_string().contains("missing"));
    }
}
