//! Page data model for themed HTML output.
//!
//! These are the structured values a request handler assembles and hands to
//! the render dispatcher. They carry no behavior beyond MIME defaulting;
//! how they turn into markup is entirely the theme's business.

use serde::{Deserialize, Serialize};

use crate::render::NamedView;

/// What kind of external resource a page imports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Styling information, imported with a `rel="stylesheet"` link.
    Style,
    /// Program code for the client browsing context, imported with a
    /// script element.
    Script,
}

impl ResourceKind {
    /// The default MIME type for resources of this kind.
    pub fn default_mime_type(self) -> &'static str {
        match self {
            ResourceKind::Style => "text/css",
            ResourceKind::Script => "application/javascript",
        }
    }
}

/// An external resource to be imported into a [`Page`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// What kind of import this is.
    pub kind: ResourceKind,
    /// Explicit MIME type. Leave `None` for the kind's default; set it to
    /// point clients at an alternate styling or scripting language.
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Public URL of the resource, ideally domain-relative.
    pub url: String,
}

impl Resource {
    /// A stylesheet import.
    pub fn style(url: impl Into<String>) -> Self {
        Self {
            kind: ResourceKind::Style,
            mime_type: None,
            url: url.into(),
        }
    }

    /// A script import.
    pub fn script(url: impl Into<String>) -> Self {
        Self {
            kind: ResourceKind::Script,
            mime_type: None,
            url: url.into(),
        }
    }

    /// Overrides the MIME type, returning the resource for chaining.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// The MIME type to serve: the explicit one if set, the kind's
    /// default otherwise.
    pub fn mime_type(&self) -> &str {
        self.mime_type
            .as_deref()
            .unwrap_or_else(|| self.kind.default_mime_type())
    }
}

/// The head section of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// The page title.
    pub title: String,
    /// Resources the page imports.
    #[serde(default)]
    pub resources: Vec<Resource>,
}

/// A full page ready for themed rendering.
///
/// Dispatches to template `page` by default; set [`theme`](Self::theme) to
/// route an individual page to a different template in the same composed
/// set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// BCP 47 language tag for the document.
    pub language: String,
    /// The page head.
    pub header: Header,
    /// Per-page template override.
    #[serde(default)]
    pub theme: Option<String>,
}

impl NamedView for Page {
    fn type_name(&self) -> &str {
        "Page"
    }

    fn override_name(&self) -> Option<&str> {
        self.theme.as_deref()
    }
}
