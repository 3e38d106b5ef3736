//! # Sakubun - Theme Resolution & Rendering
//!
//! `sakubun` provides the theming core of a multi-site content system:
//! per-theme template loading, inheritance-chain overlay, and runtime
//! template dispatch for structured data.
//!
//! ## Core Concepts
//!
//! - [`Theme`]: a named collection of templates plus an optional base theme
//!   it inherits from
//! - [`ThemeRegistry`]: the build-phase table of themes; [`freeze`] resolves
//!   every inheritance chain and returns an immutable [`ThemeSet`]
//! - [`ComposedSet`]: the flattened template set for one theme, nearest
//!   definition winning for every name
//! - [`NamedView`]: the capability a render target implements to declare
//!   which template renders it
//! - [`Page`]: the structured page model fed through the dispatcher
//!
//! ## Quick Start
//!
//! ```rust
//! use sakubun::{Header, Page, Theme, ThemeRegistry};
//!
//! let mut registry = ThemeRegistry::new();
//! registry.register(
//!     Theme::new("base")
//!         .add_template("page", "<title>{{ header.title }}</title>")
//!         .unwrap(),
//! );
//! registry.register(Theme::new("summer").with_base("base"));
//! let themes = registry.freeze().unwrap();
//!
//! let page = Page {
//!     language: "en".into(),
//!     header: Header {
//!         title: "Welcome".into(),
//!         resources: vec![],
//!     },
//!     theme: None,
//! };
//!
//! // "summer" owns no templates; the composed set falls through to "base".
//! let mut body = Vec::new();
//! themes.render("summer", &page, &mut body).unwrap();
//! assert_eq!(body, b"<title>Welcome</title>");
//! ```
//!
//! ## Lifecycle
//!
//! Themes are registered during startup and resolved exactly once, when the
//! registry is frozen. The frozen [`ThemeSet`] is `Send + Sync` and renders
//! without locking from any number of request handlers. To pick up changed
//! theme directories, build a fresh registry and freeze it again.
//!
//! [`freeze`]: ThemeRegistry::freeze

pub mod error;
pub mod page;
pub mod render;
pub mod theme;

pub use error::{RegistryError, RenderError};
pub use page::{Header, Page, Resource, ResourceKind};
pub use render::NamedView;
pub use theme::{
    load_theme_dir, ComposedSet, ResolvedTheme, TemplateUnit, Theme, ThemeDescriptor,
    ThemeRegistry, ThemeSet, TEMPLATE_SUFFIX,
};
