//! Theme registration and the build → freeze lifecycle.
//!
//! There is no process-global registry. A [`ThemeRegistry`] is an ordinary
//! value: the startup sequence builds one, registers every theme into it,
//! and calls [`freeze`], which resolves every inheritance chain and returns
//! an immutable [`ThemeSet`] to hand to the request-handling layer. All
//! mutation happens before `freeze` returns, so renders never race a
//! registration.
//!
//! Because resolution is deferred to `freeze`, themes and their bases may be
//! registered in any order, and re-registering a name (last-registration-
//! wins) can never leave another theme's composed set stale.
//!
//! [`freeze`]: ThemeRegistry::freeze

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::overlay::ComposedSet;
use super::theme::Theme;
use crate::error::RegistryError;

/// Registration wiring for one theme, as it appears in site configuration.
///
/// The Rust rendition of the `{Name, BaseTheme, Dir}` triple the serving
/// layer supplies once per theme directory at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeDescriptor {
    /// The name the theme registers under.
    pub name: String,
    /// Base theme name; `None` or empty means the theme stands alone.
    #[serde(default)]
    pub base: Option<String>,
    /// Directory scanned for `*.tpl` files.
    pub dir: PathBuf,
}

/// The mutable, build-phase table of themes.
///
/// Populated during startup, then consumed by [`freeze`](Self::freeze).
/// Not meant for concurrent use; the frozen [`ThemeSet`] is.
///
/// # Example
///
/// ```rust
/// use sakubun::{Theme, ThemeRegistry};
///
/// let mut registry = ThemeRegistry::new();
/// registry.register(
///     Theme::new("base")
///         .add_template("footer", "<footer>{{ year }}</footer>")
///         .unwrap(),
/// );
/// registry.register(
///     Theme::new("summer")
///         .with_base("base")
///         .add_template("page", "<html>{% include 'footer' %}</html>")
///         .unwrap(),
/// );
///
/// let themes = registry.freeze().unwrap();
/// assert!(themes.get("summer").unwrap().composed().contains("footer"));
/// ```
#[derive(Debug, Default)]
pub struct ThemeRegistry {
    themes: HashMap<String, Theme>,
}

impl ThemeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a theme under its name.
    ///
    /// Names are unique; registering an existing name replaces the earlier
    /// theme and returns it.
    pub fn register(&mut self, theme: Theme) -> Option<Theme> {
        debug!(
            theme = theme.name(),
            base = theme.base().unwrap_or(""),
            templates = theme.templates().len(),
            "registering theme"
        );
        self.themes.insert(theme.name().to_string(), theme)
    }

    /// Loads a theme from its descriptor and registers it.
    ///
    /// # Errors
    ///
    /// Fails if the descriptor's directory cannot be loaded; the registry
    /// is left unchanged and other themes may still register.
    pub fn register_dir(&mut self, descriptor: &ThemeDescriptor) -> Result<(), RegistryError> {
        let theme = Theme::from_dir(&descriptor.name, &descriptor.dir)?
            .with_base(descriptor.base.clone().unwrap_or_default());
        self.register(theme);
        Ok(())
    }

    /// Looks up a registered theme by name.
    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    /// Iterates over the registered theme names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(|s| s.as_str())
    }

    /// The number of registered themes.
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Resolves every theme's inheritance chain and freezes the result.
    ///
    /// Consumes the registry so no further registration can race a render.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::BaseCycle`] if any theme's base chain
    /// cycles. Serving must not start with a theme that failed to resolve,
    /// so the first failure aborts the freeze.
    pub fn freeze(self) -> Result<ThemeSet, RegistryError> {
        let mut resolved = HashMap::with_capacity(self.themes.len());
        for theme in self.themes.values() {
            let composed = ComposedSet::compose(theme, &self)?;
            resolved.insert(theme.name().to_string(), composed);
        }

        let themes = resolved
            .into_iter()
            .map(|(name, composed)| {
                let theme = ResolvedTheme {
                    name: name.clone(),
                    composed,
                };
                (name, theme)
            })
            .collect();
        Ok(ThemeSet { themes })
    }
}

/// A theme whose inheritance chain has been resolved.
///
/// The scanned counterpart of [`Theme`]: holding one is proof that its
/// composed set is valid. Rendering methods live in
/// [`crate::render`].
#[derive(Debug)]
pub struct ResolvedTheme {
    name: String,
    composed: ComposedSet,
}

impl ResolvedTheme {
    /// The theme's registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The flattened template set for this theme.
    pub fn composed(&self) -> &ComposedSet {
        &self.composed
    }
}

/// The frozen, render-ready table of resolved themes.
///
/// Immutable and `Send + Sync`; request handlers may render against it from
/// any number of threads. A forced re-scan means building a fresh registry
/// and freezing again.
#[derive(Debug, Default)]
pub struct ThemeSet {
    themes: HashMap<String, ResolvedTheme>,
}

impl ThemeSet {
    /// Looks up a resolved theme by name.
    pub fn get(&self, name: &str) -> Option<&ResolvedTheme> {
        self.themes.get(name)
    }

    /// Iterates over the resolved theme names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(|s| s.as_str())
    }

    /// The number of resolved themes.
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}
