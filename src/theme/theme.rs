//! Theme and template-unit types.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::RegistryError;

/// A single named, syntax-checked template body.
///
/// Units are immutable once parsed. Identity is the **lower-cased** name:
/// the constructor folds whatever name it is given, so lookup and dispatch
/// never have to worry about casing. A unit is owned by the theme that
/// parsed it and shared, read-only, with every composed set that ends up
/// referencing it.
#[derive(Debug)]
pub struct TemplateUnit {
    name: String,
    source: String,
    path: Option<PathBuf>,
}

impl TemplateUnit {
    /// Parses a unit from template source, validating syntax up front.
    ///
    /// The name is folded to lower case. `path` is the origin file, if the
    /// unit came from disk; it is carried for error reporting only.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TemplateSyntax`] if the source does not
    /// parse as a template.
    pub fn parse(
        name: &str,
        source: impl Into<String>,
        path: Option<PathBuf>,
    ) -> Result<Arc<Self>, RegistryError> {
        let name = name.to_lowercase();
        let source = source.into();

        // Compile into a scratch environment so syntax errors surface at
        // registration time, not on the first request that hits the unit.
        let mut scratch = minijinja::Environment::new();
        scratch
            .add_template_owned(name.clone(), source.clone())
            .map_err(|source| RegistryError::TemplateSyntax {
                path: path.clone().unwrap_or_else(|| PathBuf::from(&name)),
                source,
            })?;

        Ok(Arc::new(Self { name, source, path }))
    }

    /// The folded template name this unit is addressed by.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw template source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The file this unit was parsed from, if it came from disk.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// A named collection of templates with an optional base theme.
///
/// A theme in this state is *unscanned*: it knows its own templates and the
/// name of its base, but inheritance has not been resolved. Resolution
/// happens when the owning [`ThemeRegistry`] is frozen, which turns every
/// `Theme` into a [`ResolvedTheme`] with a valid composed set.
///
/// The base is a name reference, not ownership; a theme does not own its
/// base and the base need not exist yet when the theme is built.
///
/// # Example
///
/// ```rust
/// use sakubun::Theme;
///
/// let theme = Theme::new("plain")
///     .add_template("page", "<html><body>{{ title }}</body></html>")
///     .unwrap()
///     .add_template("footer", "<footer>{{ year }}</footer>")
///     .unwrap();
///
/// assert_eq!(theme.name(), "plain");
/// assert!(theme.template("page").is_some());
/// ```
///
/// [`ThemeRegistry`]: crate::theme::ThemeRegistry
/// [`ResolvedTheme`]: crate::theme::ResolvedTheme
#[derive(Debug)]
pub struct Theme {
    name: String,
    base: Option<String>,
    dir: Option<PathBuf>,
    templates: HashMap<String, Arc<TemplateUnit>>,
}

impl Theme {
    /// Creates an empty in-memory theme with no base.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: None,
            dir: None,
            templates: HashMap::new(),
        }
    }

    /// Loads a theme from a directory of `*.tpl` files.
    ///
    /// The scan is non-recursive; see [`load_theme_dir`] for the exact
    /// contract.
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be listed or any template file fails
    /// to read or parse. A failure aborts the whole theme; there is no
    /// partial result.
    ///
    /// [`load_theme_dir`]: crate::theme::load_theme_dir
    pub fn from_dir(name: impl Into<String>, dir: impl Into<PathBuf>) -> Result<Self, RegistryError> {
        let dir = dir.into();
        let templates = super::loader::load_theme_dir(&dir)?;
        Ok(Self {
            name: name.into(),
            base: None,
            dir: Some(dir),
            templates,
        })
    }

    /// Sets the base theme name, returning the theme for chaining.
    ///
    /// A blank name means "no base" and is normalized away.
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        let base = base.into();
        self.base = if base.is_empty() { None } else { Some(base) };
        self
    }

    /// Adds an in-memory template, returning the theme for chaining.
    ///
    /// The source is syntax-checked immediately. An existing template with
    /// the same folded name is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TemplateSyntax`] if the source is invalid.
    pub fn add_template(mut self, name: &str, source: &str) -> Result<Self, RegistryError> {
        let unit = TemplateUnit::parse(name, source, None)?;
        self.templates.insert(unit.name().to_string(), unit);
        Ok(self)
    }

    /// The theme's registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The base theme's name, if any.
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    /// The directory this theme was loaded from, if it came from disk.
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// The templates directly owned by this theme, not including any base's.
    pub fn templates(&self) -> &HashMap<String, Arc<TemplateUnit>> {
        &self.templates
    }

    /// Looks up a directly-owned template by folded name.
    pub fn template(&self, name: &str) -> Option<&Arc<TemplateUnit>> {
        self.templates.get(name)
    }
}
