//! Inheritance-chain overlay composition.
//!
//! A theme's effective template set is built by walking its base chain as an
//! explicit ordered list of layers: the theme itself first, then its base,
//! then the base's base, and so on. Layers are merged front-to-back with
//! first-writer-wins, so a theme's own template always beats every
//! ancestor's and nearer ancestors beat farther ones. The walk stops
//! silently at a blank or unregistered base name; a name seen twice is a
//! configuration error, reported with the full chain as walked.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use minijinja::{AutoEscape, Environment};
use tracing::debug;

use super::registry::ThemeRegistry;
use super::theme::{TemplateUnit, Theme};
use crate::error::RegistryError;

/// The flattened, inheritance-resolved template set for one theme.
///
/// Holds the winning [`TemplateUnit`] per name and a compiled environment
/// containing all of them, so templates in the set can `{% include %}` and
/// `{% extends %}` each other regardless of which layer each came from.
/// Output auto-escapes as HTML.
///
/// A composed set is immutable and safe to share across request-handling
/// threads.
#[derive(Debug)]
pub struct ComposedSet {
    units: HashMap<String, Arc<TemplateUnit>>,
    env: Environment<'static>,
}

impl ComposedSet {
    /// Resolves `theme` against `registry`, producing its composed set.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::BaseCycle`] if the base chain revisits a
    /// theme name.
    pub(crate) fn compose(
        theme: &Theme,
        registry: &ThemeRegistry,
    ) -> Result<Self, RegistryError> {
        let mut layers: Vec<&Theme> = vec![theme];
        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(theme.name());
        // The chain as walked, kept for cycle reporting.
        let mut walked = vec![theme.name().to_string()];

        let mut next = theme.base();
        while let Some(base_name) = next {
            let Some(base) = registry.get(base_name) else {
                // Not an error: the chain just ends here.
                debug!(
                    theme = theme.name(),
                    base = base_name,
                    "base theme not registered, chain terminates"
                );
                break;
            };
            walked.push(base.name().to_string());
            if !visited.insert(base.name()) {
                return Err(RegistryError::BaseCycle { path: walked });
            }
            layers.push(base);
            next = base.base();
        }

        // Front layer wins: a name already claimed is never replaced by a
        // layer farther down the chain.
        let mut units: HashMap<String, Arc<TemplateUnit>> = HashMap::new();
        for layer in &layers {
            for (name, unit) in layer.templates() {
                units
                    .entry(name.clone())
                    .or_insert_with(|| Arc::clone(unit));
            }
        }

        let mut env = Environment::new();
        env.set_auto_escape_callback(|_name| AutoEscape::Html);
        for unit in units.values() {
            env.add_template_owned(unit.name().to_string(), unit.source().to_string())
                .map_err(|source| RegistryError::TemplateSyntax {
                    path: unit
                        .path()
                        .map(|p| p.to_path_buf())
                        .unwrap_or_else(|| unit.name().into()),
                    source,
                })?;
        }

        debug!(
            theme = theme.name(),
            layers = layers.len(),
            templates = units.len(),
            "composed theme"
        );
        Ok(Self { units, env })
    }

    /// Looks up the winning unit for a folded template name.
    pub fn get(&self, name: &str) -> Option<&Arc<TemplateUnit>> {
        self.units.get(name)
    }

    /// Whether the set defines `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.units.contains_key(name)
    }

    /// Iterates over the template names in the set.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.units.keys().map(|s| s.as_str())
    }

    /// The number of templates in the set.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub(crate) fn environment(&self) -> &Environment<'static> {
        &self.env
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme(name: &str, base: Option<&str>, templates: &[(&str, &str)]) -> Theme {
        let mut th = Theme::new(name);
        if let Some(base) = base {
            th = th.with_base(base);
        }
        for (tname, source) in templates {
            th = th.add_template(tname, source).unwrap();
        }
        th
    }

    fn registry(themes: Vec<Theme>) -> ThemeRegistry {
        let mut reg = ThemeRegistry::new();
        for th in themes {
            reg.register(th);
        }
        reg
    }

    #[test]
    fn test_compose_own_templates_only() {
        let reg = registry(vec![theme("plain", None, &[("page", "<p>p</p>")])]);
        let composed = ComposedSet::compose(reg.get("plain").unwrap(), &reg).unwrap();

        assert_eq!(composed.len(), 1);
        assert!(composed.contains("page"));
    }

    #[test]
    fn test_compose_child_overrides_base() {
        // base owns {header, footer}; child owns {header}. The composed
        // child must keep its own header and inherit base's footer.
        let reg = registry(vec![
            theme(
                "base",
                None,
                &[("header", "base header"), ("footer", "base footer")],
            ),
            theme("child", Some("base"), &[("header", "child header")]),
        ]);

        let composed = ComposedSet::compose(reg.get("child").unwrap(), &reg).unwrap();
        assert_eq!(composed.len(), 2);
        assert_eq!(composed.get("header").unwrap().source(), "child header");
        assert_eq!(composed.get("footer").unwrap().source(), "base footer");
    }

    #[test]
    fn test_compose_nearest_ancestor_wins() {
        let reg = registry(vec![
            theme("far", None, &[("a", "far a"), ("b", "far b"), ("c", "far c")]),
            theme("near", Some("far"), &[("b", "near b")]),
            theme("leaf", Some("near"), &[("a", "leaf a")]),
        ]);

        let composed = ComposedSet::compose(reg.get("leaf").unwrap(), &reg).unwrap();
        assert_eq!(composed.len(), 3);
        assert_eq!(composed.get("a").unwrap().source(), "leaf a");
        assert_eq!(composed.get("b").unwrap().source(), "near b");
        assert_eq!(composed.get("c").unwrap().source(), "far c");
    }

    #[test]
    fn test_compose_union_of_chain_names() {
        let reg = registry(vec![
            theme("base", None, &[("footer", "f"), ("nav", "n")]),
            theme("child", Some("base"), &[("page", "p")]),
        ]);

        let composed = ComposedSet::compose(reg.get("child").unwrap(), &reg).unwrap();
        let mut names: Vec<&str> = composed.names().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["footer", "nav", "page"]);
    }

    #[test]
    fn test_compose_unregistered_base_terminates_silently() {
        let reg = registry(vec![theme(
            "orphan",
            Some("no-such-theme"),
            &[("page", "<p></p>")],
        )]);

        let composed = ComposedSet::compose(reg.get("orphan").unwrap(), &reg).unwrap();
        assert_eq!(composed.len(), 1);
    }

    #[test]
    fn test_compose_two_theme_cycle_errors() {
        let reg = registry(vec![
            theme("a", Some("b"), &[("x", "a x")]),
            theme("b", Some("a"), &[("y", "b y")]),
        ]);

        let result = ComposedSet::compose(reg.get("a").unwrap(), &reg);
        match result {
            Err(RegistryError::BaseCycle { path }) => {
                assert_eq!(path, vec!["a", "b", "a"]);
            }
            other => panic!("expected cycle error, got {:?}", other),
        }
    }

    #[test]
    fn test_compose_self_cycle_errors() {
        let reg = registry(vec![theme("selfish", Some("selfish"), &[])]);

        let result = ComposedSet::compose(reg.get("selfish").unwrap(), &reg);
        match result {
            Err(RegistryError::BaseCycle { path }) => {
                assert_eq!(path, vec!["selfish", "selfish"]);
            }
            other => panic!("expected cycle error, got {:?}", other),
        }
    }

    #[test]
    fn test_composed_units_are_shared_not_copied() {
        let reg = registry(vec![theme("plain", None, &[("page", "<p></p>")])]);
        let plain = reg.get("plain").unwrap();
        let composed = ComposedSet::compose(plain, &reg).unwrap();

        assert!(Arc::ptr_eq(
            composed.get("page").unwrap(),
            plain.template("page").unwrap()
        ));
    }
}
