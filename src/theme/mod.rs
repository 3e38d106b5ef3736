//! Theme registration, inheritance, and composition.
//!
//! This module provides:
//!
//! - [`Theme`] / [`TemplateUnit`]: a named template collection and its units
//! - [`ThemeRegistry`]: the build-phase table with a freeze lifecycle
//! - [`ComposedSet`]: the inheritance-resolved template set for one theme
//! - [`ThemeSet`] / [`ResolvedTheme`]: the frozen, render-ready side
//! - [`load_theme_dir`]: the `*.tpl` directory scanner

mod loader;
mod overlay;
mod registry;
#[allow(clippy::module_inception)]
mod theme;

pub use loader::{load_theme_dir, TEMPLATE_SUFFIX};
pub use overlay::ComposedSet;
pub use registry::{ResolvedTheme, ThemeDescriptor, ThemeRegistry, ThemeSet};
pub use theme::{TemplateUnit, Theme};
