//! Render dispatch: choosing and executing a template for a data value.
//!
//! This module provides:
//!
//! - [`NamedView`]: the capability a render target implements to declare
//!   its template name (and optional per-value override)
//! - rendering methods on [`ResolvedTheme`] and [`ThemeSet`], including the
//!   dynamic JSON path for data assembled at runtime
//!
//! [`ResolvedTheme`]: crate::theme::ResolvedTheme
//! [`ThemeSet`]: crate::theme::ThemeSet

mod renderer;
mod view;

pub use view::NamedView;
