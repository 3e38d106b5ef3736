//! Template dispatch and execution against resolved themes.
//!
//! Rendering is read-only: every method here takes `&self` on a
//! [`ResolvedTheme`] or [`ThemeSet`] and may run on any number of
//! request-handling threads. Output is rendered to a buffer first and only
//! written to the sink on success, so a failed render leaves the sink
//! untouched.

use std::io::Write;

use serde::Serialize;
use tracing::trace;

use super::view::{dispatch_name, NamedView};
use crate::error::RenderError;
use crate::theme::{ResolvedTheme, ThemeSet};

impl ResolvedTheme {
    /// Renders `data` with the template its named view selects.
    ///
    /// Dispatch picks the non-empty override name if the value carries
    /// one, otherwise the lower-cased type name.
    ///
    /// # Errors
    ///
    /// - [`RenderError::TemplateNotFound`] if the selected name is absent
    ///   from the composed set; nothing is written to the sink.
    /// - [`RenderError::Template`] if template execution fails; nothing is
    ///   written to the sink.
    /// - [`RenderError::Sink`] if the sink rejects the rendered bytes.
    pub fn render<T, W>(&self, data: &T, sink: &mut W) -> Result<(), RenderError>
    where
        T: NamedView + Serialize + ?Sized,
        W: Write + ?Sized,
    {
        let name = dispatch_name(data);
        self.render_named(&name, data, sink)
    }

    /// Renders a dynamic JSON value.
    ///
    /// This is the untyped counterpart of [`render`](Self::render) for
    /// data assembled at runtime (e.g. decoded request payloads). A JSON
    /// value declares no type, so the template name must come from a
    /// non-empty string under the literal key `Theme` on an object.
    ///
    /// # Errors
    ///
    /// [`RenderError::UnrenderableValue`] if the value is not an object or
    /// carries no usable `Theme` key; otherwise as
    /// [`render`](Self::render).
    pub fn render_value<W>(
        &self,
        value: &serde_json::Value,
        sink: &mut W,
    ) -> Result<(), RenderError>
    where
        W: Write + ?Sized,
    {
        let name = match value {
            serde_json::Value::Object(fields) => match fields.get("Theme") {
                Some(serde_json::Value::String(name)) if !name.is_empty() => name.clone(),
                _ => return Err(RenderError::UnrenderableValue),
            },
            _ => return Err(RenderError::UnrenderableValue),
        };
        self.render_named(&name, value, sink)
    }

    /// Renders an explicitly named template from the composed set.
    pub fn render_named<T, W>(&self, name: &str, data: &T, sink: &mut W) -> Result<(), RenderError>
    where
        T: Serialize + ?Sized,
        W: Write + ?Sized,
    {
        if !self.composed().contains(name) {
            return Err(RenderError::TemplateNotFound {
                name: name.to_string(),
            });
        }
        trace!(theme = self.name(), template = name, "dispatching template");

        let template = self
            .composed()
            .environment()
            .get_template(name)
            .map_err(|source| RenderError::Template {
                name: name.to_string(),
                source,
            })?;
        let output = template
            .render(data)
            .map_err(|source| RenderError::Template {
                name: name.to_string(),
                source,
            })?;

        sink.write_all(output.as_bytes())
            .map_err(|source| RenderError::Sink { source })?;
        Ok(())
    }
}

impl ThemeSet {
    /// Renders `data` with the named theme.
    ///
    /// The entry point the request layer calls once per response that
    /// needs themed output.
    ///
    /// # Errors
    ///
    /// [`RenderError::ThemeNotFound`] if `theme` is not in the set;
    /// otherwise as [`ResolvedTheme::render`].
    pub fn render<T, W>(&self, theme: &str, data: &T, sink: &mut W) -> Result<(), RenderError>
    where
        T: NamedView + Serialize + ?Sized,
        W: Write + ?Sized,
    {
        let theme = self.get(theme).ok_or_else(|| RenderError::ThemeNotFound {
            name: theme.to_string(),
        })?;
        theme.render(data, sink)
    }
}
