//! The named-view capability for render targets.

/// A value that knows which template should render it.
///
/// This is the typed dispatch contract: instead of inspecting values at
/// runtime, anything handed to [`ResolvedTheme::render`] declares its type
/// name and, optionally, a per-value override. A value with no derivable
/// template name simply cannot implement the trait, so the unrenderable
/// case does not exist on this path.
///
/// # Example
///
/// ```rust
/// use sakubun::NamedView;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Article {
///     title: String,
///     /// Per-article template override, if the author picked one.
///     template: Option<String>,
/// }
///
/// impl NamedView for Article {
///     fn type_name(&self) -> &str {
///         "Article"
///     }
///
///     fn override_name(&self) -> Option<&str> {
///         self.template.as_deref()
///     }
/// }
/// ```
///
/// [`ResolvedTheme::render`]: crate::theme::ResolvedTheme::render
pub trait NamedView {
    /// The declared type name. Lower-cased, it is the default template
    /// name for this value, binding type to template by convention.
    fn type_name(&self) -> &str;

    /// An explicit template override. A non-empty value wins over
    /// [`type_name`](Self::type_name) and is used verbatim.
    fn override_name(&self) -> Option<&str> {
        None
    }
}

/// Selects the template name for a view per the dispatch rules.
pub(crate) fn dispatch_name<T: NamedView + ?Sized>(view: &T) -> String {
    match view.override_name() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => view.type_name().to_lowercase(),
    }
}
