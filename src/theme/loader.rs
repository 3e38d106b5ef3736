//! Template source loading from theme directories.
//!
//! A theme directory is flat: every file directly inside it that ends in
//! [`TEMPLATE_SUFFIX`] is parsed into one [`TemplateUnit`], named by its
//! lower-cased file stem (`Page.tpl` becomes template `page`).
//! Subdirectories and files with other extensions are ignored.
//!
//! Loading is all-or-nothing per theme: an unreadable directory, an
//! unreadable file, a file that fails to parse, or two files folding to the
//! same name each abort the scan with no partial result, so a theme never
//! registers with half its templates.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use super::theme::TemplateUnit;
use crate::error::RegistryError;

/// The file suffix template definitions are recognized by.
pub const TEMPLATE_SUFFIX: &str = ".tpl";

/// Scans a theme directory and parses its template files.
///
/// Returns the units keyed by folded name. The scan is non-recursive.
///
/// # Errors
///
/// - [`RegistryError::ThemeDir`] if the directory cannot be listed.
/// - [`RegistryError::TemplateRead`] if a matched file cannot be read.
/// - [`RegistryError::TemplateSyntax`] if a matched file does not parse.
/// - [`RegistryError::DuplicateTemplate`] if two files fold to one name.
pub fn load_theme_dir(dir: &Path) -> Result<HashMap<String, Arc<TemplateUnit>>, RegistryError> {
    let entries = fs::read_dir(dir).map_err(|source| RegistryError::ThemeDir {
        dir: dir.to_path_buf(),
        source,
    })?;

    let mut matched = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| RegistryError::ThemeDir {
            dir: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(name) = template_name(&path) {
            matched.push((name, path));
        }
    }
    // Directory iteration order is platform-defined; sort so duplicate
    // reports are stable.
    matched.sort();

    let mut units: HashMap<String, Arc<TemplateUnit>> = HashMap::new();
    for (name, path) in matched {
        if let Some(existing) = units.get(&name) {
            let first = existing
                .path()
                .expect("directory units carry their path")
                .to_path_buf();
            return Err(RegistryError::DuplicateTemplate {
                name,
                first,
                second: path,
            });
        }

        let source = fs::read_to_string(&path).map_err(|source| RegistryError::TemplateRead {
            path: path.clone(),
            source,
        })?;
        let unit = TemplateUnit::parse(&name, source, Some(path))?;
        units.insert(name, unit);
    }

    debug!(
        dir = %dir.display(),
        templates = units.len(),
        "loaded theme directory"
    );
    Ok(units)
}

/// Derives the folded template name for a file path, or `None` if the path
/// does not carry the template suffix.
fn template_name(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_string_lossy();
    let stem = file_name.strip_suffix(TEMPLATE_SUFFIX)?;
    if stem.is_empty() {
        return None;
    }
    Some(stem.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, content: &str) {
        let mut f = fs::File::create(dir.join(name)).unwrap();
        f.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn test_template_name_folds_stem() {
        assert_eq!(
            template_name(Path::new("/themes/plain/Page.tpl")),
            Some("page".to_string())
        );
        assert_eq!(template_name(Path::new("/themes/plain/notes.txt")), None);
        assert_eq!(template_name(Path::new("/themes/plain/.tpl")), None);
    }

    #[test]
    fn test_load_theme_dir_parses_tpl_files() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "Page.tpl", "<html>{{ title }}</html>");
        write_file(dir.path(), "footer.tpl", "<footer></footer>");
        write_file(dir.path(), "readme.txt", "not a template");

        let units = load_theme_dir(dir.path()).unwrap();
        assert_eq!(units.len(), 2);
        assert!(units.contains_key("page"));
        assert!(units.contains_key("footer"));
        assert_eq!(
            units["page"].path().unwrap(),
            dir.path().join("Page.tpl")
        );
    }

    #[test]
    fn test_load_theme_dir_is_not_recursive() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "page.tpl", "<html></html>");
        fs::create_dir(dir.path().join("partials")).unwrap();
        write_file(&dir.path().join("partials"), "nested.tpl", "<p></p>");

        let units = load_theme_dir(dir.path()).unwrap();
        assert_eq!(units.len(), 1);
        assert!(!units.contains_key("nested"));
    }

    #[test]
    fn test_load_theme_dir_missing_dir_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-theme");

        let result = load_theme_dir(&missing);
        assert!(matches!(result, Err(RegistryError::ThemeDir { .. })));
    }

    #[test]
    fn test_load_theme_dir_syntax_error_aborts_whole_theme() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "good.tpl", "<p>fine</p>");
        write_file(dir.path(), "bad.tpl", "{% if %}");

        let result = load_theme_dir(dir.path());
        match result {
            Err(RegistryError::TemplateSyntax { path, .. }) => {
                assert_eq!(path, dir.path().join("bad.tpl"));
            }
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_theme_dir_duplicate_folded_names_error() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "Page.tpl", "<p>upper</p>");
        write_file(dir.path(), "page.tpl", "<p>lower</p>");

        let result = load_theme_dir(dir.path());
        match result {
            Err(RegistryError::DuplicateTemplate { name, .. }) => {
                assert_eq!(name, "page");
            }
            other => panic!("expected duplicate error, got {:?}", other),
        }
    }
}
