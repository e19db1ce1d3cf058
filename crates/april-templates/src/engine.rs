//! Built-in minijinja template engine.

use std::path::{Path, PathBuf};

use minijinja::{AutoEscape, Environment, ErrorKind};

use crate::{SECTION, SIDE_BY_SIDE, SKELETON, TABLE, TemplateEngine, TemplateError, TemplateParams};

/// Templates shipped with the crate, keyed by name.
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (SKELETON, include_str!("../templates/skeleton.html")),
    (SECTION, include_str!("../templates/section.html")),
    (SIDE_BY_SIDE, include_str!("../templates/side_by_side.html")),
    (TABLE, include_str!("../templates/table.html")),
];

/// Template engine backed by a minijinja [`Environment`].
///
/// Auto-escaping is off for every template: node output is markup and is
/// inserted verbatim.
///
/// # Example
///
/// ```
/// use april_templates::{TemplateEngine, TemplateParams, Templates};
///
/// let templates = Templates::new().unwrap();
/// let params = TemplateParams::new()
///     .with("left", "<p>a</p>")
///     .with("right", "<p>b</p>");
/// let html = templates.render("side_by_side.html", &params).unwrap();
/// assert!(html.contains("<p>a</p>"));
/// ```
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Create an engine holding only the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Render`] if a built-in template fails to
    /// compile.
    pub fn new() -> Result<Self, TemplateError> {
        Self::from_sources(BUILTIN_TEMPLATES)
    }

    fn from_sources(sources: &[(&'static str, &'static str)]) -> Result<Self, TemplateError> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        for &(name, source) in sources {
            env.add_template(name, source)
                .map_err(|source| TemplateError::Render {
                    name: name.to_owned(),
                    source,
                })?;
        }
        Ok(Self { env })
    }

    /// Create an engine whose built-ins are overridden by `*.html` files in `dir`.
    ///
    /// Files are registered under their file name, so `dir/section.html`
    /// replaces the built-in `section.html`. Other files become additional
    /// templates that overrides may include or extend.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Io`] if the directory or one of its entries
    /// cannot be read, and [`TemplateError::Render`] if a template fails to
    /// compile.
    pub fn with_dir(dir: &Path) -> Result<Self, TemplateError> {
        let mut templates = Self::new()?;
        let entries = std::fs::read_dir(dir).map_err(|source| TemplateError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let paths = template_files(entries.map(|entry| entry.map(|e| e.path())), dir)?;

        for path in paths {
            let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                continue;
            };
            let source = std::fs::read_to_string(&path).map_err(|source| TemplateError::Io {
                path: path.clone(),
                source,
            })?;
            templates
                .env
                .add_template_owned(name.clone(), source)
                .map_err(|source| TemplateError::Render {
                    name: name.clone(),
                    source,
                })?;
            tracing::debug!(template = %name, path = %path.display(), "Loaded template override");
        }

        Ok(templates)
    }

    /// Whether a template with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }
}

/// The `*.html` files among a directory listing, sorted. A listing entry
/// that failed to read fails the whole load.
fn template_files(
    entries: impl IntoIterator<Item = std::io::Result<PathBuf>>,
    dir: &Path,
) -> Result<Vec<PathBuf>, TemplateError> {
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|source| TemplateError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        if path.is_file() && path.extension().is_some_and(|ext| ext == "html") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

impl TemplateEngine for Templates {
    fn render(&self, name: &str, params: &TemplateParams) -> Result<String, TemplateError> {
        tracing::debug!(template = name, params = params.len(), "Rendering template");
        let template = self.env.get_template(name).map_err(|e| match e.kind() {
            ErrorKind::TemplateNotFound => TemplateError::NotFound(name.to_owned()),
            _ => TemplateError::Render {
                name: name.to_owned(),
                source: e,
            },
        })?;
        template.render(params).map_err(|source| TemplateError::Render {
            name: name.to_owned(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Record;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtins_are_registered() {
        let templates = Templates::new().unwrap();
        for (name, _) in BUILTIN_TEMPLATES {
            assert!(templates.contains(name), "missing built-in {name}");
        }
    }

    #[test]
    fn test_unknown_template_is_not_found() {
        let err = Templates::new()
            .unwrap()
            .render("missing.html", &TemplateParams::new())
            .unwrap_err();
        assert!(matches!(err, TemplateError::NotFound(ref name) if name == "missing.html"));
    }

    #[test]
    fn test_markup_is_not_escaped() {
        let params = TemplateParams::new()
            .with("title", "A & B")
            .with("subtitle", "")
            .with("id", "sec1")
            .with("body", "<p class='what'>snooze</p>");

        let html = Templates::new().unwrap().render(SECTION, &params).unwrap();

        assert!(html.contains("<section id=\"sec1\">"));
        assert!(html.contains("<p class='what'>snooze</p>"));
        assert!(html.contains("A & B"));
    }

    #[test]
    fn test_skeleton_renders_pairs() {
        let params = TemplateParams::new()
            .with("title", "my title")
            .with("head", "")
            .with("corner", "some text")
            .with("asset_prefix", "https://test.test")
            .with("body", "")
            .with(
                "nav_entries",
                vec![
                    ("sec1".to_owned(), "Section 1".to_owned()),
                    ("sec2".to_owned(), "Section 2".to_owned()),
                ],
            )
            .with(
                "related",
                vec![("https://other.test".to_owned(), "Other".to_owned())],
            );

        let html = Templates::new().unwrap().render(SKELETON, &params).unwrap();

        assert!(html.contains("<title>my title</title>"));
        assert!(html.contains("href=\"https://test.test/css/april.css\""));
        assert!(html.contains("<li class=\"nav-entry\"><a href=\"#sec1\">Section 1</a></li>"));
        assert!(html.contains("<li class=\"nav-entry\"><a href=\"#sec2\">Section 2</a></li>"));
        assert!(html.contains("<a href=\"https://other.test\">Other</a>"));
    }

    #[test]
    fn test_skeleton_without_related_links_has_no_related_list() {
        let params = TemplateParams::new()
            .with("title", "t")
            .with("asset_prefix", "/static")
            .with("nav_entries", Vec::<(String, String)>::new())
            .with("related", Vec::<(String, String)>::new());

        let html = Templates::new().unwrap().render(SKELETON, &params).unwrap();

        assert!(!html.contains("related-link"));
        assert_eq!(html.matches("class=\"navbar\"").count(), 1);
    }

    #[test]
    fn test_table_renders_rows_by_field() {
        let params = TemplateParams::new()
            .with("field_names", vec!["name".to_owned(), "score".to_owned()])
            .with(
                "rows",
                vec![
                    [("name", "a"), ("score", "1")].into_iter().collect::<Record>(),
                    [("score", "2"), ("name", "b")].into_iter().collect::<Record>(),
                ],
            );

        let html = Templates::new().unwrap().render(TABLE, &params).unwrap();

        assert!(html.contains("<th>name</th><th>score</th>"));
        assert!(html.contains("<tr><td>a</td><td>1</td></tr>"));
        assert!(html.contains("<tr><td>b</td><td>2</td></tr>"));
        assert_eq!(html.matches("<tr>").count(), 3);
    }

    #[test]
    fn test_with_dir_overrides_builtin() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("side_by_side.html"),
            "<aside>{{ left }}|{{ right }}</aside>",
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let templates = Templates::with_dir(dir.path()).unwrap();
        let params = TemplateParams::new().with("left", "L").with("right", "R");

        assert_eq!(
            templates.render(SIDE_BY_SIDE, &params).unwrap(),
            "<aside>L|R</aside>"
        );
        assert!(templates.contains(SECTION));
        assert!(!templates.contains("notes.txt"));
    }

    #[test]
    fn test_with_dir_missing_directory() {
        let result = Templates::with_dir(Path::new("/nonexistent/april-templates"));
        assert!(matches!(result, Err(TemplateError::Io { .. })));
    }

    #[test]
    fn test_with_dir_invalid_template_syntax() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("section.html"), "{% for %}").unwrap();

        let result = Templates::with_dir(dir.path());

        assert!(matches!(result, Err(TemplateError::Render { ref name, .. }) if name == "section.html"));
    }

    #[test]
    fn test_broken_builtin_fails_construction() {
        let result = Templates::from_sources(&[(SECTION, "{% for %}")]);
        assert!(matches!(result, Err(TemplateError::Render { ref name, .. }) if name == SECTION));
    }

    #[test]
    fn test_unreadable_listing_entry_is_io_error() {
        let dir = Path::new("/templates");
        let entries = vec![
            Ok(PathBuf::from("/templates/section.html")),
            Err(std::io::Error::other("stale handle")),
        ];

        let result = template_files(entries, dir);

        assert!(matches!(result, Err(TemplateError::Io { ref path, .. }) if path == dir));
    }

    #[test]
    fn test_template_files_keeps_sorted_html_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.html", "a.html", "notes.txt"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.html")).unwrap();
        let entries = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.map(|e| e.path()));

        let paths = template_files(entries, dir.path()).unwrap();

        assert_eq!(paths, vec![dir.path().join("a.html"), dir.path().join("b.html")]);
    }
}
