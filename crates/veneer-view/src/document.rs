/*
 * document.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The document store: a mutable text buffer plus the state needed to load
//! templates and substitute data into them.
//!
//! This layer is deliberately dumb. It owns the buffer, the template search
//! path and extension, and the data context, and exposes primitive
//! operations (load, extract, replace, key lookup). All control logic lives
//! in [`crate::view::View`].

use regex::{NoExpand, Regex};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::context::{DataContext, Value};
use crate::error::{ViewError, ViewResult};

/// Default directory templates are resolved under.
pub const DEFAULT_VIEW_PATH: &str = "resources/views";

/// Default template file extension.
pub const DEFAULT_EXTENSION: &str = ".tpl";

/// One pattern match over the buffer, with its capture groups.
#[derive(Debug, Clone)]
pub struct ExtractedMatch {
    /// The full matched text.
    pub text: String,
    /// Capture groups 1.., in order. `None` for groups that did not
    /// participate in the match.
    pub groups: Vec<Option<String>>,
}

impl ExtractedMatch {
    /// Capture group `n` (1-based), or "" if absent.
    pub fn group(&self, n: usize) -> &str {
        self.groups
            .get(n - 1)
            .and_then(|g| g.as_deref())
            .unwrap_or("")
    }
}

/// A mutable template document and its loading configuration.
#[derive(Debug, Clone)]
pub struct Document {
    base: PathBuf,
    extension: String,
    buffer: String,
    data: DataContext,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            base: PathBuf::from(DEFAULT_VIEW_PATH),
            extension: DEFAULT_EXTENSION.to_string(),
            buffer: String::new(),
            data: DataContext::new(),
        }
    }
}

impl Document {
    /// Create an empty document with the default base path and extension.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the directory templates are resolved under.
    pub fn set_base(&mut self, base: impl Into<PathBuf>) {
        self.base = base.into();
    }

    /// The directory templates are resolved under.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Set the template file extension. A missing leading dot is supplied.
    pub fn set_extension(&mut self, extension: impl Into<String>) {
        let extension = extension.into();
        self.extension = if extension.starts_with('.') {
            extension
        } else {
            format!(".{extension}")
        };
    }

    /// The template file extension, with its leading dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Replace the buffer content directly, bypassing file load.
    pub fn set(&mut self, content: impl Into<String>) {
        self.buffer = content.into();
    }

    /// The current buffer content.
    pub fn content(&self) -> &str {
        &self.buffer
    }

    /// Merge bindings into the data context; new entries win on conflict.
    pub fn set_data(&mut self, data: DataContext) {
        self.data.merge(data);
    }

    /// Bind one key, replacing any previous value.
    pub fn set_key(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key, value);
    }

    /// Whether a binding exists for `key`.
    pub fn key_exists(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Look up a binding.
    pub fn key(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// The full data context.
    pub fn data(&self) -> &DataContext {
        &self.data
    }

    /// Resolve a template name to a file path: `.` becomes the path
    /// separator, the extension is appended, and the result is joined under
    /// the base directory (`layouts.app` → `<base>/layouts/app.tpl`).
    pub fn resolve_path(&self, template: &str) -> PathBuf {
        let relative = template.replace('.', std::path::MAIN_SEPARATOR_STR);
        self.base.join(format!("{relative}{}", self.extension))
    }

    /// Load a template file into the buffer.
    ///
    /// No caching: every call re-reads from storage.
    pub fn load_file(&mut self, template: &str) -> ViewResult<()> {
        let path = self.resolve_path(template);
        tracing::debug!(template = %template, path = %path.display(), "loading template");
        match fs::read_to_string(&path) {
            Ok(content) => {
                self.buffer = content;
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ViewError::TemplateNotFound { path })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// One-shot load: merge `data`, read `template`, return the raw content.
    pub fn load(&mut self, template: &str, data: DataContext) -> ViewResult<&str> {
        self.set_data(data);
        self.load_file(template)?;
        Ok(self.content())
    }

    /// Run a pattern over the buffer and return all matches with their
    /// capture groups, in text order. Does not mutate the buffer.
    pub fn extract(&self, pattern: &Regex) -> Vec<ExtractedMatch> {
        pattern
            .captures_iter(&self.buffer)
            .map(|caps| ExtractedMatch {
                text: caps[0].to_string(),
                groups: (1..caps.len())
                    .map(|i| caps.get(i).map(|m| m.as_str().to_string()))
                    .collect(),
            })
            .collect()
    }

    /// Replace **every** occurrence of the exact text `found`. Duplicate
    /// directive text anywhere in the document is filled identically.
    pub fn replace_literal(&mut self, found: &str, replacement: &str) {
        if found.is_empty() {
            return;
        }
        self.buffer = self.buffer.replace(found, replacement);
    }

    /// Replace every pattern match with a literal string. The replacement
    /// is never expanded, so buffer content containing `$1` is safe.
    pub fn replace_pattern(&mut self, pattern: &Regex, replacement: &str) {
        self.buffer = pattern
            .replace_all(&self.buffer, NoExpand(replacement))
            .into_owned();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\w+)-(\w+)\b").unwrap());

    #[test]
    fn test_resolve_path_dots_become_separators() {
        let mut doc = Document::new();
        doc.set_base("/srv/views");
        doc.set_extension(".tpl");
        assert_eq!(
            doc.resolve_path("layouts.app"),
            PathBuf::from("/srv/views/layouts/app.tpl")
        );
        assert_eq!(doc.resolve_path("home"), PathBuf::from("/srv/views/home.tpl"));
    }

    #[test]
    fn test_extension_normalization() {
        let mut doc = Document::new();
        doc.set_extension("html");
        assert_eq!(doc.extension(), ".html");
        doc.set_extension(".txt");
        assert_eq!(doc.extension(), ".txt");
    }

    #[test]
    fn test_defaults() {
        let doc = Document::new();
        assert_eq!(doc.base(), Path::new(DEFAULT_VIEW_PATH));
        assert_eq!(doc.extension(), DEFAULT_EXTENSION);
        assert_eq!(doc.content(), "");
    }

    #[test]
    fn test_load_file_reads_content() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = fs::File::create(dir.path().join("hello.tpl")).unwrap();
        write!(file, "<h1>Hello</h1>").unwrap();

        let mut doc = Document::new();
        doc.set_base(dir.path());
        doc.load_file("hello").unwrap();
        assert_eq!(doc.content(), "<h1>Hello</h1>");
    }

    #[test]
    fn test_load_merges_data_and_returns_content() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = fs::File::create(dir.path().join("raw.tpl")).unwrap();
        write!(file, "{{{{ $user }}}}").unwrap();

        let mut doc = Document::new();
        doc.set_base(dir.path());
        let content = doc
            .load("raw", DataContext::with_entries([("user", "Ada")]))
            .unwrap();
        assert_eq!(content, "{{ $user }}");
        assert!(doc.key_exists("user"));
    }

    #[test]
    fn test_load_file_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = Document::new();
        doc.set_base(dir.path());

        let err = doc.load_file("nope").unwrap_err();
        match err {
            ViewError::TemplateNotFound { path } => {
                assert_eq!(path, dir.path().join("nope.tpl"));
            }
            other => panic!("expected TemplateNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_replace_literal_hits_every_occurrence() {
        let mut doc = Document::new();
        doc.set("a b a b a");
        doc.replace_literal("a", "x");
        assert_eq!(doc.content(), "x b x b x");
    }

    #[test]
    fn test_replace_pattern_is_literal() {
        let mut doc = Document::new();
        doc.set("one-two three-four");
        // "$1" must land in the output verbatim, not expand to a group
        doc.replace_pattern(&WORD, "$1");
        assert_eq!(doc.content(), "$1 $1");
    }

    #[test]
    fn test_extract_returns_groups_in_order() {
        let mut doc = Document::new();
        doc.set("one-two three-four");
        let matches = doc.extract(&WORD);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].text, "one-two");
        assert_eq!(matches[0].group(1), "one");
        assert_eq!(matches[0].group(2), "two");
        assert_eq!(matches[1].group(1), "three");
    }

    #[test]
    fn test_data_accessors() {
        let mut doc = Document::new();
        doc.set_key("user", "Ada");
        doc.set_data(DataContext::with_entries([("site", "veneer")]));

        assert!(doc.key_exists("user"));
        assert!(doc.key_exists("site"));
        assert!(!doc.key_exists("missing"));
        assert_eq!(doc.key("user"), Some(&Value::Str("Ada".to_string())));
    }
}
