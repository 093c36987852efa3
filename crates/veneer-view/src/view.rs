/*
 * view.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The rendering pipeline.
//!
//! [`View`] orchestrates composition and substitution passes over a
//! [`Document`]: section extraction, `@extends` merging, `@include`
//! expansion, key interpolation, and the extraction/resolution fixed points
//! for `@if`/`@for` blocks. Every form of recursion (an extends layout, an
//! include, one loop iteration) is a brand-new `View` built by the child
//! factories, never shared mutable state.
//!
//! Control blocks are not parsed into a tree. Each extraction pass lifts the
//! innermost blocks out of the buffer into side tables behind opaque
//! placeholder tokens (`{% for $for_1 %}`, `{% if $if_2 %}`); repeating to a
//! fixed point peels arbitrarily nested structures. Resolution then replaces
//! placeholders with evaluated content, again to a fixed point, because a
//! substituted body may itself contain placeholders or fresh keys.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::context::{DataContext, Value};
use crate::document::Document;
use crate::error::ViewResult;
use crate::expr;
use crate::scan;

/// `@section(name) ... @endsection`, non-greedy, spanning newlines. A
/// trailing newline after `@endsection` is consumed with the block.
static SECTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)@section\(\s*([\w.\-]*)\s*\)(.*?)@endsection(?:\r?\n)?").unwrap()
});

/// `@extends(name)`, consuming a trailing newline.
static EXTENDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@extends\(\s*([\w.\-]*)\s*\)(?:\r?\n)?").unwrap());

/// `@include(name)`.
static INCLUDE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@include\(\s*([\w.\-]*)\s*\)").unwrap());

/// `@yield(name)`.
static YIELD: Lazy<Regex> = Lazy::new(|| Regex::new(r"@yield\(\s*([\w.\-]*)\s*\)").unwrap());

/// Leftover `@yield(...)` of any shape, for cleanup; consumes a trailing
/// newline like the block it stood for.
static LEFTOVER_YIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@yield\(\s*[^)]*\)(?:\r?\n)?").unwrap());

/// Raw interpolation: `!$key`. Resolved before lonely keys.
static RAW_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\$([\w.\-]*)").unwrap());

/// Lonely interpolation: `{{ $key }}` with optional inner whitespace.
static LONELY_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*\$([\w.\-]*)\s*\}\}").unwrap());

/// Placeholder token standing in for an extracted `@for` block.
static FOR_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{% for \$(\w+) %\}").unwrap());

/// Placeholder token standing in for an extracted `@if` block.
static IF_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{% if \$(\w+) %\}").unwrap());

/// Unbalanced directives surviving block removal: bare openers and closers
/// with no partner. Swept to empty on finalize.
static STRAY_DIRECTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)@(?:if\([^:]*?\):|for\(\s*\$[\w.\-]*\s*as\s*\$[\w.\-]*\s*\)|else|endif|endfor)")
        .unwrap()
});

/// Placeholder tokens whose table entry is gone; swept to empty on finalize.
static STRAY_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{% (?:for|if) \$\w+ %\}").unwrap());

/// An extracted `@for` block pending resolution.
#[derive(Debug, Clone)]
struct ForBlock {
    source_key: String,
    item_alias: String,
    body: String,
}

/// An extracted `@if` block pending resolution.
#[derive(Debug, Clone)]
struct IfBlock {
    condition: String,
    then_body: String,
    else_body: String,
}

/// A view rendering pipeline.
///
/// Placeholder id counters and the section/if/for tables are per-instance
/// state: each top-level render must use an independently constructed
/// `View`. Child renders (extends, includes, loop items) are spawned
/// internally via [`View::child`].
#[derive(Debug, Clone, Default)]
pub struct View {
    doc: Document,
    sections: HashMap<String, String>,
    fors: HashMap<String, ForBlock>,
    for_count: usize,
    ifs: HashMap<String, IfBlock>,
    if_count: usize,
}

impl View {
    /// Create a pipeline with the default base path and extension.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pipeline resolving templates under `base`.
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        let mut view = Self::new();
        view.set_base(base);
        view
    }

    /// Set the directory templates are resolved under.
    pub fn set_base(&mut self, base: impl Into<PathBuf>) {
        self.doc.set_base(base);
    }

    /// Set the template file extension (default `.tpl`).
    pub fn set_extension(&mut self, extension: impl Into<String>) {
        self.doc.set_extension(extension);
    }

    /// Set the document content directly, bypassing file load.
    pub fn set_doc(&mut self, content: impl Into<String>) {
        self.doc.set(content);
    }

    /// Merge bindings into the data context.
    pub fn set_data(&mut self, data: DataContext) {
        self.doc.set_data(data);
    }

    /// Bind one key.
    pub fn set_key(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.doc.set_key(key, value);
    }

    /// The underlying document.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Render a template to its final output string.
    ///
    /// Loads `template` (unless empty, in which case the pre-set document
    /// content is rendered), merges `data`, runs every pipeline pass, and
    /// finalizes with [`View::cleanup`].
    pub fn render(&mut self, template: &str, data: DataContext) -> ViewResult<String> {
        self.render_with(template, data, true)
    }

    /// Render with explicit control over finalization.
    ///
    /// Non-finalizing renders skip cleanup so an outer pass can still see
    /// and resolve keys and directives introduced by composition.
    pub fn render_with(
        &mut self,
        template: &str,
        data: DataContext,
        finalize: bool,
    ) -> ViewResult<String> {
        self.set_data(data);
        if !template.is_empty() {
            tracing::debug!(template = %template, finalize, "rendering view");
            self.doc.load_file(template)?;
        }
        self.parse(finalize)
    }

    /// Run all pipeline passes over the current document and return the
    /// buffer, finalizing when asked.
    pub fn parse(&mut self, finalize: bool) -> ViewResult<String> {
        self.process()?;
        if finalize {
            self.cleanup();
        }
        Ok(self.doc.content().to_string())
    }

    fn process(&mut self) -> ViewResult<()> {
        self.extract_sections();
        self.merge_extends()?;
        self.expand_includes()?;
        // Fill yields the extends merge did not already consume.
        self.replace_sections();
        self.replace_keys();
        self.extract_if_and_for();
        self.resolve_if_and_for()
    }

    /// Child pipeline for extends layouts and loop items: inherits base
    /// path, extension, data, and the not-yet-consumed if/for tables. The
    /// id counters travel with the tables so ids stay unique for the
    /// lifetime of the top-level render.
    pub fn child(&self) -> View {
        let mut child = View::new();
        child.doc.set_base(self.doc.base().to_path_buf());
        child.doc.set_extension(self.doc.extension().to_string());
        child.doc.set_data(self.doc.data().clone());
        child.fors = self.fors.clone();
        child.for_count = self.for_count;
        child.ifs = self.ifs.clone();
        child.if_count = self.if_count;
        child
    }

    /// Child pipeline for includes: same configuration and data, fresh
    /// if/for tables.
    fn include_child(&self) -> View {
        let mut child = View::new();
        child.doc.set_base(self.doc.base().to_path_buf());
        child.doc.set_extension(self.doc.extension().to_string());
        child.doc.set_data(self.doc.data().clone());
        child
    }

    // Sections

    /// Lift every `@section` block out of the buffer into the section
    /// table. Later blocks for the same name overwrite earlier ones.
    fn extract_sections(&mut self) {
        for m in self.doc.extract(&SECTION) {
            self.sections
                .insert(m.group(1).to_string(), m.group(2).to_string());
            self.doc.replace_literal(&m.text, "");
        }
    }

    /// Replace `@yield(key)` with `content`, everywhere it occurs.
    fn replace_yield(&mut self, key: &str, content: &str) {
        for m in self.doc.extract(&YIELD) {
            if m.group(1) == key {
                self.doc.replace_literal(&m.text, content);
            }
        }
    }

    fn replace_sections(&mut self) {
        let sections: Vec<(String, String)> = self
            .sections
            .iter()
            .map(|(name, content)| (name.clone(), content.clone()))
            .collect();
        for (name, content) in sections {
            self.replace_yield(&name, &content);
        }
    }

    // Composition

    /// Merge each `@extends(name)`, left to right: the remaining buffer
    /// becomes the `content` yield of the rendered layout.
    fn merge_extends(&mut self) -> ViewResult<()> {
        for m in self.doc.extract(&EXTENDS) {
            let layout = m.group(1).to_string();
            tracing::debug!(layout = %layout, "merging extends layout");

            self.doc.replace_literal(&m.text, "");
            let body = self.doc.content().to_string();

            let mut parent = self.child();
            let rendered = parent.render_with(&layout, DataContext::new(), false)?;

            self.doc.set(rendered);
            self.replace_yield("content", &body);
            self.replace_sections();
        }
        Ok(())
    }

    /// Expand each `@include(name)` with a full (non-finalizing) render of
    /// the referenced template under the current data.
    fn expand_includes(&mut self) -> ViewResult<()> {
        for m in self.doc.extract(&INCLUDE) {
            let name = m.group(1).to_string();
            tracing::debug!(include = %name, "expanding include");

            let mut include = self.include_child();
            let rendered = include.render_with(&name, DataContext::new(), false)?;
            self.doc.replace_literal(&m.text, &rendered);
        }
        Ok(())
    }

    // Key substitution

    /// Raw keys first, then lonely keys, so a `!$key` inside merged content
    /// is not re-interpreted by the brace-key pass.
    fn replace_keys(&mut self) {
        self.replace_marked_keys(&RAW_KEY);
        self.replace_marked_keys(&LONELY_KEY);
    }

    /// Substitute every marker whose key resolves to a scalar. Sequences
    /// and mappings are never interpolated; missing keys are left for
    /// cleanup.
    fn replace_marked_keys(&mut self, pattern: &Regex) {
        for m in self.doc.extract(pattern) {
            let rendered = self
                .doc
                .key(m.group(1))
                .filter(|value| value.is_scalar())
                .map(Value::render);
            if let Some(rendered) = rendered {
                self.doc.replace_literal(&m.text, &rendered);
            }
        }
    }

    // If/for extraction

    /// Peel innermost `@for`/`@if` blocks into the side tables until the
    /// buffer holds none, replacing each with a placeholder token. Nested
    /// and chained blocks come out layer by layer.
    fn extract_if_and_for(&mut self) {
        loop {
            let any_for = self.extract_fors();
            let any_if = self.extract_ifs();
            if !any_for && !any_if {
                break;
            }
        }
        tracing::trace!(
            fors = self.fors.len(),
            ifs = self.ifs.len(),
            "extracted control blocks"
        );
    }

    fn extract_fors(&mut self) -> bool {
        let found = scan::innermost_fors(self.doc.content());
        let mut any = false;
        for m in found {
            any = true;
            self.for_count += 1;
            let id = format!("for_{}", self.for_count);
            self.fors.insert(
                id.clone(),
                ForBlock {
                    source_key: m.source_key,
                    item_alias: m.item_alias,
                    body: m.body,
                },
            );
            self.doc
                .replace_literal(&m.text, &format!("{{% for ${id} %}}"));
        }
        any
    }

    fn extract_ifs(&mut self) -> bool {
        let found = scan::innermost_ifs(self.doc.content());
        let mut any = false;
        for m in found {
            any = true;
            self.if_count += 1;
            let id = format!("if_{}", self.if_count);
            self.ifs.insert(
                id.clone(),
                IfBlock {
                    condition: m.condition,
                    then_body: m.then_body,
                    else_body: m.else_body,
                },
            );
            self.doc
                .replace_literal(&m.text, &format!("{{% if ${id} %}}"));
        }
        any
    }

    // If/for resolution

    /// Resolve placeholder tokens until neither resolver makes progress.
    /// Key substitution re-runs after every round because substituted
    /// bodies may contain fresh lonely or raw keys.
    fn resolve_if_and_for(&mut self) -> ViewResult<()> {
        loop {
            let any_for = self.resolve_fors()?;
            let any_if = self.resolve_ifs()?;
            self.replace_keys();
            if !any_for && !any_if {
                return Ok(());
            }
        }
    }

    /// Expand each `{% for $for_N %}`: iterate the source collection,
    /// rendering the stored body once per item in a child pipeline with the
    /// alias bound (or `alias.subkey` for item maps), and substitute the
    /// concatenated output.
    fn resolve_fors(&mut self) -> ViewResult<bool> {
        let mut any = false;
        for m in self.doc.extract(&FOR_TOKEN) {
            let Some(block) = self.fors.get(m.group(1)).cloned() else {
                continue;
            };

            let items: Vec<Value> = match self.doc.key(&block.source_key) {
                Some(Value::List(items)) => items.clone(),
                Some(Value::Map(map)) => map.values().cloned().collect(),
                // Missing key or scalar: nothing to iterate.
                _ => Vec::new(),
            };

            let mut output = String::new();
            for item in items {
                let mut iteration = self.child();
                iteration.set_doc(block.body.clone());
                match item {
                    Value::Map(fields) => {
                        for (sub_key, sub_value) in fields {
                            iteration
                                .set_key(format!("{}.{sub_key}", block.item_alias), sub_value);
                        }
                    }
                    other => iteration.set_key(block.item_alias.clone(), other),
                }
                output.push_str(&iteration.parse(false)?);
            }

            self.doc.replace_literal(&m.text, &output);
            any = true;
        }
        Ok(any)
    }

    /// Decide each `{% if $if_N %}`: evaluate the stored condition against
    /// the current data and substitute the winning branch.
    fn resolve_ifs(&mut self) -> ViewResult<bool> {
        let mut any = false;
        for m in self.doc.extract(&IF_TOKEN) {
            let Some(block) = self.ifs.get(m.group(1)).cloned() else {
                continue;
            };

            let verdict = expr::evaluate(&block.condition, self.doc.data())?;
            tracing::trace!(condition = %block.condition, verdict, "resolved condition");

            let branch = if verdict {
                &block.then_body
            } else {
                &block.else_body
            };
            self.doc.replace_literal(&m.text, branch);
            any = true;
        }
        Ok(any)
    }

    // Cleanup

    /// Erase everything still unresolved so the final string never leaks
    /// directive syntax: leftover yields, leftover lonely keys, then
    /// unresolved `@for`/`@if` blocks (even nested) and stray directives.
    ///
    /// Runs automatically at the end of a finalizing render; non-finalizing
    /// renders skip it so outer passes can keep resolving.
    pub fn cleanup(&mut self) {
        self.doc.replace_pattern(&LEFTOVER_YIELD, "");
        self.doc.replace_pattern(&LONELY_KEY, "");
        self.clear_blocks();
    }

    fn clear_blocks(&mut self) {
        loop {
            let fors = scan::innermost_fors(self.doc.content());
            let any_for = !fors.is_empty();
            for m in fors {
                self.doc.replace_literal(&m.text, "");
            }

            let ifs = scan::innermost_ifs(self.doc.content());
            let any_if = !ifs.is_empty();
            for m in ifs {
                self.doc.replace_literal(&m.text, "");
            }

            if !any_for && !any_if {
                break;
            }
        }
        self.doc.replace_pattern(&STRAY_DIRECTIVE, "");
        self.doc.replace_pattern(&STRAY_TOKEN, "");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(doc: &str, data: DataContext) -> String {
        let mut view = View::new();
        view.set_doc(doc);
        view.render("", data).unwrap()
    }

    fn colors() -> Value {
        Value::List(vec![
            Value::from("red"),
            Value::from("green"),
            Value::from("blue"),
        ])
    }

    fn color_maps() -> Value {
        Value::List(
            ["red", "green", "blue"]
                .iter()
                .map(|name| {
                    let mut fields = std::collections::BTreeMap::new();
                    fields.insert("name".to_string(), Value::from(*name));
                    Value::Map(fields)
                })
                .collect(),
        )
    }

    #[test]
    fn test_plain_document_is_identity() {
        let doc = "<p>No directives here.</p>";
        assert_eq!(render(doc, DataContext::new()), doc);
    }

    #[test]
    fn test_lonely_key_present() {
        assert_eq!(
            render(
                "<h1>Hi {{ $target }}</h1>",
                DataContext::with_entries([("target", "Everyone")])
            ),
            "<h1>Hi Everyone</h1>"
        );
    }

    #[test]
    fn test_lonely_key_missing_cleared_on_finalize() {
        assert_eq!(
            render("<h1>Hi {{ $target }}</h1>", DataContext::new()),
            "<h1>Hi </h1>"
        );
    }

    #[test]
    fn test_lonely_key_missing_kept_without_finalize() {
        let mut view = View::new();
        view.set_doc("<h1>Hi {{ $target }}</h1>");
        let out = view.render_with("", DataContext::new(), false).unwrap();
        assert_eq!(out, "<h1>Hi {{ $target }}</h1>");
    }

    #[test]
    fn test_raw_key_resolves_before_lonely() {
        assert_eq!(
            render(
                "!$greeting {{ $greeting }}",
                DataContext::with_entries([("greeting", "hello")])
            ),
            "hello hello"
        );
    }

    #[test]
    fn test_collections_never_interpolate() {
        let data = DataContext::with_entries([("colors", colors())]);
        assert_eq!(render("{{ $colors }}!$colors", data), "!$colors");
    }

    #[test]
    fn test_numeric_key_renders_without_fraction() {
        assert_eq!(
            render(
                "{{ $total }} items",
                DataContext::with_entries([("total", 3i64)])
            ),
            "3 items"
        );
    }

    #[test]
    fn test_section_and_yield() {
        let doc = "@section(title)Home@endsection<h1>@yield(title)</h1>";
        assert_eq!(render(doc, DataContext::new()), "<h1>Home</h1>");
    }

    #[test]
    fn test_later_section_wins() {
        let doc = "@section(t)first@endsection@section(t)second@endsection@yield(t)";
        assert_eq!(render(doc, DataContext::new()), "second");
    }

    #[test]
    fn test_leftover_yield_cleared_on_finalize() {
        assert_eq!(render("<div>@yield(side)</div>", DataContext::new()), "<div></div>");
    }

    #[test]
    fn test_if_count_true() {
        let doc = "@if( count($colors) > 1 ): many @endif";
        let data = DataContext::with_entries([("colors", colors())]);
        assert_eq!(render(doc, data), " many ");
    }

    #[test]
    fn test_if_count_false() {
        let doc = "@if( count($colors) > 1 ): many @endif";
        let data = DataContext::with_entries([("colors", Value::List(vec![Value::from("red")]))]);
        assert_eq!(render(doc, data), "");
    }

    #[test]
    fn test_if_negative_number() {
        let doc = "<p>@if( $count > 1 ):There are many colors.@endifThank you!</p>";
        let data = DataContext::with_entries([("count", -10i64)]);
        assert_eq!(render(doc, data), "<p>Thank you!</p>");
    }

    #[test]
    fn test_if_else_key_present() {
        let doc = "<p>@if( $user != \"\" ):Hi {{ $user }}!@else Please, log on.@endif</p>";
        let data = DataContext::with_entries([("user", "Logged User")]);
        assert_eq!(render(doc, data), "<p>Hi Logged User!</p>");
    }

    #[test]
    fn test_if_else_key_missing() {
        let doc = "<p>@if( $user != \"\" ):Hi {{ $user }}!@else Please, log on.@endif</p>";
        assert_eq!(render(doc, DataContext::new()), "<p> Please, log on.</p>");
    }

    #[test]
    fn test_for_over_scalars() {
        let doc = "<p>The colors are: @for( $colors as $color ){{ $color }} @endfor</p>";
        let data = DataContext::with_entries([("colors", colors())]);
        assert_eq!(render(doc, data), "<p>The colors are: red green blue </p>");
    }

    #[test]
    fn test_for_over_item_maps() {
        let doc = "<p>The colors are: @for( $colors as $color ){{ $color.name }} @endfor</p>";
        let data = DataContext::with_entries([("colors", color_maps())]);
        assert_eq!(render(doc, data), "<p>The colors are: red green blue </p>");
    }

    #[test]
    fn test_for_over_mapping_iterates_values_in_key_order() {
        let mut scores = std::collections::BTreeMap::new();
        scores.insert("b".to_string(), Value::from("2"));
        scores.insert("a".to_string(), Value::from("1"));
        let data = DataContext::with_entries([("scores", Value::Map(scores))]);
        assert_eq!(render("@for($scores as $s){{ $s }}@endfor", data), "12");
    }

    #[test]
    fn test_for_missing_key_expands_empty() {
        assert_eq!(
            render("a@for($missing as $m)x@endfor b", DataContext::new()),
            "a b"
        );
    }

    #[test]
    fn test_nested_for_in_for() {
        let doc = "@for($rows as $row)@for($row.cells as $cell)[{{ $cell }}]@endfor|@endfor";
        let mut row1 = std::collections::BTreeMap::new();
        row1.insert(
            "cells".to_string(),
            Value::List(vec![Value::from("a"), Value::from("b")]),
        );
        let mut row2 = std::collections::BTreeMap::new();
        row2.insert("cells".to_string(), Value::List(vec![Value::from("c")]));
        let data = DataContext::with_entries([(
            "rows",
            Value::List(vec![Value::Map(row1), Value::Map(row2)]),
        )]);
        assert_eq!(render(doc, data), "[a][b]|[c]|");
    }

    #[test]
    fn test_if_nested_in_for() {
        let doc = "@for($users as $user)@if( $user.active == \"yes\" ):{{ $user.name }} @endif@endfor";
        let user = |name: &str, active: &str| {
            let mut fields = std::collections::BTreeMap::new();
            fields.insert("name".to_string(), Value::from(name));
            fields.insert("active".to_string(), Value::from(active));
            Value::Map(fields)
        };
        let data = DataContext::with_entries([(
            "users",
            Value::List(vec![user("Ada", "yes"), user("Bob", "no"), user("Eve", "yes")]),
        )]);
        assert_eq!(render(doc, data), "Ada Eve ");
    }

    #[test]
    fn test_chained_ifs_resolve_independently() {
        let doc = "@if($a):A@endif@if($b):B@else b@endif";
        let data = DataContext::with_entries([("a", "x"), ("b", "")]);
        assert_eq!(render(doc, data), "A b");
    }

    #[test]
    fn test_duplicate_directives_fill_identically() {
        let doc = "@if($on):yes@endif-@if($on):yes@endif";
        let data = DataContext::with_entries([("on", "1")]);
        assert_eq!(render(doc, data), "yes-yes");
    }

    #[test]
    fn test_malformed_condition_is_fatal() {
        let mut view = View::new();
        view.set_doc("@if( $user === \"x\" ):y@endif");
        let err = view.render("", DataContext::new()).unwrap_err();
        assert!(matches!(
            err,
            crate::error::ViewError::MalformedExpression { .. }
        ));
    }

    #[test]
    fn test_unbalanced_directives_swept_on_finalize() {
        let doc = "text @endfor more @else and @if($x): open";
        assert_eq!(render(doc, DataContext::new()), "text  more  and  open");
    }

    #[test]
    fn test_cleanup_is_explicit_and_idempotent() {
        let mut view = View::new();
        view.set_doc("keep {{ $gone }}@yield(x)");
        view.cleanup();
        assert_eq!(view.document().content(), "keep ");
        view.cleanup();
        assert_eq!(view.document().content(), "keep ");
    }

    #[test]
    fn test_extraction_depth_three_leaves_no_tokens() {
        let doc = "@if($a):@if($b):@if($c):deep@endif@endif@endif";
        let data = DataContext::with_entries([("a", "1"), ("b", "1"), ("c", "1")]);
        assert_eq!(render(doc, data), "deep");
    }

    #[test]
    fn test_loop_body_keys_do_not_leak_outer_data() {
        // `color` bound per iteration shadows nothing and disappears after.
        let doc = "@for($colors as $color)<{{ $color }}>@endfor{{ $color }}";
        let data = DataContext::with_entries([("colors", colors())]);
        assert_eq!(render(doc, data), "<red><green><blue>");
    }
}
