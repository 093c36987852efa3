/*
 * scan.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Innermost-block scanning for `@for` and `@if` extraction.
//!
//! A block is *innermost* when the text between its opener and closer
//! contains no other directive token: no `@if`, `@for`, or `@end*` (and,
//! for conditionals, no stray `@else`). The extraction fixed point peels
//! nested and chained blocks layer by layer: each pass captures only
//! innermost blocks, replaces them with placeholder tokens, and the next
//! pass sees the enclosing blocks as innermost in turn.
//!
//! The scanner walks openers left to right and accepts a block only when
//! the next directive token after the opener is the block's own closer.
//! Openers that fail the check are skipped and revisited on a later pass.

use once_cell::sync::Lazy;
use regex::Regex;

/// Opener for a loop block: `@for($collection as $alias)`.
///
/// Captures the collection key (group 1) and the item alias (group 2).
/// Key names allow word characters, dots, and dashes.
static FOR_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@for\(\s*\$([\w.\-]*)\s*as\s*\$([\w.\-]*)\s*\)").unwrap());

/// Opener for a conditional block: `@if(expr):`.
///
/// The expression may contain parentheses but never a colon; the first
/// `):` after the opener terminates it. Captures the expression (group 1).
static IF_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)@if\(\s*([^:]+?)\s*\):").unwrap());

const END_FOR: &str = "@endfor";
const END_IF: &str = "@endif";
const ELSE: &str = "@else";

/// Tokens that disqualify a loop body from being innermost.
const FOR_BODY_STOPS: &[&str] = &["@if", "@for", "@end"];

/// Tokens that disqualify a conditional branch from being innermost.
const IF_BODY_STOPS: &[&str] = &["@if", "@for", "@else", "@end"];

/// An innermost `@for` block found in the input.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ForMatch {
    /// The full matched text, opener through `@endfor`.
    pub text: String,
    /// The data key naming the collection to iterate.
    pub source_key: String,
    /// The alias each item is bound to.
    pub item_alias: String,
    /// The loop body.
    pub body: String,
}

/// An innermost `@if` block found in the input.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct IfMatch {
    /// The full matched text, opener through `@endif`.
    pub text: String,
    /// The condition expression, trimmed.
    pub condition: String,
    /// Body emitted when the condition holds.
    pub then_body: String,
    /// Body emitted otherwise; empty when no `@else` is present.
    pub else_body: String,
}

/// Position of the earliest occurrence of any needle in `haystack`.
fn next_directive(haystack: &str, needles: &[&str]) -> Option<usize> {
    needles.iter().filter_map(|n| haystack.find(n)).min()
}

/// Collect every innermost `@for` block, in text order.
pub(crate) fn innermost_fors(input: &str) -> Vec<ForMatch> {
    let mut found = Vec::new();
    let mut pos = 0;
    while let Some(caps) = FOR_OPEN.captures(&input[pos..]) {
        let open = caps.get(0).unwrap();
        let start = pos + open.start();
        let body_start = pos + open.end();
        let tail = &input[body_start..];

        match next_directive(tail, FOR_BODY_STOPS) {
            Some(idx) if tail[idx..].starts_with(END_FOR) => {
                let end = body_start + idx + END_FOR.len();
                found.push(ForMatch {
                    text: input[start..end].to_string(),
                    source_key: caps[1].to_string(),
                    item_alias: caps[2].to_string(),
                    body: tail[..idx].to_string(),
                });
                pos = end;
            }
            // Another directive intervenes (or the closer is missing):
            // not innermost on this pass. Step past the opener so nested
            // openers inside the body are still visited.
            _ => pos = body_start,
        }
    }
    found
}

/// Collect every innermost `@if` block, in text order.
pub(crate) fn innermost_ifs(input: &str) -> Vec<IfMatch> {
    let mut found = Vec::new();
    let mut pos = 0;
    while let Some(caps) = IF_OPEN.captures(&input[pos..]) {
        let open = caps.get(0).unwrap();
        let start = pos + open.start();
        let body_start = pos + open.end();
        let condition = caps[1].trim().to_string();
        let tail = &input[body_start..];

        let Some(idx) = next_directive(tail, IF_BODY_STOPS) else {
            pos = body_start;
            continue;
        };

        if tail[idx..].starts_with(END_IF) {
            let end = body_start + idx + END_IF.len();
            found.push(IfMatch {
                text: input[start..end].to_string(),
                condition,
                then_body: tail[..idx].to_string(),
                else_body: String::new(),
            });
            pos = end;
        } else if tail[idx..].starts_with(ELSE) {
            let else_start = idx + ELSE.len();
            let rest = &tail[else_start..];
            match next_directive(rest, IF_BODY_STOPS) {
                Some(idx2) if rest[idx2..].starts_with(END_IF) => {
                    let end = body_start + else_start + idx2 + END_IF.len();
                    found.push(IfMatch {
                        text: input[start..end].to_string(),
                        condition,
                        then_body: tail[..idx].to_string(),
                        else_body: rest[..idx2].to_string(),
                    });
                    pos = end;
                }
                _ => pos = body_start,
            }
        } else {
            pos = body_start;
        }
    }
    found
}
