/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Directive-based view rendering engine for Veneer.
//!
//! Templates are plain text documents carrying interpolation markers and
//! control directives; rendering resolves them against a key/value data
//! context:
//!
//! | Directive | Form | Effect |
//! |---|---|---|
//! | Lonely interpolation | `{{ $key }}` | scalar value of `key`, cleared on finalize if missing |
//! | Raw interpolation | `!$key` | same, resolved before lonely interpolation |
//! | Section | `@section(name) ... @endsection` | captures body under `name` |
//! | Yield | `@yield(name)` | replaced by section `name` |
//! | Extends | `@extends(name)` | body becomes the `content` yield of layout `name` |
//! | Include | `@include(name)` | inlines a full render of template `name` |
//! | For loop | `@for($collection as $alias) ... @endfor` | iterates a sequence or mapping |
//! | Conditional | `@if(expr): ... [@else ...] @endif` | boolean expression over `$` data keys |
//!
//! Template names resolve to files by replacing `.` with the path separator
//! under a configured base directory (`layouts.app` → `layouts/app.tpl`).
//!
//! # Example
//!
//! ```
//! use veneer_view::{DataContext, View};
//!
//! let mut view = View::new();
//! view.set_doc("<h1>Hi {{ $target }}</h1>");
//!
//! let data = DataContext::with_entries([("target", "Everyone")]);
//! let output = view.render("", data).unwrap();
//! assert_eq!(output, "<h1>Hi Everyone</h1>");
//! ```

pub mod context;
pub mod document;
pub mod error;
pub mod view;

mod expr;
mod scan;

// Re-export main types at crate root
pub use context::{DataContext, Value};
pub use document::{DEFAULT_EXTENSION, DEFAULT_VIEW_PATH, Document, ExtractedMatch};
pub use error::{ViewError, ViewResult};
pub use view::View;
