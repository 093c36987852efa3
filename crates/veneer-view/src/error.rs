/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for view loading and rendering.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or rendering a view.
#[derive(Debug, Error)]
pub enum ViewError {
    /// A template file could not be found at its resolved path.
    ///
    /// Raised by any file load (top-level, extends layout, or include) and
    /// aborts the entire render with no partial output.
    #[error("template not found: {}", .path.display())]
    TemplateNotFound { path: PathBuf },

    /// An `@if` condition is not a valid expression under the restricted
    /// evaluator.
    #[error("invalid condition `{expr}`: {message}")]
    MalformedExpression { expr: String, message: String },

    /// Template file I/O error other than not-found.
    #[error("failed to read template: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for view operations.
pub type ViewResult<T> = Result<T, ViewError>;
