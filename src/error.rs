// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Error types for template compilation.
//!
//! Every error here is fatal for the template being compiled: there are no
//! retries and no partial recovery. A malformed `paginate` argument never
//! falls back to the configured default page size; only the *absence* of the
//! argument does.

use thiserror::Error;

/// Convenience alias for results produced while compiling a template.
pub type CompileResult<T> = std::result::Result<T, CompileError>;

/// Errors raised while parsing or rewriting a template.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompileError {
    /// The template source was rejected by the grammar.
    #[error("parse error in template \"{template}\": {source}")]
    Parse {
        /// Name of the template being parsed.
        template: String,
        /// The underlying grammar error, with line/column and expected set.
        source: peg::error::ParseError<peg::str::LineCol>,
    },

    /// `paginate` was called with no arguments.
    #[error("missing first argument of \"paginate\" function at line {line}")]
    MissingArgument {
        /// Line of the offending call.
        line: u32,
    },

    /// The second argument to `paginate` was present but not a positive
    /// integer literal.
    #[error("second argument of \"paginate\" function must be a positive integer literal at line {line}")]
    InvalidArgumentType {
        /// Line of the offending argument.
        line: u32,
    },

    /// `paginate` was reached while no template module was being traversed.
    ///
    /// This can only happen when an expression walk is driven directly,
    /// outside of [`traverse_module`](crate::visitor::traverse_module).
    #[error("\"paginate\" function used outside of a template at line {line}")]
    PaginateOutsideTemplate {
        /// Line of the offending call.
        line: u32,
    },
}

impl CompileError {
    /// The 1-indexed source line the error points at.
    pub fn line(&self) -> u32 {
        match self {
            CompileError::Parse { source, .. } => source.location.line as u32,
            CompileError::MissingArgument { line }
            | CompileError::InvalidArgumentType { line }
            | CompileError::PaginateOutsideTemplate { line } => *line,
        }
    }
}
