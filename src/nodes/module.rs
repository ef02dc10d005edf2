// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Module-level nodes for template ASTs.
//!
//! A [`Module`] is the top-level compiled template unit: a named body of
//! statements plus `extra`, a list of extension slots that compile passes
//! write and the rendering runtime reads. The pagination pass stores its
//! [`PaginationDirective`] in slot 0.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::nodes::expression::{Call, Expr};
use crate::nodes::traits::NodeId;

// ============================================================================
// Statements
// ============================================================================

/// Raw text emitted verbatim by the runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    /// The literal text content.
    pub content: String,
    /// 1-indexed source line where the text begins.
    pub line: u32,
}

impl Text {
    /// Create a new text node.
    pub fn new(content: impl Into<String>, line: u32) -> Self {
        Self {
            content: content.into(),
            line,
        }
    }
}

/// A `{{ ... }}` print statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Print {
    /// The expression whose value is printed.
    pub expr: Expr,
    /// 1-indexed source line of the opening delimiter.
    pub line: u32,
}

impl Print {
    /// Create a new print node.
    pub fn new(expr: Expr, line: u32) -> Self {
        Self { expr, line }
    }
}

/// A template body statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    /// Raw text.
    Text(Text),
    /// A `{{ ... }}` print block.
    Print(Print),
}

impl Stmt {
    /// The 1-indexed source line of this statement.
    pub fn line(&self) -> u32 {
        match self {
            Stmt::Text(text) => text.line,
            Stmt::Print(print) => print.line,
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Text(text) => f.write_str(&text.content),
            Stmt::Print(print) => write!(f, "{{{{ {} }}}}", print.expr),
        }
    }
}

// ============================================================================
// Extension slots
// ============================================================================

/// Extracted pagination intent, stored for the rendering runtime.
///
/// The runtime uses `source` to compute the total document count (and from
/// it the page count) and `page_size` to bind `__offset__` per page before
/// executing the compiled template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationDirective {
    /// The expression producing the collection being paginated.
    pub source: Expr,
    /// Number of documents per page; always positive.
    pub page_size: usize,
}

/// Metadata attached to a module by compile passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Extra {
    /// Pagination intent recorded by the pagination pass.
    Pagination(PaginationDirective),
}

// ============================================================================
// Module
// ============================================================================

/// The top-level compiled template unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// The template name, typically its site-relative path.
    pub name: String,
    /// Body statements, in source order.
    pub body: Vec<Stmt>,
    /// Extension slots written by compile passes.
    pub extra: Vec<Extra>,
}

impl Module {
    /// Create an empty module.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_body(name, Vec::new())
    }

    /// Create a module with the given body.
    pub fn with_body(name: impl Into<String>, body: Vec<Stmt>) -> Self {
        Self {
            name: name.into(),
            body,
            extra: Vec::new(),
        }
    }

    /// Replace the extension slot at `index`, appending when `index` is at
    /// or past the end of the list.
    pub fn set_extra(&mut self, index: usize, extra: Extra) {
        if index < self.extra.len() {
            self.extra[index] = extra;
        } else {
            self.extra.push(extra);
        }
    }

    /// The pagination directive recorded for this module, if any.
    pub fn pagination(&self) -> Option<&PaginationDirective> {
        self.extra.iter().find_map(|extra| match extra {
            Extra::Pagination(directive) => Some(directive),
        })
    }

    /// Find the call node with traversal identity `id` anywhere in the body.
    pub fn find_call_mut(&mut self, id: NodeId) -> Option<&mut Call> {
        self.body.iter_mut().find_map(|stmt| match stmt {
            Stmt::Print(print) => print.expr.find_call_mut(id),
            Stmt::Text(_) => None,
        })
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.body {
            fmt::Display::fmt(stmt, f)?;
        }
        Ok(())
    }
}
