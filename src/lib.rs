// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Template AST, traversal, and compile-time rewrite passes for the Strata
//! static site generator.
//!
//! Templates are parsed into a small, closed AST ([`Module`], [`Stmt`],
//! [`Expr`]) and then rewritten by compile passes before the rendering
//! runtime executes them. Passes implement [`NodeVisitor`] and are driven by
//! [`traverse_module`] (or [`run_passes`] for a priority-ordered batch).
//!
//! The pass shipped today is [`Paginator`], which rewrites the
//! `paginate(source, page_size?)` authoring shorthand into a
//! `slice` filter bounded by page size, records a [`PaginationDirective`]
//! for the runtime, and wires the `__pages__` / `__current_page__`
//! placeholders into a `render_documents` call in the same template.
//!
//! # Example
//!
//! ```
//! use strata_templates::{parse_template, traverse_module, Paginator};
//!
//! let mut module = parse_template("posts.html", "{{ paginate(documents, 5) }}")?;
//! traverse_module(&mut Paginator::new(), &mut module)?;
//!
//! assert_eq!(module.to_string(), "{{ documents|slice(__offset__, 5) }}");
//! assert_eq!(module.pagination().map(|p| p.page_size), Some(5));
//! # Ok::<(), strata_templates::CompileError>(())
//! ```
//!
//! Rendering, page iteration, and document collection live elsewhere in
//! Strata; this crate stops at the rewritten AST and the recorded directive.

pub mod error;
pub mod nodes;
pub mod parser;
pub mod text;
pub mod visitor;

pub use error::{CompileError, CompileResult};
pub use nodes::{
    Call, Const, Expr, Extra, Filter, Module, NameRef, NodeId, PaginationDirective, Print, Stmt,
    Text, Value,
};
pub use parser::{parse_expression, parse_template};
pub use visitor::{run_passes, traverse_module, NodeVisitor, Paginator, VisitResult};
