// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Pagination rewrite pass.
//!
//! [`Paginator`] turns the `paginate(source, page_size?)` authoring shorthand
//! into the runtime form of pagination:
//!
//! - the call itself becomes `source|slice(__offset__, page_size)`, with
//!   `__offset__` bound by the runtime to the current page's start index;
//! - a [`PaginationDirective`] (source expression + page size) is recorded in
//!   the module's extension slot 0, which is how the runtime learns it must
//!   compute page counts and render the template once per page;
//! - if a `render_documents(...)` call was seen in the same module, its
//!   argument slots 1 and 2 are rewritten to the `__pages__` and
//!   `__current_page__` placeholders, also bound by the runtime.
//!
//! ```text
//! {{ render_documents(paginate(documents, 10)) }}
//!     becomes
//! {{ render_documents(documents|slice(__offset__, 10), __pages__, __current_page__) }}
//! ```
//!
//! When several `render_documents` calls precede the `paginate` call, the
//! most recently seen one is wired up. The tracked call survives until the
//! module walk ends or a `paginate` consumes it, so both the
//! textually-preceding-sibling shape and the nested-argument shape above
//! work.
//!
//! The rewrite is single-use per call site: once substituted, the node is a
//! `slice` filter and no longer matches `paginate`, so re-running the pass
//! over an already-rewritten tree is a no-op.

use tracing::{debug, trace};

use crate::error::{CompileError, CompileResult};
use crate::nodes::{
    Call, Const, Expr, Extra, Filter, Module, NameRef, NodeId, PaginationDirective, Value,
};

use super::traits::{NodeVisitor, VisitResult};

/// Function name recognized as the pagination shorthand.
pub const PAGINATE_FUNCTION: &str = "paginate";

/// Function name whose arguments receive the pagination placeholders.
pub const RENDER_DOCUMENTS_FUNCTION: &str = "render_documents";

/// Filter the shorthand is rewritten into.
pub const SLICE_FILTER: &str = "slice";

/// Placeholder bound by the runtime to the current page's start index.
pub const OFFSET_NAME: &str = "__offset__";

/// Placeholder bound by the runtime to the list of page descriptors.
pub const PAGES_NAME: &str = "__pages__";

/// Placeholder bound by the runtime to the page being rendered.
pub const CURRENT_PAGE_NAME: &str = "__current_page__";

/// Documents per page when `paginate` is called without a page size and the
/// pass was built with [`Paginator::new`].
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Traversal priority of [`Paginator`]; lower runs earlier.
pub const PAGINATOR_PRIORITY: i32 = 0;

/// Per-module traversal state.
///
/// Created on `enter_module` and consumed on `leave_module`, so one
/// [`Paginator`] instance can compile independent templates sequentially
/// without leaking state between them.
#[derive(Debug, Default)]
struct ScopeState {
    /// The most recent `render_documents` call seen in this module.
    pending_render: Option<NodeId>,
    /// Calls to receive the placeholder arguments when the walk ends.
    injections: Vec<NodeId>,
    /// Directive extracted from the last `paginate` call in this module.
    directive: Option<PaginationDirective>,
}

/// The pagination rewrite pass.
#[derive(Debug)]
pub struct Paginator {
    page_size: usize,
    scope: Option<ScopeState>,
}

impl Paginator {
    /// Create a paginator with the default page size of
    /// [`DEFAULT_PAGE_SIZE`].
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Create a paginator with a site-configured default page size.
    ///
    /// `page_size` must be positive; it is only used when a `paginate` call
    /// omits its second argument.
    pub fn with_page_size(page_size: usize) -> Self {
        debug_assert!(page_size > 0, "default page size must be positive");
        Self {
            page_size,
            scope: None,
        }
    }

    /// The configured default page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeVisitor for Paginator {
    fn priority(&self) -> i32 {
        PAGINATOR_PRIORITY
    }

    fn enter_module(&mut self, module: &mut Module) -> CompileResult<()> {
        trace!(template = %module.name, "entering template module");
        self.scope = Some(ScopeState::default());
        Ok(())
    }

    fn enter_expr(&mut self, expr: &mut Expr) -> CompileResult<VisitResult> {
        let Expr::Call(call) = expr else {
            return Ok(VisitResult::Continue);
        };

        if call.name == RENDER_DOCUMENTS_FUNCTION {
            if let Some(scope) = self.scope.as_mut() {
                scope.pending_render = call.node_id;
            }
            return Ok(VisitResult::Continue);
        }
        if call.name != PAGINATE_FUNCTION {
            return Ok(VisitResult::Continue);
        }

        let default_page_size = self.page_size;
        let scope = self
            .scope
            .as_mut()
            .ok_or(CompileError::PaginateOutsideTemplate { line: call.line })?;
        let (replacement, directive) = rewrite_paginate(call, default_page_size)?;
        if let Some(pending) = scope.pending_render.take() {
            scope.injections.push(pending);
        }
        debug!(
            page_size = directive.page_size,
            line = call.line,
            "rewrote \"paginate\" call into a slice filter"
        );
        scope.directive = Some(directive);
        *expr = replacement;
        Ok(VisitResult::SkipChildren)
    }

    fn leave_module(&mut self, module: &mut Module) -> CompileResult<()> {
        let Some(scope) = self.scope.take() else {
            return Ok(());
        };
        for id in scope.injections {
            let Some(call) = module.find_call_mut(id) else {
                continue;
            };
            let line = call.line;
            call.set_arg(1, Expr::NameRef(NameRef::new(PAGES_NAME, line)));
            call.set_arg(2, Expr::NameRef(NameRef::new(CURRENT_PAGE_NAME, line)));
            debug!(
                line,
                "wired pagination placeholders into \"render_documents\""
            );
        }
        if let Some(directive) = scope.directive {
            module.set_extra(0, Extra::Pagination(directive));
        }
        Ok(())
    }
}

/// Build the replacement expression and directive for a `paginate` call.
///
/// The source expression (argument 0) is required. An explicit page size
/// (argument 1) must be a positive integer literal; only its absence falls
/// back to `default_page_size`.
fn rewrite_paginate(
    call: &Call,
    default_page_size: usize,
) -> CompileResult<(Expr, PaginationDirective)> {
    let source = call
        .args
        .first()
        .cloned()
        .ok_or(CompileError::MissingArgument { line: call.line })?;

    let page_size = match call.args.get(1) {
        None => default_page_size,
        Some(Expr::Const(constant)) => match constant.value.as_int() {
            Some(n) if n > 0 => n as usize,
            _ => return Err(CompileError::InvalidArgumentType { line: constant.line }),
        },
        Some(other) => return Err(CompileError::InvalidArgumentType { line: other.line() }),
    };

    let directive = PaginationDirective {
        source: source.clone(),
        page_size,
    };
    let sliced = Expr::Filter(Filter::new(
        source,
        SLICE_FILTER,
        vec![
            Expr::NameRef(NameRef::new(OFFSET_NAME, call.line)),
            Expr::Const(Const::new(Value::Int(page_size as i64), call.line)),
        ],
        call.line,
    ));
    Ok((sliced, directive))
}
