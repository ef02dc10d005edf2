// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Walk functions for template AST traversal.
//!
//! The traversal calls visitor hooks in pre-order (`enter_*` before
//! descending into children) and post-order (`leave_*` after all children),
//! with children visited in source order.
//!
//! # Node identity
//!
//! [`traverse_module`] starts by (re)assigning pre-order
//! [`NodeId`](crate::nodes::NodeId)s to all expression nodes. Ids are deterministic for a given tree shape and are
//! how a pass refers to a node after the walk has moved past it; nodes a
//! pass synthesizes mid-walk stay unnumbered until the next traversal.

use crate::error::CompileResult;
use crate::nodes::{Expr, Module, NodeIdGenerator, Stmt};

use super::traits::{NodeVisitor, VisitResult};

/// Assign fresh pre-order [`NodeId`](crate::nodes::NodeId)s to every
/// expression in `module`.
///
/// Parents are numbered before children, siblings left to right. Any ids
/// from an earlier traversal are overwritten.
pub fn assign_node_ids(module: &mut Module) {
    let mut generator = NodeIdGenerator::new();
    for stmt in &mut module.body {
        if let Stmt::Print(print) = stmt {
            number_expr(&mut print.expr, &mut generator);
        }
    }
}

fn number_expr(expr: &mut Expr, generator: &mut NodeIdGenerator) {
    let id = Some(generator.next_id());
    match expr {
        Expr::Call(call) => {
            call.node_id = id;
            for arg in &mut call.args {
                number_expr(arg, generator);
            }
        }
        Expr::Filter(filter) => {
            filter.node_id = id;
            number_expr(&mut filter.input, generator);
            for arg in &mut filter.args {
                number_expr(arg, generator);
            }
        }
        Expr::Const(constant) => constant.node_id = id,
        Expr::NameRef(name) => name.node_id = id,
    }
}

/// Traverse `module` with `visitor`.
///
/// Order: assign node ids, `enter_module`, each body statement via
/// [`walk_stmt`], `leave_module`. The first hook error aborts the walk.
pub fn traverse_module<V: NodeVisitor + ?Sized>(
    visitor: &mut V,
    module: &mut Module,
) -> CompileResult<()> {
    assign_node_ids(module);
    visitor.enter_module(module)?;
    for stmt in &mut module.body {
        walk_stmt(visitor, stmt)?;
    }
    visitor.leave_module(module)
}

/// Walk a [`Stmt`] and its expressions.
pub fn walk_stmt<V: NodeVisitor + ?Sized>(visitor: &mut V, stmt: &mut Stmt) -> CompileResult<()> {
    if visitor.enter_stmt(stmt)? == VisitResult::Continue {
        if let Stmt::Print(print) = stmt {
            walk_expr(visitor, &mut print.expr)?;
        }
    }
    visitor.leave_stmt(stmt)
}

/// Walk an [`Expr`] and its children.
///
/// When `enter_expr` returns [`VisitResult::SkipChildren`] — which a hook
/// that replaced the node must do — children are not visited, but
/// `leave_expr` still fires for the node now in place.
pub fn walk_expr<V: NodeVisitor + ?Sized>(visitor: &mut V, expr: &mut Expr) -> CompileResult<()> {
    if visitor.enter_expr(expr)? == VisitResult::Continue {
        match expr {
            Expr::Call(call) => {
                for arg in &mut call.args {
                    walk_expr(visitor, arg)?;
                }
            }
            Expr::Filter(filter) => {
                walk_expr(visitor, &mut filter.input)?;
                for arg in &mut filter.args {
                    walk_expr(visitor, arg)?;
                }
            }
            Expr::Const(_) | Expr::NameRef(_) => {}
        }
    }
    visitor.leave_expr(expr)
}

/// Run a set of compile passes over `module`, ordered by priority.
///
/// The sort is stable: passes with equal priority run in registration
/// order. Each pass gets one full traversal.
pub fn run_passes(module: &mut Module, passes: &mut [&mut dyn NodeVisitor]) -> CompileResult<()> {
    passes.sort_by_key(|pass| pass.priority());
    for pass in passes.iter_mut() {
        traverse_module(&mut **pass, module)?;
    }
    Ok(())
}
