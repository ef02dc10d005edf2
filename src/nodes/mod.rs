// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! AST node types for compiled templates.
//!
//! The node set is closed: the compile passes recognize a fixed, known set
//! of shapes (module root, call expression, filter application, literal
//! constant, free-standing name reference), so nodes are plain structs
//! wrapped in exhaustively-matched enums.

mod expression;
mod module;
mod traits;

pub use expression::{Call, Const, Expr, Filter, NameRef, Value};
pub use module::{Extra, Module, PaginationDirective, Print, Stmt, Text};
pub use traits::{NodeId, NodeIdGenerator};
