// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Expression nodes for template ASTs.
//!
//! The expression grammar of the template surface is deliberately small: the
//! compile passes only need to recognize a fixed set of node shapes, so
//! [`Expr`] is a closed enum with exhaustive matching rather than an open
//! trait hierarchy.
//!
//! Every node records the 1-indexed source line it came from, which is what
//! compile errors point at. Expression nodes also carry an optional
//! [`NodeId`] assigned per traversal; see [`crate::nodes::NodeId`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::nodes::traits::NodeId;

// ============================================================================
// Literal values
// ============================================================================

/// A literal constant value in a template expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// An integer literal, e.g. `10`.
    Int(i64),
    /// A float literal, e.g. `0.5`.
    Float(f64),
    /// A string literal, e.g. `"draft"` or `'draft'`.
    Str(String),
    /// A boolean literal, `true` or `false`.
    Bool(bool),
}

impl Value {
    /// The integer payload, if this is an [`Value::Int`].
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The string payload, if this is a [`Value::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "\"{s}\""),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

// ============================================================================
// Expression nodes
// ============================================================================

/// A named call expression with a positional argument list: `name(a, b)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    /// The function name.
    pub name: String,
    /// Positional arguments, in source order.
    pub args: Vec<Expr>,
    /// 1-indexed source line of the call.
    pub line: u32,
    /// Traversal identity; assigned by the walk driver.
    #[serde(skip)]
    pub node_id: Option<NodeId>,
}

impl Call {
    /// Create a new call node.
    pub fn new(name: impl Into<String>, args: Vec<Expr>, line: u32) -> Self {
        Self {
            name: name.into(),
            args,
            line,
            node_id: None,
        }
    }

    /// Replace the argument at `index`, appending when `index` is at or past
    /// the end of the list.
    pub fn set_arg(&mut self, index: usize, arg: Expr) {
        if index < self.args.len() {
            self.args[index] = arg;
        } else {
            self.args.push(arg);
        }
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ")")
    }
}

/// A filter application: `input|name` or `input|name(a, b)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// The expression being filtered.
    pub input: Box<Expr>,
    /// The filter name.
    pub name: String,
    /// Filter arguments (excluding the piped input).
    pub args: Vec<Expr>,
    /// 1-indexed source line of the filter name.
    pub line: u32,
    /// Traversal identity; assigned by the walk driver.
    #[serde(skip)]
    pub node_id: Option<NodeId>,
}

impl Filter {
    /// Create a new filter node.
    pub fn new(input: Expr, name: impl Into<String>, args: Vec<Expr>, line: u32) -> Self {
        Self {
            input: Box::new(input),
            name: name.into(),
            args,
            line,
            node_id: None,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.input, self.name)?;
        if self.args.is_empty() {
            return Ok(());
        }
        write!(f, "(")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ")")
    }
}

/// A literal constant expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Const {
    /// The literal value.
    pub value: Value,
    /// 1-indexed source line of the literal.
    pub line: u32,
    /// Traversal identity; assigned by the walk driver.
    #[serde(skip)]
    pub node_id: Option<NodeId>,
}

impl Const {
    /// Create a new constant node.
    pub fn new(value: impl Into<Value>, line: u32) -> Self {
        Self {
            value: value.into(),
            line,
            node_id: None,
        }
    }
}

impl fmt::Display for Const {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A free-standing name reference.
///
/// Names are not resolved at compile time; the runtime executing the
/// compiled template binds them. The pagination pass synthesizes several of
/// these (`__offset__`, `__pages__`, `__current_page__`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameRef {
    /// The referenced name.
    pub name: String,
    /// 1-indexed source line of the reference.
    pub line: u32,
    /// Traversal identity; assigned by the walk driver.
    #[serde(skip)]
    pub node_id: Option<NodeId>,
}

impl NameRef {
    /// Create a new name reference.
    pub fn new(name: impl Into<String>, line: u32) -> Self {
        Self {
            name: name.into(),
            line,
            node_id: None,
        }
    }
}

impl fmt::Display for NameRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A template expression.
///
/// The set of recognized shapes is fixed and known, so this is a closed
/// tagged enum; visitors match on it exhaustively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// A named call: `paginate(documents)`.
    Call(Call),
    /// A filter application: `documents|slice(0, 10)`.
    Filter(Filter),
    /// A literal constant.
    Const(Const),
    /// A free-standing name reference.
    NameRef(NameRef),
}

impl Expr {
    /// The 1-indexed source line of this expression.
    pub fn line(&self) -> u32 {
        match self {
            Expr::Call(call) => call.line,
            Expr::Filter(filter) => filter.line,
            Expr::Const(constant) => constant.line,
            Expr::NameRef(name) => name.line,
        }
    }

    /// The traversal identity of this expression, if assigned.
    pub fn node_id(&self) -> Option<NodeId> {
        match self {
            Expr::Call(call) => call.node_id,
            Expr::Filter(filter) => filter.node_id,
            Expr::Const(constant) => constant.node_id,
            Expr::NameRef(name) => name.node_id,
        }
    }

    /// Borrow this expression as a call node, if it is one.
    pub fn as_call(&self) -> Option<&Call> {
        match self {
            Expr::Call(call) => Some(call),
            _ => None,
        }
    }

    /// Find the call node with traversal identity `id` in this subtree.
    pub fn find_call_mut(&mut self, id: NodeId) -> Option<&mut Call> {
        match self {
            Expr::Call(call) => {
                if call.node_id == Some(id) {
                    Some(call)
                } else {
                    call.args.iter_mut().find_map(|arg| arg.find_call_mut(id))
                }
            }
            Expr::Filter(filter) => std::iter::once(filter.input.as_mut())
                .chain(filter.args.iter_mut())
                .find_map(|child| child.find_call_mut(id)),
            Expr::Const(_) | Expr::NameRef(_) => None,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Call(call) => fmt::Display::fmt(call, f),
            Expr::Filter(filter) => fmt::Display::fmt(filter, f),
            Expr::Const(constant) => fmt::Display::fmt(constant, f),
            Expr::NameRef(name) => fmt::Display::fmt(name, f),
        }
    }
}
