// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Visitor infrastructure and compile passes for template ASTs.
//!
//! # Traversal Order
//!
//! - **Pre-order** for `enter_*` hooks (before children)
//! - **Post-order** for `leave_*` hooks (after children)
//! - Children are visited in source order (left-to-right)
//!
//! # Passes
//!
//! A pass implements [`NodeVisitor`] and is driven by [`traverse_module`],
//! or batched with other passes through [`run_passes`], which orders them by
//! [`NodeVisitor::priority`]. The only pass shipped today is [`Paginator`].

mod dispatch;
mod paginate;
mod traits;

pub use dispatch::{assign_node_ids, run_passes, traverse_module, walk_expr, walk_stmt};
pub use paginate::{
    Paginator, CURRENT_PAGE_NAME, DEFAULT_PAGE_SIZE, OFFSET_NAME, PAGES_NAME, PAGINATE_FUNCTION,
    PAGINATOR_PRIORITY, RENDER_DOCUMENTS_FUNCTION, SLICE_FILTER,
};
pub use traits::{NodeVisitor, VisitResult};
