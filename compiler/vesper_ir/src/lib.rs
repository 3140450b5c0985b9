//! Vesper IR - Constant Expression Representation
//!
//! This crate contains the value and node types the Vesper optimizer folds
//! over:
//! - `ConstValue`, the compile-time value model with one variant per kind
//! - `ConstantNode`, a known value as an expression node
//! - `BuiltinCallNode`, builtin type-constructor calls with named slots
//! - `ExprNode`, the owning expression tree the optimizer rewrites
//! - `FoldFault` and `FoldError`, the outcomes of compile-time evaluation
//!
//! # Design Philosophy
//!
//! - **One factory per shape**: payload canonicalization (set dedup, map
//!   key dedup, the shared empty-map payload) happens in `ConstValue`
//!   factories, never at use sites
//! - **Exclusive ownership**: every child node is owned by exactly one
//!   parent slot, so replacement is a move, not a graph edit
//! - **Bitwise float semantics**: equality and hashing treat floats by
//!   their bit pattern, so NaN payloads and signed zeros stay distinct
//!   where it matters

mod builtin_call;
mod constant;
mod expr;
mod fault;
mod heap;
mod span;
mod value;

pub use builtin_call::{BuiltinCallNode, BuiltinKind};
pub use constant::ConstantNode;
pub use expr::{
    make_raise_replacement, wrap_with_side_effects, ExprNode, OpaqueNode, RaiseNode,
    SideEffectsNode,
};
pub use fault::{FaultKind, FoldError, FoldFault, FoldResult};
pub use heap::Heap;
pub use span::Span;
pub use value::{ConstKind, ConstValue, SliceValue};
