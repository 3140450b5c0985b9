//! Vesper Optimizer - Constant Folding
//!
//! This crate implements the compute protocol over `vesper_ir` expression
//! trees:
//! - `compute_expr` and the per-kind builtin constructor overlays
//! - `eval`, the native semantics of each constructor over constant
//!   operands
//! - `TraceCollection`, the sink for knowledge invalidation, control-flow
//!   escapes and fault exits
//! - `TargetCaps`, runtime capability flags resolved once at startup
//!
//! The protocol is single-step: each call makes the one best local
//! decision and reports it through `ChangeTag`. Running passes to a fixed
//! point is the driver's job, not this crate's.

mod builtin_spec;
mod caps;
mod change;
mod compute;
pub mod eval;
mod traces;

pub use builtin_spec::{spec_for, BuiltinSpec};
pub use caps::TargetCaps;
pub use change::{ChangeTag, Computed};
pub use compute::{
    compile_time_computation_result, compute_builtin_call, compute_constant_call, compute_expr,
    compute_iter1,
};
pub use traces::{CollectedTraces, TraceCollection};
