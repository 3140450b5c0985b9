//! Per-kind fold specifications.
//!
//! One table maps each builtin constructor kind to its compile-time
//! evaluator. The compute layer owns everything node-shaped; the spec owns
//! everything value-shaped.

use vesper_ir::{BuiltinKind, ConstValue, FoldResult};

use crate::eval;

/// How a builtin constructor folds over constant operands.
#[derive(Copy, Clone)]
pub struct BuiltinSpec {
    pub name: &'static str,
    pub eval: fn(&[ConstValue]) -> FoldResult,
}

/// The fold specification for a constructor kind.
pub const fn spec_for(kind: BuiltinKind) -> BuiltinSpec {
    let eval: fn(&[ConstValue]) -> FoldResult = match kind {
        BuiltinKind::Tuple => eval::eval_tuple,
        BuiltinKind::List => eval::eval_list,
        BuiltinKind::Set => eval::eval_set,
        BuiltinKind::Float => eval::eval_float,
        BuiltinKind::Bool => eval::eval_bool,
        BuiltinKind::Int => eval::eval_int,
        BuiltinKind::BigInt => eval::eval_big_int,
        BuiltinKind::Text => eval::eval_text,
        BuiltinKind::Decode => eval::eval_decode,
        BuiltinKind::ByteBuffer => eval::eval_byte_buffer,
        BuiltinKind::Complex => eval::eval_complex,
    };
    BuiltinSpec {
        name: kind.name(),
        eval,
    }
}
