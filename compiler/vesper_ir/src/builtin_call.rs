//! Builtin type-constructor call nodes.
//!
//! One node shape covers every builtin constructor; the kind tag selects the
//! arity and the folding rule. Operands live in named slots so that an
//! omitted optional argument is distinguishable from a present one, which
//! matters for constructors like `int(base=16)` where omitting the value
//! changes the meaning of the call.

use smallvec::SmallVec;

use crate::expr::ExprNode;
use crate::span::Span;
use crate::value::ConstValue;

/// Builtin constructor kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinKind {
    Tuple,
    List,
    Set,
    Float,
    Bool,
    Int,
    BigInt,
    Text,
    Decode,
    ByteBuffer,
    Complex,
}

impl BuiltinKind {
    /// Source-level name of the constructor.
    pub const fn name(self) -> &'static str {
        match self {
            BuiltinKind::Tuple => "tuple",
            BuiltinKind::List => "list",
            BuiltinKind::Set => "set",
            BuiltinKind::Float => "float",
            BuiltinKind::Bool => "bool",
            BuiltinKind::Int => "int",
            BuiltinKind::BigInt => "bigint",
            BuiltinKind::Text => "text",
            BuiltinKind::Decode => "decode",
            BuiltinKind::ByteBuffer => "buffer",
            BuiltinKind::Complex => "complex",
        }
    }

    /// Ordered operand slot names. Every slot is optional at the call site.
    pub const fn slot_names(self) -> &'static [&'static str] {
        match self {
            BuiltinKind::Tuple
            | BuiltinKind::List
            | BuiltinKind::Set
            | BuiltinKind::Float
            | BuiltinKind::Bool
            | BuiltinKind::Text
            | BuiltinKind::ByteBuffer => &["value"],
            BuiltinKind::Int | BuiltinKind::BigInt => &["value", "base"],
            BuiltinKind::Decode => &["value", "encoding", "errors"],
            BuiltinKind::Complex => &["real", "imag"],
        }
    }
}

impl std::fmt::Display for BuiltinKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A call to a builtin type constructor, with operands in named slots.
#[derive(Debug, PartialEq)]
pub struct BuiltinCallNode {
    kind: BuiltinKind,
    slots: SmallVec<[Option<Box<ExprNode>>; 3]>,
    span: Span,
}

impl BuiltinCallNode {
    /// Create a builtin call node. Operands are given positionally against
    /// `kind.slot_names()`; trailing slots may be omitted.
    ///
    /// A `buffer()` call with no operand is normalized at construction to
    /// `buffer(b"")`, so downstream passes see a uniform shape.
    ///
    /// # Panics
    ///
    /// Panics when more operands are passed than the kind has slots
    /// (internal contract fault; the parser enforces arity).
    pub fn new(kind: BuiltinKind, operands: Vec<Option<ExprNode>>, span: Span) -> Self {
        let names = kind.slot_names();
        assert!(
            operands.len() <= names.len(),
            "'{kind}' takes at most {} operands, got {}",
            names.len(),
            operands.len()
        );
        let mut slots: SmallVec<[Option<Box<ExprNode>>; 3]> =
            std::iter::repeat_with(|| None).take(names.len()).collect();
        for (slot, operand) in slots.iter_mut().zip(operands) {
            *slot = operand.map(Box::new);
        }
        if kind == BuiltinKind::ByteBuffer && slots[0].is_none() {
            slots[0] = Some(Box::new(ExprNode::constant(
                ConstValue::bytes(Vec::new()),
                span,
            )));
        }
        BuiltinCallNode { kind, slots, span }
    }

    #[inline]
    pub fn kind(&self) -> BuiltinKind {
        self.kind
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    /// The operand in the named slot, if present.
    ///
    /// # Panics
    ///
    /// Panics when `name` is not a slot of this kind (internal contract
    /// fault).
    pub fn slot(&self, name: &str) -> Option<&ExprNode> {
        let index = self.slot_index(name);
        self.slots[index].as_deref()
    }

    /// Replace the operand in the named slot, returning the previous one.
    ///
    /// # Panics
    ///
    /// Panics when `name` is not a slot of this kind (internal contract
    /// fault).
    pub fn replace_slot(&mut self, name: &str, operand: ExprNode) -> Option<ExprNode> {
        let index = self.slot_index(name);
        self.slots[index]
            .replace(Box::new(operand))
            .map(|boxed| *boxed)
    }

    /// Present operands in slot order.
    pub fn present_operands(&self) -> Vec<&ExprNode> {
        self.slots
            .iter()
            .filter_map(|slot| slot.as_deref())
            .collect()
    }

    /// Whether every present operand is a compile-time constant.
    pub fn all_operands_constant(&self) -> bool {
        self.slots
            .iter()
            .flatten()
            .all(|operand| operand.is_compile_time_constant())
    }

    /// Take all present operands out of the node, in slot order, leaving
    /// the slots empty. Used when the node is being replaced and its
    /// operands' side effects must be preserved.
    pub fn take_operands(&mut self) -> Vec<ExprNode> {
        self.slots
            .iter_mut()
            .filter_map(|slot| slot.take().map(|boxed| *boxed))
            .collect()
    }

    fn slot_index(&self, name: &str) -> usize {
        let names = self.kind.slot_names();
        match names.iter().position(|&slot| slot == name) {
            Some(index) => index,
            None => panic!("'{}' has no slot named '{name}'", self.kind),
        }
    }
}
