//! Expression nodes.
//!
//! The optimizer works on a tree of `ExprNode` values with exclusive
//! parent-slot ownership: every child is owned by exactly one slot of its
//! parent, and replacement moves a new node into that slot. There is no
//! shared-graph aliasing, which is what makes consuming `self` in
//! `extract_side_effects` sound.

use crate::builtin_call::BuiltinCallNode;
use crate::constant::ConstantNode;
use crate::fault::{FaultKind, FoldFault};
use crate::span::Span;
use crate::value::ConstValue;

/// An expression in the optimizer's tree.
#[derive(Debug, PartialEq)]
pub enum ExprNode {
    /// A value fully known at compile time.
    Constant(ConstantNode),
    /// A call to a builtin type constructor.
    BuiltinCall(BuiltinCallNode),
    /// An expression that always raises when evaluated.
    Raise(RaiseNode),
    /// Side effects that must run before a wrapped expression's value is
    /// used.
    SideEffects(SideEffectsNode),
    /// An expression the optimizer does not model. Stands in for the rest
    /// of the language; only coarse facts about it are known.
    Opaque(OpaqueNode),
}

/// An expression that unconditionally raises a runtime fault.
#[derive(Debug, PartialEq, Eq)]
pub struct RaiseNode {
    pub fault: FaultKind,
    pub message: String,
    pub span: Span,
}

/// Effects preserved from replaced subexpressions, followed by the value
/// expression. Effects run in order before the expression.
#[derive(Debug, PartialEq)]
pub struct SideEffectsNode {
    pub side_effects: Vec<ExprNode>,
    pub expression: Box<ExprNode>,
    pub span: Span,
}

/// An unmodeled expression with coarse known facts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OpaqueNode {
    pub span: Span,
    pub side_effects: bool,
    pub truth_value: Option<bool>,
}

impl ExprNode {
    /// A synthesized constant expression.
    #[inline]
    pub fn constant(value: ConstValue, span: Span) -> Self {
        ExprNode::Constant(ConstantNode::replacement(value, span))
    }

    /// An unmodeled expression with side effects and unknown truth value.
    #[inline]
    pub fn opaque(span: Span) -> Self {
        ExprNode::Opaque(OpaqueNode {
            span,
            side_effects: true,
            truth_value: None,
        })
    }

    pub fn span(&self) -> Span {
        match self {
            ExprNode::Constant(node) => node.span(),
            ExprNode::BuiltinCall(node) => node.span(),
            ExprNode::Raise(node) => node.span,
            ExprNode::SideEffects(node) => node.span,
            ExprNode::Opaque(node) => node.span,
        }
    }

    /// The constant node, if this is one.
    pub fn as_constant(&self) -> Option<&ConstantNode> {
        match self {
            ExprNode::Constant(node) => Some(node),
            _ => None,
        }
    }

    pub fn is_compile_time_constant(&self) -> bool {
        matches!(self, ExprNode::Constant(_))
    }

    /// Truth value, when statically known. Known for constants, for
    /// unmodeled nodes that advertise one, and through side-effect
    /// wrappers.
    pub fn truth_value(&self) -> Option<bool> {
        match self {
            ExprNode::Constant(node) => Some(node.truth_value()),
            ExprNode::Opaque(node) => node.truth_value,
            ExprNode::SideEffects(node) => node.expression.truth_value(),
            ExprNode::BuiltinCall(_) | ExprNode::Raise(_) => None,
        }
    }

    /// Whether evaluating this node can do anything besides produce a
    /// value. Raising counts as an effect.
    pub fn has_side_effects(&self) -> bool {
        match self {
            ExprNode::Constant(_) => false,
            ExprNode::BuiltinCall(_) | ExprNode::Raise(_) | ExprNode::SideEffects(_) => true,
            ExprNode::Opaque(node) => node.side_effects,
        }
    }

    /// Consume the node, keeping only what must still run. The value
    /// itself is discarded; effect-free nodes dissolve to nothing.
    pub fn extract_side_effects(self) -> Vec<ExprNode> {
        match self {
            ExprNode::Constant(_) => Vec::new(),
            ExprNode::Opaque(node) => {
                if node.side_effects {
                    vec![ExprNode::Opaque(node)]
                } else {
                    Vec::new()
                }
            }
            ExprNode::SideEffects(node) => {
                let mut effects = node.side_effects;
                effects.extend(node.expression.extract_side_effects());
                effects
            }
            other @ (ExprNode::BuiltinCall(_) | ExprNode::Raise(_)) => vec![other],
        }
    }
}

/// Wrap `expression` so the side effects of the `replaced` nodes still run
/// first. When nothing in `replaced` has effects, `expression` is returned
/// unwrapped.
pub fn wrap_with_side_effects(expression: ExprNode, replaced: Vec<ExprNode>) -> ExprNode {
    let mut side_effects = Vec::new();
    for node in replaced {
        side_effects.extend(node.extract_side_effects());
    }
    if side_effects.is_empty() {
        return expression;
    }
    let span = expression.span();
    ExprNode::SideEffects(SideEffectsNode {
        side_effects,
        expression: Box::new(expression),
        span,
    })
}

/// An always-raising replacement for an expression whose fault is known at
/// compile time.
pub fn make_raise_replacement(fault: &FoldFault, span: Span) -> ExprNode {
    ExprNode::Raise(RaiseNode {
        fault: fault.kind,
        message: fault.message.clone(),
        span,
    })
}
