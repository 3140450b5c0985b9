//! Compute outcomes.
//!
//! Every compute call consumes a node and returns `Computed`: the node to
//! put back into the parent slot (possibly the same one), a tag describing
//! what happened, and a rationale for the optimization report. The driver
//! uses the tag to decide whether another pass is worthwhile.

use vesper_ir::ExprNode;

/// What a compute call did to the node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChangeTag {
    /// The node was returned as-is.
    NoChange,
    /// The node was replaced by a compile-time constant (possibly behind a
    /// side-effects wrapper).
    NewConstant,
    /// The node was replaced by a different, simpler expression.
    NewExpression,
    /// The node was replaced by an unconditional raise.
    NewRaise,
}

/// Result of computing a node.
#[derive(Debug)]
pub struct Computed {
    /// The node that now occupies the parent slot.
    pub node: ExprNode,
    pub tag: ChangeTag,
    /// Human-readable reason for the change, absent for `NoChange`.
    pub rationale: Option<String>,
}

impl Computed {
    #[inline]
    pub fn unchanged(node: ExprNode) -> Self {
        Computed {
            node,
            tag: ChangeTag::NoChange,
            rationale: None,
        }
    }

    #[inline]
    pub fn new_constant(node: ExprNode, rationale: impl Into<String>) -> Self {
        Computed {
            node,
            tag: ChangeTag::NewConstant,
            rationale: Some(rationale.into()),
        }
    }

    #[inline]
    pub fn new_expression(node: ExprNode, rationale: impl Into<String>) -> Self {
        Computed {
            node,
            tag: ChangeTag::NewExpression,
            rationale: Some(rationale.into()),
        }
    }

    #[inline]
    pub fn new_raise(node: ExprNode, rationale: impl Into<String>) -> Self {
        Computed {
            node,
            tag: ChangeTag::NewRaise,
            rationale: Some(rationale.into()),
        }
    }

    /// Whether the node was replaced.
    #[inline]
    pub fn changed(&self) -> bool {
        self.tag != ChangeTag::NoChange
    }
}
