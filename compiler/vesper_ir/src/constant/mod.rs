//! Constant expression nodes.
//!
//! A `ConstantNode` wraps a `ConstValue` together with its source span and a
//! flag recording whether the author wrote the literal or the optimizer
//! synthesized it. Nodes are immutable after construction; the optimizer
//! replaces them wholesale instead of mutating them.
//!
//! Construction dispatches once, in the `ConstValue` factories: the node
//! itself never re-inspects the payload shape. Synthesizing a node with an
//! oversized payload emits a diagnostic, which protects against
//! optimizer-induced data bloat; user-written literals are exempt.

use crate::expr::ExprNode;
use crate::span::Span;
use crate::value::{ConstKind, ConstValue};

/// A value fully known at compile time, as an expression node.
#[derive(Clone, Debug)]
pub struct ConstantNode {
    value: ConstValue,
    span: Span,
    user_provided: bool,
}

impl ConstantNode {
    /// Create a constant node. The single factory for all kinds: size
    /// diagnostics and payload canonicalization happen here and in the
    /// `ConstValue` factories, nowhere else.
    pub fn new(value: ConstValue, span: Span, user_provided: bool) -> Self {
        if !user_provided {
            if let Some((size, limit)) = value.sized_payload() {
                if size > limit {
                    tracing::warn!(
                        kind = %value.kind(),
                        size,
                        limit,
                        at = %span,
                        "synthesized constant exceeds size threshold"
                    );
                }
            }
        }
        ConstantNode {
            value,
            span,
            user_provided,
        }
    }

    /// Create a synthesized constant replacing an optimized-away expression.
    /// The span is taken from the node being replaced.
    #[inline]
    pub fn replacement(value: ConstValue, span: Span) -> Self {
        ConstantNode::new(value, span, false)
    }

    /// The wrapped value.
    #[inline]
    pub fn value(&self) -> &ConstValue {
        &self.value
    }

    /// Unwrap into the value.
    #[inline]
    pub fn into_value(self) -> ConstValue {
        self.value
    }

    /// The source span.
    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Whether the author wrote this literal (as opposed to the optimizer
    /// synthesizing it).
    #[inline]
    pub fn user_provided(&self) -> bool {
        self.user_provided
    }

    /// The kind tag.
    #[inline]
    pub fn kind(&self) -> ConstKind {
        self.value.kind()
    }

    /// Ordered details for diagnostics and snapshot tests. The no-payload
    /// singleton kinds report no details; the tag alone determines them.
    pub fn details(&self) -> Vec<(&'static str, String)> {
        match self.value {
            ConstValue::None | ConstValue::True | ConstValue::False | ConstValue::Ellipsis => {
                Vec::new()
            }
            _ => vec![
                ("value", self.value.repr()),
                ("user_provided", self.user_provided.to_string()),
            ],
        }
    }
}

// Pure query predicates. All O(1) or O(payload size), no side effects.

impl ConstantNode {
    /// Truth value; known for every constant.
    pub fn truth_value(&self) -> bool {
        self.value.truth_value()
    }

    pub fn is_bool(&self) -> bool {
        self.value.is_bool()
    }

    pub fn is_number(&self) -> bool {
        self.value.is_number()
    }

    pub fn is_mapping(&self) -> bool {
        self.value.is_mapping()
    }

    pub fn is_text(&self) -> bool {
        self.value.is_text()
    }

    pub fn is_byte_string(&self) -> bool {
        self.value.is_byte_string()
    }

    pub fn is_mutable(&self) -> bool {
        self.value.is_mutable()
    }

    pub fn is_hashable(&self) -> bool {
        self.value.is_hashable()
    }

    /// Whether the value can be used where an index is needed: `none` or a
    /// number.
    pub fn is_indexable(&self) -> bool {
        matches!(self.value, ConstValue::None) || self.value.is_number()
    }

    /// Whether iteration is known to succeed, optionally with an exact
    /// element count.
    pub fn is_known_iterable(&self, count: Option<usize>) -> bool {
        match self.value.iteration_length() {
            Some(length) => count.is_none_or(|expected| length == expected),
            None => false,
        }
    }

    /// Number of iteration elements, if iterable.
    pub fn known_iteration_length(&self) -> Option<usize> {
        self.value.iteration_length()
    }

    /// Whether every iteration element can be predicted.
    pub fn can_predict_iteration_values(&self) -> bool {
        self.is_known_iterable(None)
    }
}

// Derived node accessors

impl ConstantNode {
    /// The `index`-th iteration element as a new node.
    ///
    /// # Panics
    ///
    /// Panics when the value is not iterable or `index` is out of range;
    /// callers check `known_iteration_length` first. This is an internal
    /// contract fault, never a user-facing error.
    pub fn iteration_value(&self, index: usize) -> ConstantNode {
        match self.value.iteration_element(index) {
            Some(element) => ConstantNode::new(element, self.span, false),
            None => panic!(
                "iteration index {index} out of range for '{}' constant",
                self.value.kind()
            ),
        }
    }

    /// All iteration elements as nodes, in order, if iterable.
    pub fn iteration_values(&self) -> Option<Vec<ConstantNode>> {
        let elements = self.value.iteration_elements()?;
        Some(
            elements
                .into_iter()
                .map(|element| ConstantNode::new(element, self.span, self.user_provided))
                .collect(),
        )
    }

    /// A node holding the value's textual representation, or `None` when the
    /// value has none under the target encoding.
    pub fn text_form(&self) -> Option<ConstantNode> {
        if self.value.is_text() {
            return Some(self.clone());
        }
        let text = self.value.text_repr()?;
        Some(ConstantNode::new(
            ConstValue::str(text),
            self.span,
            self.user_provided,
        ))
    }

    /// The value as an integer, if it is a number.
    pub fn integer_value(&self) -> Option<i128> {
        self.value.integer_value()
    }

    /// The text payload, if this is a text constant.
    pub fn text_value(&self) -> Option<&str> {
        self.value.text_value()
    }

    /// Ordered key/value node pairs of a mapping constant.
    ///
    /// # Panics
    ///
    /// Panics when the value is not a mapping (internal contract fault).
    pub fn mapping_pairs(&self) -> Vec<(ConstantNode, ConstantNode)> {
        match &self.value {
            ConstValue::Map(pairs) => pairs
                .iter()
                .map(|(key, value)| {
                    (
                        ConstantNode::new(key.clone(), self.span, false),
                        ConstantNode::new(value.clone(), self.span, false),
                    )
                })
                .collect(),
            other => panic!("mapping_pairs on '{}' constant", other.kind()),
        }
    }

    /// Ordered pairs of a mapping constant with the keys as raw strings, or
    /// `None` when some key is not a text string.
    ///
    /// # Panics
    ///
    /// Panics when the value is not a mapping (internal contract fault).
    pub fn mapping_string_key_pairs(&self) -> Option<Vec<(String, ConstantNode)>> {
        match &self.value {
            ConstValue::Map(pairs) => {
                let mut result = Vec::with_capacity(pairs.len());
                for (key, value) in pairs.iter() {
                    let key = key.text_value()?.to_string();
                    result.push((key, ConstantNode::new(value.clone(), self.span, false)));
                }
                Some(result)
            }
            other => panic!("mapping_string_key_pairs on '{}' constant", other.kind()),
        }
    }
}

// Side-effect discipline. Constants never carry effects, which is what lets
// the optimizer elide unused constant subtrees.

impl ConstantNode {
    pub fn has_side_effects(&self) -> bool {
        false
    }

    pub fn extract_side_effects(self) -> Vec<ExprNode> {
        Vec::new()
    }
}

/// Node equality is value equality: spans and the `user_provided` flag do
/// not participate, so independently constructed singletons compare equal.
impl PartialEq for ConstantNode {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for ConstantNode {}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
