//! Value-trace notifications.
//!
//! Compute calls report analysis-relevant events to a `TraceCollection`
//! instead of mutating analysis state directly. Encoding lookups are the
//! canonical hazard: the codec registry is open, so a decode call can run
//! arbitrary code, and every fact about its operands must be dropped even
//! when the fold itself succeeds.

use vesper_ir::{ExprNode, FaultKind, Span};

/// Sink for facts the optimizer learns while computing a node.
pub trait TraceCollection {
    /// All knowledge about `node`'s value is no longer valid.
    fn remove_knowledge(&mut self, node: &ExprNode);

    /// Evaluation at `span` may run arbitrary code before returning.
    fn on_control_flow_escape(&mut self, span: Span);

    /// Evaluation may abort with a fault of the given kind.
    fn on_fault_exit(&mut self, kind: FaultKind);
}

/// A `TraceCollection` that records every notification. Used by tests and
/// by the optimization report.
#[derive(Debug, Default)]
pub struct CollectedTraces {
    /// Spans of nodes whose value knowledge was invalidated.
    pub invalidated: Vec<Span>,
    /// Spans where control flow may escape.
    pub escapes: Vec<Span>,
    /// Fault kinds that may abort evaluation.
    pub fault_exits: Vec<FaultKind>,
}

impl CollectedTraces {
    pub fn new() -> Self {
        CollectedTraces::default()
    }
}

impl TraceCollection for CollectedTraces {
    fn remove_knowledge(&mut self, node: &ExprNode) {
        self.invalidated.push(node.span());
    }

    fn on_control_flow_escape(&mut self, span: Span) {
        self.escapes.push(span);
    }

    fn on_fault_exit(&mut self, kind: FaultKind) {
        self.fault_exits.push(kind);
    }
}
