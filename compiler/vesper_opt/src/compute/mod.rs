//! The compute protocol.
//!
//! Compute calls consume a node, decide whether a better node exists, and
//! return the occupant of the parent slot together with a change tag.
//! Replacements preserve the side effects of replaced operands and report
//! fault exits to the trace collection, so control-flow knowledge stays
//! sound across rewrites.

use vesper_ir::{
    make_raise_replacement, wrap_with_side_effects, BuiltinCallNode, BuiltinKind, ConstValue,
    ConstantNode, ExprNode, FaultKind, FoldError, FoldFault, FoldResult, Span,
};

use crate::builtin_spec::spec_for;
use crate::caps::TargetCaps;
use crate::change::Computed;
use crate::traces::TraceCollection;

/// Compute a node. Constants, raises and unmodeled expressions are already
/// in normal form and report no change.
pub fn compute_expr(
    node: ExprNode,
    traces: &mut dyn TraceCollection,
    caps: &TargetCaps,
) -> Computed {
    match node {
        ExprNode::BuiltinCall(call) => compute_builtin_call(call, traces, caps),
        other => Computed::unchanged(other),
    }
}

/// Compute a builtin constructor call, applying the per-kind overlay
/// before the generic constant fold.
pub fn compute_builtin_call(
    call: BuiltinCallNode,
    traces: &mut dyn TraceCollection,
    caps: &TargetCaps,
) -> Computed {
    match call.kind() {
        // Mutable result; never folds.
        BuiltinKind::ByteBuffer => Computed::unchanged(ExprNode::BuiltinCall(call)),
        BuiltinKind::Bool => compute_bool_call(call, traces),
        BuiltinKind::Int | BuiltinKind::BigInt => compute_int_call(call, traces, caps),
        BuiltinKind::Decode => compute_decode_call(call, traces),
        BuiltinKind::Text => compute_text_call(call, traces),
        BuiltinKind::Tuple
        | BuiltinKind::List
        | BuiltinKind::Set
        | BuiltinKind::Float
        | BuiltinKind::Complex => fold_constant_operands(call, traces),
    }
}

/// Truth oracle: any operand whose truth value is known folds without
/// the generic evaluation, with the operand kept for its effects.
fn compute_bool_call(mut call: BuiltinCallNode, traces: &mut dyn TraceCollection) -> Computed {
    let predicted = call.slot("value").and_then(ExprNode::truth_value);
    if let Some(truth) = predicted {
        let span = call.span();
        let operands = call.take_operands();
        let replacement =
            wrap_with_side_effects(ExprNode::constant(ConstValue::from_bool(truth), span), operands);
        return Computed::new_constant(replacement, "predicted truth value of bool argument");
    }
    fold_constant_operands(call, traces)
}

/// The base-only form folds only on runtimes that accept it, against the
/// zero text the runtime would substitute.
fn compute_int_call(
    mut call: BuiltinCallNode,
    traces: &mut dyn TraceCollection,
    caps: &TargetCaps,
) -> Computed {
    if call.slot("value").is_none() && call.slot("base").is_some() {
        if !caps.base_only_int {
            return Computed::unchanged(ExprNode::BuiltinCall(call));
        }
        call.replace_slot("value", ExprNode::constant(ConstValue::str("0"), call.span()));
    }
    fold_constant_operands(call, traces)
}

/// Codec lookups go through an open registry, so a decode call is an
/// escape hazard whether or not the fold succeeds: operand knowledge is
/// invalidated and the escape is reported before any folding.
fn compute_decode_call(call: BuiltinCallNode, traces: &mut dyn TraceCollection) -> Computed {
    for operand in call.present_operands() {
        traces.remove_knowledge(operand);
    }
    traces.on_control_flow_escape(call.span());
    if call.slot("value").is_none()
        || (call.slot("encoding").is_none() && call.slot("errors").is_some())
    {
        return Computed::unchanged(ExprNode::BuiltinCall(call));
    }
    fold_constant_operands(call, traces)
}

/// Generic fold first; when it declines, a cheaper text-form oracle may
/// still apply: text of a known text value is the operand itself, kept
/// with its provenance and effects.
fn compute_text_call(call: BuiltinCallNode, traces: &mut dyn TraceCollection) -> Computed {
    let computed = fold_constant_operands(call, traces);
    if computed.changed() {
        return computed;
    }
    let mut call = match computed.node {
        ExprNode::BuiltinCall(call) => call,
        other => return Computed::unchanged(other),
    };
    if call.slot("value").is_some_and(has_known_text_value) {
        if let Some(operand) = call.take_operands().pop() {
            return Computed::new_expression(operand, "predicted text form of text argument");
        }
    }
    Computed::unchanged(ExprNode::BuiltinCall(call))
}

/// Whether a node's value is known to already be text, looking through
/// side-effect wrappers the same way `truth_value` does.
fn has_known_text_value(node: &ExprNode) -> bool {
    match node {
        ExprNode::Constant(constant) => constant.is_text(),
        ExprNode::SideEffects(wrapper) => has_known_text_value(&wrapper.expression),
        _ => false,
    }
}

/// Generic fold: when every present operand is constant, run the kind's
/// evaluator and classify the outcome.
fn fold_constant_operands(call: BuiltinCallNode, traces: &mut dyn TraceCollection) -> Computed {
    if !call.all_operands_constant() {
        return Computed::unchanged(ExprNode::BuiltinCall(call));
    }
    let spec = spec_for(call.kind());
    let args: Vec<ConstValue> = call
        .present_operands()
        .into_iter()
        .filter_map(|operand| operand.as_constant().map(|c| c.value().clone()))
        .collect();
    let rationale = format!("call to '{}' computed at compile time", spec.name);
    compile_time_computation_result(traces, call, move || (spec.eval)(&args), &rationale)
}

/// Classify a fold outcome into the replacement node and change tag.
///
/// A value becomes a constant replacement, a fault becomes a deferred
/// raise, and an unsupported computation leaves the call in place. Either
/// replacement keeps the operands' side effects in evaluation order.
pub fn compile_time_computation_result(
    traces: &mut dyn TraceCollection,
    mut call: BuiltinCallNode,
    computation: impl FnOnce() -> FoldResult,
    rationale: &str,
) -> Computed {
    match computation() {
        Ok(value) => {
            let span = call.span();
            let operands = call.take_operands();
            let node = wrap_with_side_effects(ExprNode::constant(value, span), operands);
            tracing::debug!(%span, rationale, "folded builtin call");
            Computed::new_constant(node, rationale)
        }
        Err(FoldError::Fault(fault)) => {
            traces.on_fault_exit(fault.kind);
            let span = call.span();
            let kind = call.kind();
            let operands = call.take_operands();
            let node = wrap_with_side_effects(make_raise_replacement(&fault, span), operands);
            tracing::debug!(%span, %fault, "builtin call raises at compile time");
            Computed::new_raise(
                node,
                format!(
                    "call to '{kind}' raises '{}' at compile time",
                    fault.kind.name()
                ),
            )
        }
        Err(FoldError::Unsupported) => Computed::unchanged(ExprNode::BuiltinCall(call)),
    }
}

/// Rewrite single-step iteration over an unordered constant to iteration
/// over an equivalent tuple, and flag iteration over non-iterables as a
/// possible fault exit.
pub fn compute_iter1(node: ExprNode, traces: &mut dyn TraceCollection) -> Computed {
    let ExprNode::Constant(constant) = node else {
        return Computed::unchanged(node);
    };
    match constant.value() {
        ConstValue::List(_) | ConstValue::Set(_) | ConstValue::Map(_) => {
            let kind = constant.kind();
            let elements = constant.value().iteration_elements().unwrap_or_default();
            let replacement = ConstantNode::new(
                ConstValue::tuple(elements),
                constant.span(),
                constant.user_provided(),
            );
            Computed::new_constant(
                ExprNode::Constant(replacement),
                format!("iteration over constant {kind} value changed to tuple"),
            )
        }
        value if !value.is_iterable() => {
            traces.on_fault_exit(FaultKind::Type);
            Computed::unchanged(ExprNode::Constant(constant))
        }
        _ => Computed::unchanged(ExprNode::Constant(constant)),
    }
}

/// Calling a constant value always raises; the call becomes a deferred
/// raise carrying the argument side effects.
pub fn compute_constant_call(
    callee: &ConstantNode,
    arguments: Vec<ExprNode>,
    span: Span,
    traces: &mut dyn TraceCollection,
) -> Computed {
    let fault = FoldFault::type_fault(format!(
        "'{}' object is not callable",
        callee.value().type_name()
    ));
    traces.on_fault_exit(fault.kind);
    let rationale = format!("call to constant {} value always raises", callee.kind());
    let node = wrap_with_side_effects(make_raise_replacement(&fault, span), arguments);
    Computed::new_raise(node, rationale)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
