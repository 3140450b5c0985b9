//! Anticipated target-runtime faults.
//!
//! These are the faults a built-in constructor call can raise when the
//! compiled program runs. A fold attempt that hits one is not an error in the
//! compiler: the outcome is captured as a deferred-raise node that performs
//! exactly the same fault at the same program point. Internal contract
//! violations are a separate class entirely and use assertions.

use std::fmt;

use crate::value::ConstValue;

/// Kind of a target-runtime fault.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FaultKind {
    /// Wrong value type, e.g. iterating a number.
    Type,
    /// Right type, invalid content, e.g. a malformed numeric literal.
    Value,
    /// Numeric conversion out of range.
    Overflow,
    /// Byte payload not decodable under the requested encoding.
    Decode,
    /// Value not representable as text under the target encoding.
    Encode,
}

impl FaultKind {
    /// The fault name as it appears in the target runtime.
    pub const fn name(self) -> &'static str {
        match self {
            FaultKind::Type => "TypeError",
            FaultKind::Value => "ValueError",
            FaultKind::Overflow => "OverflowError",
            FaultKind::Decode => "DecodeError",
            FaultKind::Encode => "EncodeError",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A fault captured while attempting a compile-time fold.
#[derive(Clone, PartialEq, Eq, Hash, Debug, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FoldFault {
    pub kind: FaultKind,
    pub message: String,
}

impl FoldFault {
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        FoldFault {
            kind,
            message: message.into(),
        }
    }

    /// A `TypeError` fault.
    pub fn type_fault(message: impl Into<String>) -> Self {
        FoldFault::new(FaultKind::Type, message)
    }

    /// A `ValueError` fault.
    pub fn value_fault(message: impl Into<String>) -> Self {
        FoldFault::new(FaultKind::Value, message)
    }

    /// The `TypeError` raised when a value of the given type is iterated.
    pub fn not_iterable(value: &ConstValue) -> Self {
        FoldFault::type_fault(format!("'{}' object is not iterable", value.type_name()))
    }
}

/// Outcome of attempting to evaluate a constructor natively.
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum FoldError {
    /// The call faults at runtime; reify as a deferred raise.
    #[error(transparent)]
    Fault(#[from] FoldFault),
    /// The call cannot be evaluated at compile time; leave the node alone.
    #[error("not computable at compile time")]
    Unsupported,
}

/// Result of a native constructor evaluation.
pub type FoldResult = Result<ConstValue, FoldError>;
