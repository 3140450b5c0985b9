//! Target runtime capabilities.
//!
//! Capability flags vary by target-runtime version. They are resolved once
//! at startup and passed into the compute entry points as plain data, so a
//! single compiler build serves every target.

/// Capabilities of the hosting runtime that affect folding decisions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TargetCaps {
    /// Whether the runtime accepts an integer constructor call with a base
    /// but no value. When false, such calls are left for the runtime to
    /// reject.
    pub base_only_int: bool,
}

impl TargetCaps {
    pub const fn new(base_only_int: bool) -> Self {
        TargetCaps { base_only_int }
    }
}
