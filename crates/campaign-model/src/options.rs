//! Configuration options for a mapping session.

use serde::{Deserialize, Serialize};

/// How a session treats column or field names it does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReferencePolicy {
    /// Accept any name; callers only offer valid options.
    #[default]
    Lenient,
    /// Reject unknown columns and fields.
    Strict,
}

/// Options controlling mapping session behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    pub reference_policy: ReferencePolicy,
}

impl SessionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that reject references to unknown columns or fields.
    pub fn strict() -> Self {
        Self {
            reference_policy: ReferencePolicy::Strict,
        }
    }

    pub fn with_reference_policy(mut self, policy: ReferencePolicy) -> Self {
        self.reference_policy = policy;
        self
    }
}
