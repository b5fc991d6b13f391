//! # Effects
//!
//! Whether a matching statement grants or refuses access.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Statement effect.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Effect {
    /// Grant access when the statement matches.
    Allow,

    /// Refuse access when the statement matches, overriding any allow.
    Deny,
}

impl Effect {
    /// Get the string representation of the effect.
    pub fn as_str(&self) -> &'static str {
        match self {
            Effect::Allow => "ALLOW",
            Effect::Deny => "DENY",
        }
    }

    /// Check whether this effect matches another (exact equality).
    pub fn matches(&self, other: &Effect) -> bool {
        self == other
    }

    /// Whether this is the allow effect.
    pub fn is_allow(&self) -> bool {
        matches!(self, Effect::Allow)
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_matches() {
        assert!(Effect::Allow.matches(&Effect::Allow));
        assert!(Effect::Deny.matches(&Effect::Deny));
        assert!(!Effect::Allow.matches(&Effect::Deny));
        assert!(!Effect::Deny.matches(&Effect::Allow));
    }

    #[test]
    fn test_effect_display() {
        assert_eq!(Effect::Allow.to_string(), "ALLOW");
        assert_eq!(Effect::Deny.to_string(), "DENY");
        assert!(Effect::Allow.is_allow());
        assert!(!Effect::Deny.is_allow());
    }
}
