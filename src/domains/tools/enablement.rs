//! Tool enablement policy.
//!
//! Computes the effective set of callable tools from two comma-separated
//! configuration lists. The policy is derived once at startup and never
//! re-evaluated per call; there is no hot-reload.

use std::collections::BTreeSet;

/// Startup-computed policy restricting which registered tools are callable.
///
/// The effective set is `(enabled.is_empty() ? all : enabled) - disabled`.
/// The deny list always wins, even for a name present in both lists, so an
/// operator misconfiguration cannot re-enable a deliberately blocked tool.
/// Names that match no registered tool are ignored silently, since
/// configuration may reference tools absent in a given build.
#[derive(Debug, Clone, Default)]
pub struct EnablementPolicy {
    enabled: BTreeSet<String>,
    disabled: BTreeSet<String>,
}

impl EnablementPolicy {
    /// Policy that allows every registered tool.
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Build a policy from raw comma-separated lists.
    ///
    /// Whitespace around names is trimmed and empty segments are dropped,
    /// so `"a, b,,c"` parses as `{a, b, c}`.
    pub fn from_lists(enabled: Option<&str>, disabled: Option<&str>) -> Self {
        Self {
            enabled: parse_list(enabled),
            disabled: parse_list(disabled),
        }
    }

    /// Whether a tool name passes the policy.
    pub fn allows(&self, name: &str) -> bool {
        if self.disabled.contains(name) {
            return false;
        }
        self.enabled.is_empty() || self.enabled.contains(name)
    }
}

fn parse_list(raw: Option<&str>) -> BTreeSet<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_policy_allows_everything() {
        let policy = EnablementPolicy::allow_all();
        assert!(policy.allows("ping"));
        assert!(policy.allows("anything"));
    }

    #[test]
    fn test_allow_list_restricts() {
        let policy = EnablementPolicy::from_lists(Some("a,b"), None);
        assert!(policy.allows("a"));
        assert!(policy.allows("b"));
        assert!(!policy.allows("c"));
    }

    #[test]
    fn test_deny_list_removes_from_all() {
        let policy = EnablementPolicy::from_lists(None, Some("x"));
        assert!(!policy.allows("x"));
        assert!(policy.allows("y"));
    }

    #[test]
    fn test_disabled_wins_over_enabled() {
        let policy = EnablementPolicy::from_lists(Some("a,b"), Some("b"));
        assert!(policy.allows("a"));
        assert!(!policy.allows("b"));
    }

    #[test]
    fn test_order_independent() {
        let forward = EnablementPolicy::from_lists(Some("a,b"), Some("b"));
        let reversed = EnablementPolicy::from_lists(Some("b,a"), Some("b"));
        for name in ["a", "b", "c"] {
            assert_eq!(forward.allows(name), reversed.allows(name));
        }
    }

    #[test]
    fn test_whitespace_and_empty_segments() {
        let policy = EnablementPolicy::from_lists(Some(" a , b ,,"), None);
        assert!(policy.allows("a"));
        assert!(policy.allows("b"));
        assert!(!policy.allows(""));
    }
}
