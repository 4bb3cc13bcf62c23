//! Leadership role detection.
//!
//! A member counts as leadership when their primary role is one of a fixed
//! set of club titles. Titles are compared after normalization, so
//! `"Vice-President"`, `"vice  president"` and `"VICE_PRESIDENT"` are the same
//! role. Deployments can extend the set with extra titles or regex patterns
//! through configuration.

use regex::{Regex, RegexBuilder};
use tracing::warn;

/// Built-in leadership titles, already normalized.
pub const LEADERSHIP_ROLES: &[&str] = &[
    "president",
    "vice president",
    "general secretary",
    "joint secretary",
    "secretary",
    "treasurer",
    "convener",
    "co convener",
    "chairperson",
    "club lead",
    "faculty coordinator",
    "faculty advisor",
];

/// Normalize a role title for comparison.
///
/// Lowercases, treats `-` and `_` as spaces, and collapses runs of
/// whitespace.
#[must_use]
pub fn normalize_role(role: &str) -> String {
    role.to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check a title against the built-in leadership set only.
#[must_use]
pub fn is_leadership_role(role: &str) -> bool {
    let normalized = normalize_role(role);
    LEADERSHIP_ROLES.contains(&normalized.as_str())
}

/// The leadership predicate used by the search index.
///
/// Always includes [`LEADERSHIP_ROLES`]; configuration may add more.
#[derive(Debug, Clone, Default)]
pub struct LeadershipRoles {
    extra_roles: Vec<String>,
    patterns: Vec<Regex>,
}

impl LeadershipRoles {
    /// The built-in set with no additions.
    #[must_use]
    pub fn builtin() -> Self {
        Self::default()
    }

    /// The built-in set plus extra titles and case-insensitive regex patterns.
    ///
    /// Patterns that fail to compile are logged and skipped; configuration
    /// validation rejects them before this point in normal use.
    #[must_use]
    pub fn with_extra(extra_roles: &[String], patterns: &[String]) -> Self {
        let extra_roles = extra_roles
            .iter()
            .map(|r| normalize_role(r))
            .filter(|r| !r.is_empty())
            .collect();

        let patterns = patterns
            .iter()
            .filter_map(|p| match compile_pattern(p) {
                Ok(r) => Some(r),
                Err(e) => {
                    warn!(pattern = %p, error = %e, "Invalid leadership pattern");
                    None
                }
            })
            .collect();

        Self {
            extra_roles,
            patterns,
        }
    }

    /// Check whether a role title denotes leadership.
    #[must_use]
    pub fn matches(&self, role: &str) -> bool {
        let normalized = normalize_role(role);
        if normalized.is_empty() {
            return false;
        }

        LEADERSHIP_ROLES.contains(&normalized.as_str())
            || self.extra_roles.iter().any(|r| *r == normalized)
            || self.patterns.iter().any(|p| p.is_match(role.trim()))
    }

    /// Number of configured additions (titles plus patterns).
    #[must_use]
    pub fn extension_count(&self) -> usize {
        self.extra_roles.len() + self.patterns.len()
    }
}

/// Compile a leadership pattern the way the predicate uses it.
///
/// # Errors
///
/// Returns the regex error if the pattern is invalid.
pub fn compile_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}
