//! Member search index.
//!
//! Turns raw [`MemberRecord`]s into [`EnrichedMember`]s carrying the derived
//! fields the team page needs (primary department, primary role, leadership,
//! search haystack), and provides the pure operations run over them on every
//! keystroke or data refresh:
//!
//! - [`MemberSearchIndex::enrich`] maps records one-to-one, in order.
//! - [`filter`] keeps members whose haystack contains the query.
//! - [`search`] combines the filter with a leaders-only cut and a limit.
//! - [`partition_leadership`] splits leaders from everyone else.
//! - [`group_by_department`] buckets the rest by primary department.
//!
//! None of these fail, perform I/O, or keep state between calls.
//!
//! # Example
//!
//! ```
//! use roster::index::{filter, MemberSearchIndex};
//! use roster::member::MemberRecord;
//!
//! let index = MemberSearchIndex::new();
//! let members = index.enrich(&[
//!     MemberRecord::new("1", "Ann").with_designation("President"),
//!     MemberRecord::new("2", "Bo").with_designation("Engineer").with_department("Web"),
//! ]);
//!
//! assert!(members[0].is_leader());
//! let hits = filter(&members, "ENG");
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].full_name(), "Bo");
//! ```

mod group;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::leadership::LeadershipRoles;
use crate::member::MemberRecord;

pub use group::{
    group_by_department, partition_leadership, DepartmentGroup, DepartmentGroups, Directory,
    Partition, Section,
};

/// Department assigned to members who list none.
pub const DEFAULT_DEPARTMENT: &str = "Other";

/// Role assigned to members who list none.
pub const DEFAULT_ROLE: &str = "Member";

/// Title of the leadership pseudo-group.
pub const DEFAULT_LEADERSHIP_LABEL: &str = "Leadership";

/// A member record plus derived, display-ready fields.
///
/// Built only by [`MemberSearchIndex::enrich`]; fields are read through
/// accessors so derived values cannot drift from the record they came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedMember {
    #[serde(rename = "member")]
    record: MemberRecord,
    primary_department: String,
    primary_role: String,
    is_leader: bool,
    #[serde(skip)]
    search_haystack: String,
}

impl EnrichedMember {
    /// The underlying record.
    #[must_use]
    pub fn record(&self) -> &MemberRecord {
        &self.record
    }

    /// Record identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.record.id
    }

    /// Display name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.record.full_name
    }

    /// Primary department; never empty.
    #[must_use]
    pub fn primary_department(&self) -> &str {
        &self.primary_department
    }

    /// Primary role; never empty.
    #[must_use]
    pub fn primary_role(&self) -> &str {
        &self.primary_role
    }

    /// Whether the member belongs in the leadership group.
    #[must_use]
    pub fn is_leader(&self) -> bool {
        self.is_leader
    }

    /// Lowercased text searched by [`filter`].
    #[must_use]
    pub fn search_haystack(&self) -> &str {
        &self.search_haystack
    }

    /// Check whether an already-normalized query occurs in the haystack.
    #[must_use]
    pub fn matches(&self, normalized_query: &str) -> bool {
        self.search_haystack.contains(normalized_query)
    }
}

/// Fallback labels used during enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSettings {
    /// Department for members with none.
    pub other_department: String,
    /// Role for members with none.
    pub default_role: String,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            other_department: DEFAULT_DEPARTMENT.to_string(),
            default_role: DEFAULT_ROLE.to_string(),
        }
    }
}

/// Builds [`EnrichedMember`]s from raw records.
#[derive(Debug, Clone, Default)]
pub struct MemberSearchIndex {
    settings: IndexSettings,
    roles: LeadershipRoles,
}

impl MemberSearchIndex {
    /// An index with built-in leadership roles and default labels.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An index with custom labels and leadership roles.
    ///
    /// Blank labels fall back to [`DEFAULT_DEPARTMENT`] and [`DEFAULT_ROLE`].
    #[must_use]
    pub fn with_settings(settings: IndexSettings, roles: LeadershipRoles) -> Self {
        let other_department = non_blank(&settings.other_department).map_or_else(
            || {
                warn!("Blank fallback department, using {DEFAULT_DEPARTMENT}");
                DEFAULT_DEPARTMENT.to_string()
            },
            String::from,
        );
        let default_role = non_blank(&settings.default_role).map_or_else(
            || {
                warn!("Blank fallback role, using {DEFAULT_ROLE}");
                DEFAULT_ROLE.to_string()
            },
            String::from,
        );

        Self {
            settings: IndexSettings {
                other_department,
                default_role,
            },
            roles,
        }
    }

    /// The fallback labels in effect.
    #[must_use]
    pub fn settings(&self) -> &IndexSettings {
        &self.settings
    }

    /// The leadership predicate in effect.
    #[must_use]
    pub fn roles(&self) -> &LeadershipRoles {
        &self.roles
    }

    /// Enrich every record, preserving order and count.
    #[must_use]
    pub fn enrich(&self, records: &[MemberRecord]) -> Vec<EnrichedMember> {
        let members: Vec<_> = records.iter().map(|r| self.enrich_one(r)).collect();
        debug!(
            count = members.len(),
            leaders = members.iter().filter(|m| m.is_leader).count(),
            "Enriched member records"
        );
        members
    }

    /// Enrich a single record.
    #[must_use]
    pub fn enrich_one(&self, record: &MemberRecord) -> EnrichedMember {
        let primary_department = primary(
            record.primary_department.as_deref(),
            &record.departments,
            &self.settings.other_department,
        );
        let primary_role = primary(
            record.primary_role.as_deref(),
            &record.designations,
            &self.settings.default_role,
        );

        // Explicit flag and title match are OR'd; neither can veto the other.
        let is_leader = record.is_leader.unwrap_or(false) || self.roles.matches(&primary_role);
        trace!(id = %record.id, role = %primary_role, is_leader, "Derived leadership");

        let search_haystack = haystack(record, &primary_department, &primary_role);

        EnrichedMember {
            record: record.clone(),
            primary_department,
            primary_role,
            is_leader,
            search_haystack,
        }
    }

    /// Enrich, then split into the leadership group and department groups.
    #[must_use]
    pub fn directory(&self, records: &[MemberRecord]) -> Directory {
        Directory::build(&self.enrich(records))
    }
}

/// Trim and lowercase a search query.
#[must_use]
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Members whose haystack contains `query`, in input order.
///
/// The query is trimmed and lowercased first. A blank query returns every
/// member unchanged.
#[must_use]
pub fn filter(members: &[EnrichedMember], query: &str) -> Vec<EnrichedMember> {
    let needle = normalize_query(query);
    if needle.is_empty() {
        return members.to_vec();
    }

    let hits: Vec<_> = members
        .iter()
        .filter(|m| m.matches(&needle))
        .cloned()
        .collect();
    debug!(query = %needle, total = members.len(), hits = hits.len(), "Filtered members");
    hits
}

/// Filter by `query`, optionally keep only leaders, then cap the count.
///
/// The limit applies after the leadership cut, so `limit` leaders come back
/// even when non-leaders rank earlier in the roster.
#[must_use]
pub fn search(
    members: &[EnrichedMember],
    query: &str,
    leaders_only: bool,
    limit: Option<usize>,
) -> Vec<EnrichedMember> {
    let mut hits = filter(members, query);
    if leaders_only {
        hits = partition_leadership(&hits).leaders;
    }
    if let Some(limit) = limit {
        hits.truncate(limit);
    }
    hits
}

/// Look up a member by identifier for the detail view.
#[must_use]
pub fn find<'a>(members: &'a [EnrichedMember], id: &str) -> Option<&'a EnrichedMember> {
    members.iter().find(|m| m.id() == id)
}

fn non_blank(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}

/// Override, else first usable list entry, else the fallback.
fn primary(explicit: Option<&str>, listed: &[String], fallback: &str) -> String {
    explicit
        .and_then(non_blank)
        .or_else(|| listed.iter().find_map(|s| non_blank(s)))
        .unwrap_or(fallback)
        .to_string()
}

fn haystack(record: &MemberRecord, primary_department: &str, primary_role: &str) -> String {
    let pieces = std::iter::once(record.full_name.as_str())
        .chain(std::iter::once(primary_department))
        .chain(record.departments.iter().map(String::as_str))
        .chain(std::iter::once(primary_role))
        .chain(record.designations.iter().map(String::as_str))
        .chain(record.skills.iter().map(String::as_str))
        .filter_map(non_blank);

    pieces.collect::<Vec<_>>().join(" ").to_lowercase()
}
