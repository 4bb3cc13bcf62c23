//! Leadership partitioning and department grouping.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use super::{EnrichedMember, DEFAULT_LEADERSHIP_LABEL};

/// Result of [`partition_leadership`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Partition {
    /// Members flagged as leaders, in input order.
    pub leaders: Vec<EnrichedMember>,
    /// Everyone else, in input order.
    pub others: Vec<EnrichedMember>,
}

/// Stable partition on [`EnrichedMember::is_leader`].
#[must_use]
pub fn partition_leadership(members: &[EnrichedMember]) -> Partition {
    let (leaders, others): (Vec<_>, Vec<_>) =
        members.iter().cloned().partition(EnrichedMember::is_leader);
    Partition { leaders, others }
}

/// Members sharing a primary department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentGroup {
    /// Department name.
    pub name: String,
    /// Members in input order.
    pub members: Vec<EnrichedMember>,
}

/// Department groups in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DepartmentGroups {
    groups: Vec<DepartmentGroup>,
}

impl DepartmentGroups {
    /// Members of the named department, if any were seen.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[EnrichedMember]> {
        self.groups
            .iter()
            .find(|g| g.name == name)
            .map(|g| g.members.as_slice())
    }

    /// Department names in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.name.as_str())
    }

    /// Iterate over the groups.
    pub fn iter(&self) -> std::slice::Iter<'_, DepartmentGroup> {
        self.groups.iter()
    }

    /// Number of departments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no departments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total members across all departments.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.groups.iter().map(|g| g.members.len()).sum()
    }
}

impl<'a> IntoIterator for &'a DepartmentGroups {
    type Item = &'a DepartmentGroup;
    type IntoIter = std::slice::Iter<'a, DepartmentGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Group members by primary department.
///
/// Intended for the non-leader half of [`partition_leadership`], but any
/// slice works; leadership is not consulted here.
#[must_use]
pub fn group_by_department(members: &[EnrichedMember]) -> DepartmentGroups {
    let mut groups: Vec<DepartmentGroup> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for member in members {
        let name = member.primary_department();
        let slot = *slots.entry(name).or_insert_with(|| {
            groups.push(DepartmentGroup {
                name: name.to_string(),
                members: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].members.push(member.clone());
    }

    debug!(
        departments = groups.len(),
        members = members.len(),
        "Grouped members by department"
    );
    DepartmentGroups { groups }
}

/// One titled block of the team page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    /// Heading shown above the block.
    pub title: &'a str,
    /// Members in display order.
    pub members: &'a [EnrichedMember],
}

/// Browse-ready view: the leadership pseudo-group, then departments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Directory {
    leadership_label: String,
    leadership: Vec<EnrichedMember>,
    departments: DepartmentGroups,
}

impl Directory {
    /// Partition and group already-enriched members.
    #[must_use]
    pub fn build(members: &[EnrichedMember]) -> Self {
        let Partition { leaders, others } = partition_leadership(members);
        Self {
            leadership_label: DEFAULT_LEADERSHIP_LABEL.to_string(),
            leadership: leaders,
            departments: group_by_department(&others),
        }
    }

    /// Use a different heading for the leadership group.
    #[must_use]
    pub fn with_leadership_label(mut self, label: impl Into<String>) -> Self {
        self.leadership_label = label.into();
        self
    }

    /// Members in the leadership group.
    #[must_use]
    pub fn leadership(&self) -> &[EnrichedMember] {
        &self.leadership
    }

    /// Non-leader members by department.
    #[must_use]
    pub fn departments(&self) -> &DepartmentGroups {
        &self.departments
    }

    /// Sections in display order. Leadership comes first and is omitted
    /// when empty.
    #[must_use]
    pub fn sections(&self) -> Vec<Section<'_>> {
        let leadership = (!self.leadership.is_empty()).then(|| Section {
            title: self.leadership_label.as_str(),
            members: self.leadership.as_slice(),
        });

        leadership
            .into_iter()
            .chain(self.departments.iter().map(|g| Section {
                title: g.name.as_str(),
                members: g.members.as_slice(),
            }))
            .collect()
    }

    /// Total members shown.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.leadership.len() + self.departments.member_count()
    }

    /// Whether nothing would be shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.member_count() == 0
    }
}
