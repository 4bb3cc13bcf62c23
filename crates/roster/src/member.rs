//! Member records as received from the data layer.
//!
//! The club API is loose about shapes: `department` may be a string or a list,
//! `isLeader` may be a boolean or the string `"true"`, `_id` may be a plain
//! string or an `{"$oid": ...}` wrapper, and any field may be `null` or
//! missing. All of that is normalized here, once, into [`MemberRecord`] so the
//! rest of the crate only ever sees canonical ordered lists and trimmed text.
//!
//! Decoding a record never fails. Anything that cannot be interpreted becomes
//! the empty value for its field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A link to one of a member's profiles elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    /// Platform name as entered (e.g. `"github"`, `"LinkedIn"`).
    pub platform: String,
    /// Profile URL.
    pub url: String,
}

/// A single club member's profile data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    /// Record identifier. Empty when the source had none.
    pub id: String,

    /// Display name.
    #[serde(rename = "fullname")]
    pub full_name: String,

    /// Designations, primary first.
    #[serde(rename = "designation")]
    pub designations: Vec<String>,

    /// Departments, primary first.
    #[serde(rename = "department")]
    pub departments: Vec<String>,

    /// Skills in first-seen order, without duplicates.
    pub skills: Vec<String>,

    /// Links to external profiles.
    pub social_links: Vec<SocialLink>,

    /// Free-form biography.
    pub bio: String,

    /// Explicit leadership flag, if the source set one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_leader: Option<bool>,

    /// Explicit primary department, overriding the first listed department.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_department: Option<String>,

    /// Explicit primary role, overriding the first listed designation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_role: Option<String>,

    /// Profile picture URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,

    /// When the record was created upstream.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the record was last updated upstream.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl MemberRecord {
    /// Create a record with just an identifier and a name.
    #[must_use]
    pub fn new(id: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            ..Self::default()
        }
    }

    /// Append a designation.
    #[must_use]
    pub fn with_designation(mut self, designation: impl Into<String>) -> Self {
        self.designations.push(designation.into());
        self
    }

    /// Append a department.
    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.departments.push(department.into());
        self
    }

    /// Append a skill, ignoring duplicates.
    #[must_use]
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        push_unique(&mut self.skills, skill.into());
        self
    }

    /// Set the explicit leadership flag.
    #[must_use]
    pub fn with_leader_flag(mut self, is_leader: bool) -> Self {
        self.is_leader = Some(is_leader);
        self
    }

    /// Decode a record from an arbitrary JSON value.
    ///
    /// Non-object values yield a default record.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        Self {
            id: field(obj, &["_id", "id"]).and_then(id_text).unwrap_or_default(),
            full_name: field(obj, &["fullname", "fullName", "full_name", "name"])
                .and_then(text)
                .unwrap_or_default(),
            designations: field(obj, &["designation", "designations"])
                .map(text_list)
                .unwrap_or_default(),
            departments: field(obj, &["department", "departments"])
                .map(text_list)
                .unwrap_or_default(),
            skills: field(obj, &["skills"]).map(skill_list).unwrap_or_default(),
            social_links: field(obj, &["socialLinks", "social_links", "socials"])
                .map(social_links)
                .unwrap_or_default(),
            bio: field(obj, &["bio", "biography"])
                .and_then(text)
                .unwrap_or_default(),
            is_leader: field(obj, &["isLeader", "is_leader"]).and_then(flag),
            primary_department: field(obj, &["primaryDepartment", "primary_department"])
                .and_then(text),
            primary_role: field(obj, &["primaryRole", "primary_role"]).and_then(text),
            profile_picture: field(obj, &["profilePicture", "profile_picture", "image"])
                .and_then(url_text),
            created_at: field(obj, &["createdAt", "created_at"]).and_then(timestamp),
            updated_at: field(obj, &["updatedAt", "updated_at"]).and_then(timestamp),
        }
    }
}

impl<'de> Deserialize<'de> for MemberRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// First of `keys` that is present and not `null`.
fn field<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
}

/// Trimmed, non-empty text from a string or number.
fn text(value: &Value) -> Option<String> {
    let s = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!s.is_empty()).then_some(s)
}

fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::Object(obj) => obj.get("$oid").and_then(text),
        other => text(other),
    }
}

fn url_text(value: &Value) -> Option<String> {
    match value {
        Value::Object(obj) => obj.get("url").and_then(text),
        other => text(other),
    }
}

/// A string becomes a one-element list and arrays keep their usable
/// entries. Numbers and other scalars give an empty list.
fn text_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(text).collect(),
        Value::String(_) => text(value).into_iter().collect(),
        _ => Vec::new(),
    }
}

/// Like [`text_list`], but a single string may hold comma-separated skills.
fn skill_list(value: &Value) -> Vec<String> {
    let raw: Vec<String> = match value {
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        other => text_list(other),
    };

    let mut skills = Vec::with_capacity(raw.len());
    for skill in raw {
        push_unique(&mut skills, skill);
    }
    skills
}

fn push_unique(list: &mut Vec<String>, item: String) {
    if !list.contains(&item) {
        list.push(item);
    }
}

/// Accepts `[{platform, url}]` or `{platform: url}`. Entries without a URL
/// are dropped.
fn social_links(value: &Value) -> Vec<SocialLink> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| {
                let obj = item.as_object()?;
                let url = field(obj, &["url", "link", "href"]).and_then(text)?;
                let platform = field(obj, &["platform", "name"])
                    .and_then(text)
                    .unwrap_or_default();
                Some(SocialLink { platform, url })
            })
            .collect(),
        Value::Object(obj) => obj
            .iter()
            .filter_map(|(platform, url)| {
                Some(SocialLink {
                    platform: platform.clone(),
                    url: text(url)?,
                })
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        _ => None,
    }
}

fn timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Object(obj) => obj.get("$date").and_then(timestamp),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_canonical_shape() {
        let record = MemberRecord::from_value(&json!({
            "_id": "64f1",
            "fullname": "Ann Lee",
            "designation": ["President", "Web Lead"],
            "department": ["Web", "Design"],
            "skills": ["Rust", "Figma"],
            "socialLinks": [{"platform": "github", "url": "https://github.com/ann"}],
            "bio": "Hi",
            "isLeader": true
        }));

        assert_eq!(record.id, "64f1");
        assert_eq!(record.full_name, "Ann Lee");
        assert_eq!(record.designations, vec!["President", "Web Lead"]);
        assert_eq!(record.departments, vec!["Web", "Design"]);
        assert_eq!(record.skills, vec!["Rust", "Figma"]);
        assert_eq!(record.social_links.len(), 1);
        assert_eq!(record.social_links[0].platform, "github");
        assert_eq!(record.bio, "Hi");
        assert_eq!(record.is_leader, Some(true));
    }

    #[test]
    fn test_scalar_department_and_designation_become_lists() {
        let record = MemberRecord::from_value(&json!({
            "fullname": "Bo",
            "designation": "Engineer",
            "department": "Web"
        }));

        assert_eq!(record.designations, vec!["Engineer"]);
        assert_eq!(record.departments, vec!["Web"]);
    }

    #[test]
    fn test_null_and_wrong_types_coerce_to_empty() {
        let record = MemberRecord::from_value(&json!({
            "fullname": "Cy",
            "designation": null,
            "department": {"nested": true},
            "skills": 42,
            "socialLinks": "not a list",
            "bio": false,
            "isLeader": "maybe"
        }));

        assert!(record.designations.is_empty());
        assert!(record.departments.is_empty());
        assert!(record.skills.is_empty());
        assert!(record.social_links.is_empty());
        assert!(record.bio.is_empty());
        assert_eq!(record.is_leader, None);
    }

    #[test]
    fn test_numeric_scalars_are_not_list_entries() {
        let record = MemberRecord::from_value(&json!({
            "department": 7,
            "designation": true,
            "skills": 3.5
        }));

        assert!(record.departments.is_empty());
        assert!(record.designations.is_empty());
        assert!(record.skills.is_empty());

        let record = MemberRecord::from_value(&json!({"department": [7, "Web"]}));
        assert_eq!(record.departments, vec!["7", "Web"]);
    }

    #[test]
    fn test_blank_list_entries_are_dropped() {
        let record = MemberRecord::from_value(&json!({
            "department": ["  ", "Design", null, 3]
        }));
        assert_eq!(record.departments, vec!["Design", "3"]);
    }

    #[test]
    fn test_non_object_yields_default() {
        assert_eq!(MemberRecord::from_value(&json!("Ann")), MemberRecord::default());
        assert_eq!(MemberRecord::from_value(&json!(null)), MemberRecord::default());
    }

    #[test]
    fn test_id_variants() {
        let oid = MemberRecord::from_value(&json!({"_id": {"$oid": "abc"}}));
        assert_eq!(oid.id, "abc");

        let numeric = MemberRecord::from_value(&json!({"id": 17}));
        assert_eq!(numeric.id, "17");

        let both = MemberRecord::from_value(&json!({"_id": "mongo", "id": "virtual"}));
        assert_eq!(both.id, "mongo");
    }

    #[test]
    fn test_skills_deduplicated_in_order() {
        let record = MemberRecord::from_value(&json!({
            "skills": ["Rust", "Go", "Rust", " Go "]
        }));
        assert_eq!(record.skills, vec!["Rust", "Go"]);
    }

    #[test]
    fn test_comma_separated_skills() {
        let record = MemberRecord::from_value(&json!({"skills": "React, Node ,, React"}));
        assert_eq!(record.skills, vec!["React", "Node"]);
    }

    #[test]
    fn test_leader_flag_variants() {
        let cases = [
            (json!(true), Some(true)),
            (json!("TRUE"), Some(true)),
            (json!("no"), Some(false)),
            (json!(1), Some(true)),
            (json!(0), Some(false)),
            (json!([]), None),
        ];
        for (raw, expected) in cases {
            let record = MemberRecord::from_value(&json!({ "isLeader": raw.clone() }));
            assert_eq!(record.is_leader, expected, "input {raw}");
        }
    }

    #[test]
    fn test_social_links_map_form_and_missing_url() {
        let record = MemberRecord::from_value(&json!({
            "socialLinks": {"github": "https://github.com/bo", "x": ""}
        }));
        assert_eq!(
            record.social_links,
            vec![SocialLink {
                platform: "github".to_string(),
                url: "https://github.com/bo".to_string(),
            }]
        );

        let record = MemberRecord::from_value(&json!({
            "socialLinks": [{"platform": "linkedin"}, {"url": "https://bo.dev"}]
        }));
        assert_eq!(record.social_links.len(), 1);
        assert_eq!(record.social_links[0].url, "https://bo.dev");
        assert!(record.social_links[0].platform.is_empty());
    }

    #[test]
    fn test_profile_picture_and_timestamps() {
        let record = MemberRecord::from_value(&json!({
            "profilePicture": {"url": "https://cdn/x.png", "publicId": "x"},
            "createdAt": "2024-01-15T10:00:00.000Z",
            "updatedAt": {"$date": "2024-02-01T00:00:00Z"}
        }));
        assert_eq!(record.profile_picture.as_deref(), Some("https://cdn/x.png"));
        assert!(record.created_at.is_some());
        assert!(record.updated_at.is_some());

        let bad = MemberRecord::from_value(&json!({"createdAt": "yesterday"}));
        assert!(bad.created_at.is_none());
    }

    #[test]
    fn test_deserialize_never_fails_on_valid_json() {
        let records: Vec<MemberRecord> =
            serde_json::from_str(r#"[{"fullname": "Ann"}, 5, {"department": null}]"#).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].full_name, "Ann");
        assert_eq!(records[1], MemberRecord::default());
    }

    #[test]
    fn test_builder_helpers() {
        let record = MemberRecord::new("1", "Ann")
            .with_designation("President")
            .with_department("Core")
            .with_skill("Rust")
            .with_skill("Rust")
            .with_leader_flag(false);

        assert_eq!(record.designations, vec!["President"]);
        assert_eq!(record.departments, vec!["Core"]);
        assert_eq!(record.skills, vec!["Rust"]);
        assert_eq!(record.is_leader, Some(false));
    }

    #[test]
    fn test_serialize_uses_wire_names() {
        let record = MemberRecord::new("1", "Ann").with_department("Web");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["fullname"], "Ann");
        assert_eq!(json["department"], json!(["Web"]));
        assert!(json.get("isLeader").is_none());
    }
}
