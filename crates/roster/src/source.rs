//! Reading roster exports from disk.
//!
//! The club API returns member lists either bare or wrapped
//! (`{"success": true, "data": [...]}`), and exports from the admin panel use
//! `{"members": [...]}`. All three layouts are accepted, and lists written
//! back keep whatever wrapper they were read from.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::member::MemberRecord;
use crate::reorder::{move_item, Direction};

/// Keys under which a wrapped list may live, checked in order.
const LIST_KEYS: &[&str] = &["members", "data", "items"];

/// A JSON list together with the document it was found in.
#[derive(Debug, Clone, PartialEq)]
pub struct ListDocument {
    /// The enclosing object and the key holding the list, for wrapped files.
    wrapper: Option<(Map<String, Value>, &'static str)>,
    /// The list entries.
    pub items: Vec<Value>,
}

impl ListDocument {
    /// A bare list with no wrapper.
    #[must_use]
    pub fn bare(items: Vec<Value>) -> Self {
        Self {
            wrapper: None,
            items,
        }
    }

    /// Split a parsed document into its wrapper and list.
    ///
    /// # Errors
    ///
    /// Returns a description of the top level when it holds no list.
    fn from_value(value: Value) -> std::result::Result<Self, &'static str> {
        match value {
            Value::Array(items) => Ok(Self::bare(items)),
            Value::Object(mut obj) => {
                let key = LIST_KEYS
                    .iter()
                    .copied()
                    .find(|key| matches!(obj.get(*key), Some(Value::Array(_))))
                    .ok_or("an object without a member list")?;
                let items = match obj.get_mut(key) {
                    Some(Value::Array(items)) => std::mem::take(items),
                    _ => Vec::new(),
                };
                Ok(Self {
                    wrapper: Some((obj, key)),
                    items,
                })
            }
            Value::Null => Err("null"),
            Value::Bool(_) => Err("a boolean"),
            Value::Number(_) => Err("a number"),
            Value::String(_) => Err("a string"),
        }
    }

    /// Key the list lives under, if the document is wrapped.
    #[must_use]
    pub fn list_key(&self) -> Option<&'static str> {
        self.wrapper.as_ref().map(|(_, key)| *key)
    }

    /// Rebuild the full document with the current list in place.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match &self.wrapper {
            None => Value::Array(self.items.clone()),
            Some((obj, key)) => {
                let mut obj = obj.clone();
                obj.insert((*key).to_string(), Value::Array(self.items.clone()));
                Value::Object(obj)
            }
        }
    }
}

/// Load member records from a JSON file.
///
/// Elements that are not JSON objects become default records so that the
/// count matches the file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, or does
/// not contain a list at the top level or under a known key.
pub fn load_members(path: impl AsRef<Path>) -> Result<Vec<MemberRecord>> {
    let path = path.as_ref();
    let items = load_json_list(path)?;

    let records: Vec<_> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            if !item.is_object() {
                warn!(position = i, "Roster entry is not an object, using empty record");
            }
            MemberRecord::from_value(item)
        })
        .collect();

    info!(count = records.len(), "Loaded roster from {}", path.display());
    Ok(records)
}

/// Load just the entries of a JSON list file, using the same layout rules
/// as [`load_members`].
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, or holds
/// no list.
pub fn load_json_list(path: impl AsRef<Path>) -> Result<Vec<Value>> {
    Ok(load_list_document(path)?.items)
}

/// Load a JSON list file, keeping its wrapper for writing back.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, or holds
/// no list.
pub fn load_list_document(path: impl AsRef<Path>) -> Result<ListDocument> {
    let path = path.as_ref();
    debug!("Reading {}", path.display());

    let raw = std::fs::read_to_string(path).map_err(|source| Error::RosterRead {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&raw).map_err(|source| Error::RosterParse {
        path: path.to_path_buf(),
        source,
    })?;

    ListDocument::from_value(value).map_err(|found| {
        Error::roster_shape(path, format!("expected a list of entries, found {found}"))
    })
}

/// Write a list document back to disk, pretty-printed.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_list_document(path: impl AsRef<Path>, document: &ListDocument) -> Result<()> {
    let path = path.as_ref();
    let mut body = serde_json::to_string_pretty(&document.to_value())?;
    body.push('\n');
    std::fs::write(path, body)?;
    info!(
        count = document.items.len(),
        "Wrote list to {}",
        path.display()
    );
    Ok(())
}

/// Move one entry of a JSON list file and save the file.
///
/// The file is left untouched when the entry is already at that end.
/// Returns whether anything moved.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or written, or if `index`
/// is outside the list.
pub fn reorder_file(path: impl AsRef<Path>, index: usize, direction: Direction) -> Result<bool> {
    let path = path.as_ref();
    let mut document = load_list_document(path)?;
    let moved = move_item(&mut document.items, index, direction)?;
    if moved {
        write_list_document(path, &document)?;
    }
    Ok(moved)
}
