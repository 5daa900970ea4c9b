//! Field values held by a form record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One item of a struct list (team member, milestone): sub-field key to text.
pub type Entry = BTreeMap<String, String>;

/// Value stored under a single field key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Text(String),
    List(Vec<String>),
    Entries(Vec<Entry>),
}

impl FieldValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Flag(_) => "a flag",
            FieldValue::Text(_) => "text",
            FieldValue::List(_) => "a list",
            FieldValue::Entries(_) => "an entry list",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_entries(&self) -> Option<&[Entry]> {
        match self {
            FieldValue::Entries(entries) => Some(entries),
            _ => None,
        }
    }

    /// Whether the value carries no user input.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Flag(_) => false,
            FieldValue::Text(value) => value.trim().is_empty(),
            FieldValue::List(items) => items.iter().all(|item| item.trim().is_empty()),
            FieldValue::Entries(entries) => entries.iter().all(entry_is_blank),
        }
    }
}

/// An entry whose every sub-field is empty after trimming.
pub fn entry_is_blank(entry: &Entry) -> bool {
    entry.values().all(|value| value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_deserialization_picks_shape() {
        let flag: FieldValue = serde_json::from_str("true").unwrap();
        assert_eq!(flag, FieldValue::Flag(true));

        let list: FieldValue = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(list, FieldValue::List(vec!["a".into(), "b".into()]));

        let entries: FieldValue = serde_json::from_str(r#"[{"name": "Ada"}]"#).unwrap();
        assert_eq!(entries.as_entries().unwrap()[0]["name"], "Ada");
    }

    #[test]
    fn placeholder_lists_are_blank() {
        assert!(FieldValue::List(vec![" ".into()]).is_blank());
        assert!(FieldValue::Entries(vec![Entry::from([("name".into(), String::new())])]).is_blank());
        assert!(!FieldValue::Flag(false).is_blank());
    }
}
