//! Form state holder and array-field helpers.

use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

use super::schema::{FieldKind, FieldSpec, blank_entry};
use super::value::{Entry, FieldValue};
use crate::domain::{AppError, FormKind};

/// All editable fields of one campaign or project draft.
///
/// Every schema field is present from construction onwards, and every list
/// field holds at least one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRecord {
    kind: FormKind,
    values: BTreeMap<String, FieldValue>,
}

impl FormRecord {
    /// Fresh record with schema defaults and list placeholders.
    pub fn new(kind: FormKind) -> Self {
        let values = kind
            .schema()
            .fields
            .iter()
            .map(|field| (field.key.to_string(), field.initial_value()))
            .collect();
        Self { kind, values }
    }

    /// Build a record from loosely-typed draft data, coercing each value to
    /// the shape its schema field declares. Missing keys keep defaults.
    pub fn from_json(kind: FormKind, data: JsonValue) -> Result<Self, AppError> {
        let mut record = Self::new(kind);
        let JsonValue::Object(map) = data else {
            return Err(AppError::parse_error("draft", "top level must be a table of fields"));
        };

        for (key, raw) in map {
            let spec = record.spec(&key)?;
            let value = coerce(spec, raw)?;
            record.values.insert(key, value);
        }
        record.normalize();
        Ok(record)
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn values(&self) -> &BTreeMap<String, FieldValue> {
        &self.values
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    /// Text of a scalar field; empty when unset or not text.
    pub fn text(&self, key: &str) -> &str {
        self.values.get(key).and_then(FieldValue::as_text).unwrap_or_default()
    }

    /// Trimmed text, or `None` when blank.
    pub fn text_opt(&self, key: &str) -> Option<&str> {
        let value = self.text(key).trim();
        if value.is_empty() { None } else { Some(value) }
    }

    pub fn flag(&self, key: &str) -> bool {
        self.values.get(key).and_then(FieldValue::as_flag).unwrap_or(false)
    }

    pub fn list(&self, key: &str) -> &[String] {
        self.values.get(key).and_then(FieldValue::as_list).unwrap_or_default()
    }

    pub fn entries(&self, key: &str) -> &[Entry] {
        self.values.get(key).and_then(FieldValue::as_entries).unwrap_or_default()
    }

    /// Non-blank list items, trimmed.
    pub fn filled_items(&self, key: &str) -> Vec<String> {
        self.list(key)
            .iter()
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn set_text(&mut self, key: &str, value: impl Into<String>) -> Result<(), AppError> {
        let spec = self.spec(key)?;
        if matches!(spec.kind, FieldKind::Flag) || spec.kind.is_list() {
            return Err(mismatch(key, "text", &spec.initial_value()));
        }
        self.values.insert(key.to_string(), FieldValue::Text(value.into()));
        Ok(())
    }

    pub fn set_flag(&mut self, key: &str, value: bool) -> Result<(), AppError> {
        let spec = self.spec(key)?;
        if !matches!(spec.kind, FieldKind::Flag) {
            return Err(mismatch(key, "a flag", &spec.initial_value()));
        }
        self.values.insert(key.to_string(), FieldValue::Flag(value));
        Ok(())
    }

    /// Append `default` to a string list. Returns the new length.
    pub fn add_item(&mut self, key: &str, default: &str) -> Result<usize, AppError> {
        let items = self.list_mut(key)?;
        items.push(default.to_string());
        Ok(items.len())
    }

    /// Append a blank entry to a struct list. Returns the new length.
    pub fn add_entry(&mut self, key: &str) -> Result<usize, AppError> {
        let FieldKind::Entries(subfields) = self.spec(key)?.kind else {
            return Err(self.mismatch_at(key, "an entry list"));
        };
        let entries = self.entries_mut(key)?;
        entries.push(blank_entry(subfields));
        Ok(entries.len())
    }

    /// Remove the element at `index` from a string or struct list.
    ///
    /// Refuses silently (returns `false`) when the list holds one element or
    /// fewer, so lists never become empty.
    pub fn remove_item(&mut self, key: &str, index: usize) -> Result<bool, AppError> {
        self.spec(key)?;
        match self.values.get_mut(key) {
            Some(FieldValue::List(items)) => remove_guarded(items, key, index),
            Some(FieldValue::Entries(entries)) => remove_guarded(entries, key, index),
            Some(other) => Err(mismatch(key, "a list", other)),
            None => Ok(false),
        }
    }

    /// Replace one element of a string list.
    pub fn update_item(&mut self, key: &str, index: usize, value: &str) -> Result<(), AppError> {
        let items = self.list_mut(key)?;
        let len = items.len();
        let slot = items
            .get_mut(index)
            .ok_or_else(|| AppError::IndexOutOfRange { field: key.to_string(), index, len })?;
        *slot = value.to_string();
        Ok(())
    }

    /// Set one sub-field of a struct list entry.
    pub fn update_entry(
        &mut self,
        key: &str,
        index: usize,
        sub: &str,
        value: &str,
    ) -> Result<(), AppError> {
        let FieldKind::Entries(subfields) = self.spec(key)?.kind else {
            return Err(self.mismatch_at(key, "an entry list"));
        };
        if !subfields.iter().any(|spec| spec.key == sub) {
            return Err(AppError::UnknownField {
                form: self.kind.as_str().to_string(),
                field: format!("{}.{}", key, sub),
            });
        }
        let entries = self.entries_mut(key)?;
        let len = entries.len();
        let entry = entries
            .get_mut(index)
            .ok_or_else(|| AppError::IndexOutOfRange { field: key.to_string(), index, len })?;
        entry.insert(sub.to_string(), value.to_string());
        Ok(())
    }

    fn mismatch_at(&self, key: &str, expected: &'static str) -> AppError {
        let actual = self.values.get(key).map(FieldValue::kind_name).unwrap_or("missing");
        AppError::FieldKindMismatch { field: key.to_string(), expected, actual }
    }

    fn spec(&self, key: &str) -> Result<&'static FieldSpec, AppError> {
        self.kind.schema().field(key).ok_or_else(|| AppError::UnknownField {
            form: self.kind.as_str().to_string(),
            field: key.to_string(),
        })
    }

    fn list_mut(&mut self, key: &str) -> Result<&mut Vec<String>, AppError> {
        self.spec(key)?;
        match self.values.get_mut(key) {
            Some(FieldValue::List(items)) => Ok(items),
            Some(other) => Err(mismatch(key, "a list", other)),
            None => Err(AppError::Internal(format!("field '{}' missing from record", key))),
        }
    }

    fn entries_mut(&mut self, key: &str) -> Result<&mut Vec<Entry>, AppError> {
        match self.values.get_mut(key) {
            Some(FieldValue::Entries(entries)) => Ok(entries),
            Some(other) => Err(mismatch(key, "an entry list", other)),
            None => Err(AppError::Internal(format!("field '{}' missing from record", key))),
        }
    }

    /// Re-seed empty lists and fill in missing entry sub-fields.
    fn normalize(&mut self) {
        for field in &self.kind.schema().fields {
            let Some(value) = self.values.get_mut(field.key) else {
                continue;
            };
            match (field.kind, value) {
                (FieldKind::List(_), FieldValue::List(items)) if items.is_empty() => {
                    items.push(String::new());
                }
                (FieldKind::Entries(subfields), FieldValue::Entries(entries)) => {
                    if entries.is_empty() {
                        entries.push(blank_entry(subfields));
                    }
                    for entry in entries.iter_mut() {
                        for sub in subfields {
                            entry.entry(sub.key.to_string()).or_default();
                        }
                    }
                }
                _ => {}
            }
        }
    }
}

fn remove_guarded<T>(items: &mut Vec<T>, key: &str, index: usize) -> Result<bool, AppError> {
    let len = items.len();
    if len <= 1 {
        return Ok(false);
    }
    if index >= len {
        return Err(AppError::IndexOutOfRange { field: key.to_string(), index, len });
    }
    items.remove(index);
    Ok(true)
}

fn mismatch(key: &str, expected: &'static str, actual: &FieldValue) -> AppError {
    AppError::FieldKindMismatch { field: key.to_string(), expected, actual: actual.kind_name() }
}

fn coerce(spec: &FieldSpec, raw: JsonValue) -> Result<FieldValue, AppError> {
    let invalid = |expected: &str| {
        AppError::parse_error(format!("field '{}'", spec.key), format!("expected {}", expected))
    };

    match (spec.kind, raw) {
        (_, JsonValue::Null) => Ok(spec.initial_value()),
        (FieldKind::Flag, JsonValue::Bool(value)) => Ok(FieldValue::Flag(value)),
        (FieldKind::Flag, JsonValue::String(value)) => match value.trim() {
            "true" | "yes" => Ok(FieldValue::Flag(true)),
            "false" | "no" | "" => Ok(FieldValue::Flag(false)),
            _ => Err(invalid("true or false")),
        },
        (FieldKind::Flag, _) => Err(invalid("true or false")),
        (FieldKind::List(_), JsonValue::Array(items)) => items
            .into_iter()
            .map(|item| scalar_text(item).ok_or_else(|| invalid("a list of strings")))
            .collect::<Result<Vec<_>, _>>()
            .map(FieldValue::List),
        (FieldKind::List(_), _) => Err(invalid("a list of strings")),
        (FieldKind::Entries(subfields), JsonValue::Array(items)) => {
            let mut entries = Vec::with_capacity(items.len());
            for item in items {
                let JsonValue::Object(map) = item else {
                    return Err(invalid("a list of tables"));
                };
                let mut entry = Entry::new();
                for (sub, raw) in map {
                    if !subfields.iter().any(|spec| spec.key == sub) {
                        let known = subfields.iter().map(|s| s.key).collect::<Vec<_>>().join(", ");
                        return Err(invalid(format!("sub-fields among: {}", known).as_str()));
                    }
                    let text = scalar_text(raw).ok_or_else(|| invalid("text sub-fields"))?;
                    entry.insert(sub, text);
                }
                entries.push(entry);
            }
            Ok(FieldValue::Entries(entries))
        }
        (FieldKind::Entries(_), _) => Err(invalid("a list of tables")),
        (_, raw) => scalar_text(raw).map(FieldValue::Text).ok_or_else(|| invalid("text")),
    }
}

fn scalar_text(value: JsonValue) -> Option<String> {
    match value {
        JsonValue::String(text) => Some(text),
        JsonValue::Number(number) => Some(number.to_string()),
        JsonValue::Bool(flag) => Some(flag.to_string()),
        JsonValue::Null => Some(String::new()),
        _ => None,
    }
}
