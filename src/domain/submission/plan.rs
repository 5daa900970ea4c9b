//! Metadata and contract call derived from a record right before submission.

use std::collections::BTreeMap;

use serde_json::{Map, Value as JsonValue};

use crate::domain::contract::{Address, ContractCall};
use crate::domain::form::{Entry, FormRecord, value::entry_is_blank};

/// Metadata version tag written into every additional-info blob.
pub const METADATA_VERSION: &str = "1.0.0";

/// Inputs a form mapping needs beyond the record itself.
#[derive(Debug, Clone)]
pub struct MappingInput<'a> {
    pub record: &'a FormRecord,
    pub creator: Address,
    /// Unix seconds at serialization time.
    pub timestamp: i64,
    /// Uploaded media URL, replacing a local media path.
    pub media_url: Option<&'a str>,
    pub creation_fee_wei: u128,
    pub default_token: Address,
}

/// Serialized metadata blobs plus the call that embeds them.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionPlan {
    pub metadata: BTreeMap<&'static str, JsonValue>,
    pub call: ContractCall,
}

impl SubmissionPlan {
    /// Compact JSON text of one metadata blob, as embedded in the call.
    pub fn metadata_string(&self, name: &str) -> String {
        self.metadata.get(name).map(JsonValue::to_string).unwrap_or_default()
    }
}

/// JSON object that omits blank optional values.
#[derive(Debug, Default)]
pub(crate) struct MetadataObject {
    map: Map<String, JsonValue>,
}

impl MetadataObject {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert trimmed text when present.
    pub(crate) fn text(mut self, key: &str, value: Option<&str>) -> Self {
        if let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) {
            self.map.insert(key.to_string(), JsonValue::String(value.to_string()));
        }
        self
    }

    /// Insert a list, skipping it entirely when it has no items.
    pub(crate) fn list(mut self, key: &str, items: Vec<String>) -> Self {
        if !items.is_empty() {
            self.map.insert(
                key.to_string(),
                JsonValue::Array(items.into_iter().map(JsonValue::String).collect()),
            );
        }
        self
    }

    /// Insert non-blank entries with their blank sub-fields dropped.
    pub(crate) fn entries(mut self, key: &str, entries: &[Entry]) -> Self {
        let items: Vec<JsonValue> = entries
            .iter()
            .filter(|entry| !entry_is_blank(entry))
            .map(|entry| {
                let object: Map<String, JsonValue> = entry
                    .iter()
                    .filter(|(_, value)| !value.trim().is_empty())
                    .map(|(sub, value)| (sub.clone(), JsonValue::String(value.trim().to_string())))
                    .collect();
                JsonValue::Object(object)
            })
            .collect();
        if !items.is_empty() {
            self.map.insert(key.to_string(), JsonValue::Array(items));
        }
        self
    }

    pub(crate) fn value(mut self, key: &str, value: impl Into<JsonValue>) -> Self {
        self.map.insert(key.to_string(), value.into());
        self
    }

    /// Nested object, skipped when it ended up empty.
    pub(crate) fn object(mut self, key: &str, nested: MetadataObject) -> Self {
        if !nested.map.is_empty() {
            self.map.insert(key.to_string(), JsonValue::Object(nested.map));
        }
        self
    }

    pub(crate) fn build(self) -> JsonValue {
        JsonValue::Object(self.map)
    }
}
