use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::{Map, Number, Value as JsonValue};

use crate::domain::{AppError, FormKind, FormRecord};
use crate::ports::DraftStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DraftFormat {
    Toml,
    Json,
    Yaml,
}

impl DraftFormat {
    fn from_path(path: &Path) -> Result<Self, AppError> {
        let extension =
            path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("toml") => Ok(DraftFormat::Toml),
            Some("json") => Ok(DraftFormat::Json),
            Some("yml" | "yaml") => Ok(DraftFormat::Yaml),
            _ => Err(AppError::Validation(format!(
                "Unsupported draft format '{}': use .toml, .json or .yaml",
                path.display()
            ))),
        }
    }
}

/// Filesystem-based draft store; the file extension picks the format.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilesystemDraftStore;

impl FilesystemDraftStore {
    pub fn new() -> Self {
        Self
    }

    /// Parse draft content of the given format into loosely-typed JSON.
    fn parse(path: &Path, content: &str) -> Result<JsonValue, AppError> {
        match DraftFormat::from_path(path)? {
            DraftFormat::Toml => {
                let table: toml::Value = toml::from_str(content)?;
                Ok(toml_to_json(table))
            }
            DraftFormat::Json => Ok(serde_json::from_str(content)?),
            DraftFormat::Yaml => serde_yaml::from_str(content)
                .map_err(|e| AppError::parse_error(path.display().to_string(), e)),
        }
    }

    fn render(path: &Path, record: &FormRecord) -> Result<String, AppError> {
        let values = record.values();
        match DraftFormat::from_path(path)? {
            DraftFormat::Toml => toml::to_string(values)
                .map_err(|e| AppError::Internal(format!("Failed to serialize draft: {}", e))),
            DraftFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(values)?)),
            DraftFormat::Yaml => serde_yaml::to_string(values)
                .map_err(|e| AppError::Internal(format!("Failed to serialize draft: {}", e))),
        }
    }
}

impl DraftStore for FilesystemDraftStore {
    fn load(&self, kind: FormKind, path: &Path) -> Result<FormRecord, AppError> {
        let content = fs::read_to_string(path).map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                AppError::DraftNotFound(path.display().to_string())
            } else {
                AppError::Io(err)
            }
        })?;
        let data = Self::parse(path, &content)?;
        FormRecord::from_json(kind, data)
    }

    fn save(&self, path: &Path, record: &FormRecord) -> Result<(), AppError> {
        let content = Self::render(path, record)?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Convert parsed TOML into JSON; datetimes become their RFC 3339 text.
pub fn toml_to_json(value: toml::Value) -> JsonValue {
    match value {
        toml::Value::String(text) => JsonValue::String(text),
        toml::Value::Integer(number) => JsonValue::Number(number.into()),
        toml::Value::Float(number) => {
            Number::from_f64(number).map(JsonValue::Number).unwrap_or(JsonValue::Null)
        }
        toml::Value::Boolean(flag) => JsonValue::Bool(flag),
        toml::Value::Datetime(datetime) => JsonValue::String(datetime.to_string()),
        toml::Value::Array(items) => JsonValue::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => JsonValue::Object(
            table.into_iter().map(|(key, value)| (key, toml_to_json(value))).collect::<Map<_, _>>(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn toml_round_trip_preserves_lists_and_entries() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("drafts/project.toml");
        let store = FilesystemDraftStore::new();

        let mut record = FormRecord::new(FormKind::Project);
        record.set_text("name", "Seaside").unwrap();
        record.add_item("tags", "defi").unwrap();
        record.update_entry("teamMembers", 0, "name", "Ada").unwrap();
        store.save(&path, &record).unwrap();

        assert!(store.exists(&path));
        let loaded = store.load(FormKind::Project, &path).unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn toml_datetimes_load_as_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("campaign.toml");
        fs::write(&path, "name = \"Builders\"\nstartDate = 2026-11-01T09:30:00Z\nprizePool = 250\n")
            .unwrap();

        let record = FilesystemDraftStore::new().load(FormKind::Campaign, &path).unwrap();
        assert_eq!(record.text("startDate"), "2026-11-01T09:30:00Z");
        assert_eq!(record.text("prizePool"), "250");
    }

    #[test]
    fn toml_local_datetime_with_fraction_parses() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("campaign.toml");
        fs::write(&path, "startDate = 2026-11-01T09:30:00.5\n").unwrap();

        let record = FilesystemDraftStore::new().load(FormKind::Campaign, &path).unwrap();
        let parsed = crate::domain::form::rules::parse_datetime(record.text("startDate")).unwrap();
        assert_eq!(parsed.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn json_and_yaml_drafts_load() {
        let dir = TempDir::new().unwrap();
        let json = dir.path().join("campaign.json");
        fs::write(&json, r#"{ "name": "Builders", "tags": ["celo", "defi"] }"#).unwrap();
        let yaml = dir.path().join("campaign.yaml");
        fs::write(&yaml, "name: Builders\ntags:\n  - celo\n  - defi\n").unwrap();

        let store = FilesystemDraftStore::new();
        let from_json = store.load(FormKind::Campaign, &json).unwrap();
        let from_yaml = store.load(FormKind::Campaign, &yaml).unwrap();
        assert_eq!(from_json, from_yaml);
        assert_eq!(from_json.list("tags").len(), 2);
    }

    #[test]
    fn missing_draft_is_reported() {
        let dir = TempDir::new().unwrap();
        let err = FilesystemDraftStore::new()
            .load(FormKind::Campaign, &dir.path().join("nope.toml"))
            .unwrap_err();
        assert!(matches!(err, AppError::DraftNotFound(_)));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("draft.txt");
        fs::write(&path, "name = 1").unwrap();
        assert!(FilesystemDraftStore::new().load(FormKind::Campaign, &path).is_err());
    }
}
