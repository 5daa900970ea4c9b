use std::path::Path;

use chrono::{DateTime, Utc};

use crate::domain::form::validate;
use crate::domain::{AppError, FormKind, Scope, ValidationErrors};
use crate::ports::DraftStore;

#[derive(Debug, Clone)]
pub struct ValidateOutcome {
    pub errors: ValidationErrors,
    /// Campaign length in days, when both dates parse.
    pub duration_days: Option<i64>,
    pub exit_code: i32,
}

/// Validate a saved draft, optionally limited to one section.
pub fn execute(
    store: &impl DraftStore,
    kind: FormKind,
    path: &Path,
    section: Option<&str>,
    now: DateTime<Utc>,
) -> Result<ValidateOutcome, AppError> {
    let record = store.load(kind, path)?;
    let scope = section.map(Scope::Section).unwrap_or(Scope::All);
    let errors = validate(&record, scope, now)?;

    let duration_days = match kind {
        FormKind::Campaign => crate::domain::campaign::schedule(&record)
            .map(|(start, end)| crate::domain::campaign::duration_days(start, end)),
        FormKind::Project => None,
    };
    let exit_code = if errors.is_valid() { 0 } else { 1 };
    Ok(ValidateOutcome { errors, duration_days, exit_code })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::Clock;
    use crate::services::FilesystemDraftStore;
    use crate::testing::ManualClock;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("campaign.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn invalid_draft_exits_nonzero() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "name = \"\"\nprizePool = \"0\"\n");

        let outcome = execute(
            &FilesystemDraftStore::new(),
            FormKind::Campaign,
            &path,
            None,
            ManualClock::fixed().now(),
        )
        .unwrap();

        assert_eq!(outcome.exit_code, 1);
        assert_eq!(outcome.errors.message("name"), "Campaign name is required");
        assert_eq!(outcome.errors.message("prizePool"), "Prize pool must be greater than 0");
        assert_eq!(outcome.duration_days, None);
    }

    #[test]
    fn section_scope_ignores_other_sections() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "startDate = \"2026-11-01T09:00\"\nendDate = \"2026-11-15T21:00\"\n",
        );

        let outcome = execute(
            &FilesystemDraftStore::new(),
            FormKind::Campaign,
            &path,
            Some("timeline"),
            ManualClock::fixed().now(),
        )
        .unwrap();

        assert_eq!(outcome.exit_code, 0);
        assert_eq!(outcome.errors.message("name"), "");
        assert_eq!(outcome.duration_days, Some(15));
    }

    #[test]
    fn unknown_section_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "name = \"x\"\n");
        let err = execute(
            &FilesystemDraftStore::new(),
            FormKind::Campaign,
            &path,
            Some("payments"),
            ManualClock::fixed().now(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::UnknownSection(_)));
    }
}
