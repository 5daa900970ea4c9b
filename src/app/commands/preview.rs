use std::path::Path;

use chrono::{DateTime, Utc};

use crate::app::submission::SubmissionSettings;
use crate::domain::contract::abi;
use crate::domain::form::validate;
use crate::domain::{Address, AppError, FormKind, MappingInput, Scope, SubmissionPlan};
use crate::ports::DraftStore;

/// What a submission of the draft would send, without sending it.
#[derive(Debug, Clone)]
pub struct PreviewOutcome {
    pub plan: SubmissionPlan,
    pub signature: String,
    pub calldata_hex: String,
    pub duration_days: Option<i64>,
}

/// Build the metadata and contract call for a valid draft.
///
/// Local media paths are shown as-is since nothing is uploaded.
pub fn execute(
    store: &impl DraftStore,
    kind: FormKind,
    path: &Path,
    settings: &SubmissionSettings,
    creator: Address,
    now: DateTime<Utc>,
) -> Result<PreviewOutcome, AppError> {
    let record = store.load(kind, path)?;
    let errors = validate(&record, Scope::All, now)?;
    if !errors.is_valid() {
        return Err(AppError::ValidationFailed(errors.invalid_count()));
    }

    let plan = kind.build_plan(&MappingInput {
        record: &record,
        creator,
        timestamp: now.timestamp(),
        media_url: None,
        creation_fee_wei: settings.creation_fee(kind),
        default_token: settings.default_token,
    })?;

    let duration_days = match kind {
        FormKind::Campaign => crate::domain::campaign::schedule(&record)
            .map(|(start, end)| crate::domain::campaign::duration_days(start, end)),
        FormKind::Project => None,
    };

    Ok(PreviewOutcome {
        signature: plan.call.signature(),
        calldata_hex: abi::to_hex(&plan.call.calldata()),
        plan,
        duration_days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::Clock;
    use crate::services::FilesystemDraftStore;
    use crate::testing::ManualClock;
    use std::fs;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::TempDir;

    fn settings() -> SubmissionSettings {
        SubmissionSettings {
            redirect_delay: Duration::from_secs(3),
            wait_for_receipt: true,
            campaign_fee_wei: 2_000_000_000_000_000_000,
            project_fee_wei: 500_000_000_000_000_000,
            default_token: Address([0x76; 20]),
            media_root: PathBuf::from("."),
        }
    }

    #[test]
    fn project_preview_carries_fee_and_calldata() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("project.json");
        fs::write(
            &path,
            r#"{
                "name": "Seaside",
                "description": "A public goods savings protocol for Celo communities.",
                "category": "defi",
                "contactEmail": "team@seaside.xyz",
                "logo": "assets/logo.png"
            }"#,
        )
        .unwrap();

        let outcome = execute(
            &FilesystemDraftStore::new(),
            FormKind::Project,
            &path,
            &settings(),
            Address([0xaa; 20]),
            ManualClock::fixed().now(),
        )
        .unwrap();

        assert_eq!(
            outcome.signature,
            "createProject(string,string,string,string,string,address[],bool)"
        );
        assert_eq!(outcome.plan.call.value, 500_000_000_000_000_000);
        assert!(outcome.calldata_hex.starts_with("0x"));
        assert!(outcome.plan.metadata_string("additionalData").contains("assets/logo.png"));
        assert_eq!(outcome.duration_days, None);
    }

    #[test]
    fn invalid_draft_is_refused() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("campaign.toml");
        fs::write(&path, "name = \"Builders\"\n").unwrap();

        let err = execute(
            &FilesystemDraftStore::new(),
            FormKind::Campaign,
            &path,
            &settings(),
            Address([0xaa; 20]),
            ManualClock::fixed().now(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::ValidationFailed(count) if count > 0));
    }
}
