use std::path::Path;

use crate::app::SubmissionContext;
use crate::app::submission::{SubmissionOrchestrator, SubmissionSettings};
use crate::domain::{AppError, FormKind, SubmissionOutcome, SubmissionState, ValidationErrors};
use crate::ports::DraftStore;

#[derive(Debug, Clone)]
pub struct SubmitReport {
    pub outcome: SubmissionOutcome,
    /// Field errors when the draft failed validation.
    pub errors: ValidationErrors,
    pub history: Vec<SubmissionState>,
}

impl SubmitReport {
    pub fn exit_code(&self) -> i32 {
        match self.outcome {
            SubmissionOutcome::Succeeded { .. } => 0,
            SubmissionOutcome::Failed { .. } | SubmissionOutcome::Abandoned => 1,
        }
    }
}

/// Load a draft and run it through the submission flow.
pub fn execute(
    store: &impl DraftStore,
    kind: FormKind,
    path: &Path,
    ctx: SubmissionContext<'_>,
    settings: SubmissionSettings,
) -> Result<SubmitReport, AppError> {
    let record = store.load(kind, path)?;
    let mut orchestrator = SubmissionOrchestrator::new(ctx, settings);
    let outcome = orchestrator.submit(&record)?;
    Ok(SubmitReport {
        outcome,
        errors: orchestrator.status().errors.clone(),
        history: orchestrator.history().to_vec(),
    })
}
