//! sovseas: Draft, validate, and submit Sovereign Seas campaigns and projects.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    FieldSummary, PreviewOutcome, SectionSummary, SubmitReport, ValidateOutcome, WizardOutcome,
    init, preview, schema, submit, validate, wizard,
};
pub use app::{CancelToken, SubmissionContext, SubmissionOrchestrator, SubmissionSettings};
pub use domain::{
    AppConfig, AppError, FormKind, FormRecord, Scope, SubmissionOutcome, SubmissionState,
    ValidationErrors, WizardNavigator,
};
