//! API Facade for the application.
//!
//! Each function loads configuration, wires the production adapters, and
//! runs one command.

use std::path::{Path, PathBuf};

use crate::app::commands::{init, preview, schema, submit, validate, wizard};
use crate::app::config::load_config;
use crate::app::{SubmissionContext, SubmissionSettings};
use crate::domain::{Address, AppConfig};
use crate::ports::{Clock, SystemClock, WizardPrompter};
use crate::services::{FilesystemDraftStore, JsonRpcClient, PinataMediaStore};

pub use crate::app::commands::preview::PreviewOutcome;
pub use crate::app::commands::schema::{FieldSummary, SectionSummary};
pub use crate::app::commands::submit::SubmitReport;
pub use crate::app::commands::validate::ValidateOutcome;
pub use crate::app::commands::wizard::WizardOutcome;
pub use crate::domain::{AppError, FormKind};

/// Write a draft template for `kind`, defaulting to `./<kind>.toml`.
pub fn init(
    kind: FormKind,
    output: Option<&Path>,
    config: Option<&Path>,
) -> Result<PathBuf, AppError> {
    let config = load_config(config)?;
    let path = output.map(Path::to_path_buf).unwrap_or_else(|| init::default_draft_path(kind));
    init::execute(kind, &path, &config.submission.default_token, SystemClock.now())
}

/// Sections and fields of `kind`.
pub fn schema(kind: FormKind) -> Vec<SectionSummary> {
    schema::execute(kind)
}

/// Validate a draft file, optionally one section only.
pub fn validate(
    kind: FormKind,
    draft: &Path,
    section: Option<&str>,
) -> Result<ValidateOutcome, AppError> {
    validate::execute(&FilesystemDraftStore::new(), kind, draft, section, SystemClock.now())
}

/// Show the metadata and call a submission would send.
pub fn preview(
    kind: FormKind,
    draft: &Path,
    config: Option<&Path>,
) -> Result<PreviewOutcome, AppError> {
    let config = load_config(config)?;
    let settings = SubmissionSettings::from_config(&config.submission, media_root(draft))?;
    let creator = preview_creator(&config)?;
    preview::execute(
        &FilesystemDraftStore::new(),
        kind,
        draft,
        &settings,
        creator,
        SystemClock.now(),
    )
}

/// Submit a draft on chain through the configured JSON-RPC endpoint.
pub fn submit(
    kind: FormKind,
    draft: &Path,
    config: Option<&Path>,
) -> Result<SubmitReport, AppError> {
    let config = load_config(config)?;
    let settings = SubmissionSettings::from_config(&config.submission, media_root(draft))?;
    let rpc = JsonRpcClient::new(&config.network, config.contract_address()?)?;
    let media = PinataMediaStore::from_env_with_config(&config.ipfs)?;
    let clock = SystemClock;
    let ctx = SubmissionContext::new(&rpc, &rpc, &rpc, &media, &clock);

    submit::execute(&FilesystemDraftStore::new(), kind, draft, ctx, settings)
}

/// Run the interactive wizard with `prompter`.
pub fn wizard(
    kind: FormKind,
    output: &Path,
    from: Option<&Path>,
    prompter: &mut dyn WizardPrompter,
) -> Result<WizardOutcome, AppError> {
    let options = wizard::WizardOptions { kind, output, from, now: SystemClock.now() };
    wizard::execute(&FilesystemDraftStore::new(), prompter, options)
}

/// Relative media paths in a draft resolve against the draft's directory.
fn media_root(draft: &Path) -> &Path {
    draft.parent().filter(|parent| !parent.as_os_str().is_empty()).unwrap_or(Path::new("."))
}

/// Creator shown in previews: the configured account, else the zero address.
fn preview_creator(config: &AppConfig) -> Result<Address, AppError> {
    match config.network.account.as_deref() {
        Some(account) => account.parse(),
        None => Ok(Address::ZERO),
    }
}
