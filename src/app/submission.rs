//! Sequential submission flow: validate, upload, serialize, switch chain,
//! write, confirm, then resolve where the new item lives.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::app::SubmissionContext;
use crate::domain::contract::abi;
use crate::domain::submission::user_message;
use crate::domain::{
    Address, AppError, ContractCall, FormKind, FormRecord, MappingInput, MediaRef, MediaSlot,
    Scope, StagedMedia, SubmissionConfig, SubmissionOutcome, SubmissionState, SubmissionStatus,
};

/// Shared flag telling an in-flight submission to discard its result.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Submission parameters resolved from `[submission]` configuration.
#[derive(Debug, Clone)]
pub struct SubmissionSettings {
    pub redirect_delay: Duration,
    pub wait_for_receipt: bool,
    pub campaign_fee_wei: u128,
    pub project_fee_wei: u128,
    pub default_token: Address,
    /// Directory relative media paths are resolved against.
    pub media_root: PathBuf,
}

impl SubmissionSettings {
    pub fn from_config(config: &SubmissionConfig, media_root: &Path) -> Result<Self, AppError> {
        Ok(Self {
            redirect_delay: Duration::from_secs(config.redirect_delay_secs),
            wait_for_receipt: config.wait_for_receipt,
            campaign_fee_wei: config.campaign_fee_wei,
            project_fee_wei: config.project_fee_wei,
            default_token: config.default_token_address()?,
            media_root: media_root.to_path_buf(),
        })
    }

    pub fn creation_fee(&self, kind: FormKind) -> u128 {
        match kind {
            FormKind::Campaign => self.campaign_fee_wei,
            FormKind::Project => self.project_fee_wei,
        }
    }
}

enum Interrupt {
    Cancelled,
    Failed(AppError),
}

impl From<AppError> for Interrupt {
    fn from(err: AppError) -> Self {
        Interrupt::Failed(err)
    }
}

/// Drives one form session's submissions through [`SubmissionState`].
pub struct SubmissionOrchestrator<'a> {
    ctx: SubmissionContext<'a>,
    settings: SubmissionSettings,
    status: SubmissionStatus,
    history: Vec<SubmissionState>,
    media: MediaSlot,
    cancel: CancelToken,
}

impl<'a> SubmissionOrchestrator<'a> {
    pub fn new(ctx: SubmissionContext<'a>, settings: SubmissionSettings) -> Self {
        Self {
            ctx,
            settings,
            status: SubmissionStatus::default(),
            history: Vec::new(),
            media: MediaSlot::new(),
            cancel: CancelToken::new(),
        }
    }

    /// Token that abandons the in-flight submission when cancelled.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    /// Every state entered by the most recent submission, in order.
    pub fn history(&self) -> &[SubmissionState] {
        &self.history
    }

    /// Return to `Idle`, clearing an abandoned submission.
    pub fn reset(&mut self) {
        self.status = SubmissionStatus::default();
        self.history.clear();
        self.media.clear();
        self.cancel.clear();
    }

    pub fn submit(&mut self, record: &FormRecord) -> Result<SubmissionOutcome, AppError> {
        if self.status.loading {
            return Err(AppError::SubmissionInProgress);
        }
        self.history.clear();
        // A cancel left over from an earlier submission must not abandon this one.
        self.cancel.clear();
        self.status.loading = true;

        match self.run(record) {
            Ok(outcome) => Ok(outcome),
            Err(Interrupt::Cancelled) => {
                log::info!("Submission abandoned at '{}'", self.status.state.label());
                Ok(SubmissionOutcome::Abandoned)
            }
            Err(Interrupt::Failed(err)) => {
                let message = match &err {
                    AppError::ValidationFailed(_) => err.to_string(),
                    other => user_message(&other.to_string()),
                };
                log::warn!("Submission failed: {}", err);
                self.transition(SubmissionState::Failed { reason: message.clone() });
                self.finish();
                Ok(SubmissionOutcome::Failed { message })
            }
        }
    }

    fn run(&mut self, record: &FormRecord) -> Result<SubmissionOutcome, Interrupt> {
        let kind = record.kind();

        self.transition(SubmissionState::Validating);
        let errors = crate::domain::form::validate(record, Scope::All, self.ctx.clock.now())?;
        let invalid = errors.invalid_count();
        self.status.errors = errors;
        if invalid > 0 {
            return Err(AppError::ValidationFailed(invalid).into());
        }
        let creator = self.ctx.wallet.address()?.ok_or(AppError::WalletNotConnected)?;

        let media_url = self.upload_media(record)?;

        self.transition(SubmissionState::SerializingMetadata);
        let plan = kind.build_plan(&MappingInput {
            record,
            creator,
            timestamp: self.ctx.clock.now().timestamp(),
            media_url: media_url.as_deref(),
            creation_fee_wei: self.settings.creation_fee(kind),
            default_token: self.settings.default_token,
        })?;

        self.transition(SubmissionState::AwaitingChainSwitch);
        self.ctx.chain.ensure_correct_chain()?;
        self.checkpoint()?;

        self.transition(SubmissionState::AwaitingContractWrite);
        let tx_hash = self.ctx.contract.write_contract(&plan.call)?;
        self.checkpoint()?;

        if self.settings.wait_for_receipt {
            self.transition(SubmissionState::AwaitingConfirmation { tx_hash: tx_hash.clone() });
            self.ctx.contract.wait_for_receipt(&tx_hash)?;
            self.checkpoint()?;
        }

        self.transition(SubmissionState::Succeeded { tx_hash: tx_hash.clone(), destination: None });
        self.finish();

        self.ctx.clock.sleep(self.settings.redirect_delay);
        self.checkpoint()?;
        let destination = self.resolve_destination(kind);
        self.settle(SubmissionState::Succeeded {
            tx_hash: tx_hash.clone(),
            destination: Some(destination.clone()),
        });
        Ok(SubmissionOutcome::Succeeded { tx_hash, destination })
    }

    /// Upload a local media file; remote URLs and blank fields pass through.
    fn upload_media(&mut self, record: &FormRecord) -> Result<Option<String>, Interrupt> {
        let Some(field) = record.kind().schema().media_field() else {
            return Ok(None);
        };
        let Some(MediaRef::Local(path)) = MediaRef::parse(record.text(field.key)) else {
            return Ok(None);
        };

        self.transition(SubmissionState::UploadingMedia);
        self.status.uploading = true;
        let path = if path.is_relative() { self.settings.media_root.join(path) } else { path };
        let staged = self.media.replace(StagedMedia::read_from(&path)?);
        let url = self.ctx.media.upload(staged)?;
        self.status.uploading = false;
        self.checkpoint()?;
        Ok(Some(url))
    }

    /// Best-effort route to the new item, falling back to the listing page.
    fn resolve_destination(&self, kind: FormKind) -> String {
        let call = ContractCall::new(kind.count_function(), Vec::new());
        let count = self
            .ctx
            .contract
            .read_contract(&call)
            .and_then(|data| abi::decode_uint(&data));
        match count {
            Ok(count) if count > 0 => kind.detail_route(count - 1),
            Ok(_) => kind.listing_route().to_string(),
            Err(err) => {
                log::warn!("Could not read {}: {}", kind.count_function(), err);
                kind.listing_route().to_string()
            }
        }
    }

    fn checkpoint(&self) -> Result<(), Interrupt> {
        if self.cancel.is_cancelled() { Err(Interrupt::Cancelled) } else { Ok(()) }
    }

    fn transition(&mut self, state: SubmissionState) {
        log::debug!("submission: {} -> {}", self.status.state, state);
        self.history.push(state.clone());
        self.status.state = state;
    }

    /// Refine the terminal state in place without recording a new transition.
    fn settle(&mut self, state: SubmissionState) {
        if let Some(last) = self.history.last_mut() {
            *last = state.clone();
        }
        self.status.state = state;
    }

    /// Terminal bookkeeping: re-enable submission and release staged media.
    fn finish(&mut self) {
        self.status.loading = false;
        self.status.uploading = false;
        self.media.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AbiValue, TxHash};
    use crate::testing::{FakeChain, FakeContractClient, FakeMediaStore, ManualClock};
    use std::fs;
    use tempfile::TempDir;

    struct Harness {
        chain: FakeChain,
        contract: FakeContractClient,
        media: FakeMediaStore,
        clock: ManualClock,
        settings: SubmissionSettings,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                chain: FakeChain::connected(),
                contract: FakeContractClient::new(),
                media: FakeMediaStore::returning("https://gateway.example/ipfs/QmLogo"),
                clock: ManualClock::fixed(),
                settings: SubmissionSettings {
                    redirect_delay: Duration::from_secs(3),
                    wait_for_receipt: true,
                    campaign_fee_wei: 2,
                    project_fee_wei: 1,
                    default_token: Address([0x47; 20]),
                    media_root: PathBuf::from("."),
                },
            }
        }

        fn orchestrator(&self) -> SubmissionOrchestrator<'_> {
            let ctx = SubmissionContext::new(
                &self.chain,
                &self.chain,
                &self.contract,
                &self.media,
                &self.clock,
            );
            SubmissionOrchestrator::new(ctx, self.settings.clone())
        }
    }

    fn project() -> FormRecord {
        let mut record = FormRecord::new(FormKind::Project);
        record.set_text("name", "Seaside").unwrap();
        record.set_text("description", "A public goods savings protocol for Celo communities.").unwrap();
        record.set_text("category", "defi").unwrap();
        record.set_text("contactEmail", "team@seaside.xyz").unwrap();
        record
    }

    #[test]
    fn successful_submission_walks_every_state() {
        let harness = Harness::new();
        let mut orchestrator = harness.orchestrator();

        let outcome = orchestrator.submit(&project()).unwrap();

        assert_eq!(
            outcome,
            SubmissionOutcome::Succeeded {
                tx_hash: TxHash("0xfeed".into()),
                destination: "/explorer/project/2".into(),
            }
        );
        let labels: Vec<&str> = orchestrator.history().iter().map(SubmissionState::label).collect();
        assert_eq!(
            labels,
            [
                "validating",
                "serializing metadata",
                "awaiting chain switch",
                "awaiting contract write",
                "awaiting confirmation",
                "succeeded",
            ]
        );
        assert_eq!(
            orchestrator.history().last(),
            Some(&SubmissionState::Succeeded {
                tx_hash: TxHash("0xfeed".into()),
                destination: Some("/explorer/project/2".into()),
            })
        );
        assert!(!orchestrator.status().loading);
        assert_eq!(harness.clock.slept(), [Duration::from_secs(3)]);
        assert_eq!(harness.contract.written_calls()[0].value, 1);
    }

    #[test]
    fn invalid_record_fails_with_field_errors() {
        let harness = Harness::new();
        let mut orchestrator = harness.orchestrator();

        let outcome = orchestrator.submit(&FormRecord::new(FormKind::Project)).unwrap();

        assert!(matches!(outcome, SubmissionOutcome::Failed { .. }));
        assert_eq!(orchestrator.status().errors.message("name"), "Project name is required");
        assert!(!orchestrator.status().loading);
        assert!(harness.contract.written_calls().is_empty());
    }

    #[test]
    fn rejected_upload_resets_flags() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("logo.png"), [1, 2, 3]).unwrap();
        let mut harness = Harness::new();
        harness.media = FakeMediaStore::failing("500 Internal Server Error");
        harness.settings.media_root = dir.path().to_path_buf();
        let mut orchestrator = harness.orchestrator();

        let mut record = project();
        record.set_text("logo", "logo.png").unwrap();
        let outcome = orchestrator.submit(&record).unwrap();

        assert_eq!(
            outcome,
            SubmissionOutcome::Failed { message: "Upload failed: 500 Internal Server Error".into() }
        );
        let status = orchestrator.status();
        assert!(!status.loading);
        assert!(!status.uploading);
        assert!(matches!(status.state, SubmissionState::Failed { .. }));
        assert_eq!(harness.media.uploads(), ["logo.png"]);
    }

    #[test]
    fn uploaded_media_url_lands_in_metadata() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("logo.png"), [1, 2, 3]).unwrap();
        let mut harness = Harness::new();
        harness.settings.media_root = dir.path().to_path_buf();
        let mut orchestrator = harness.orchestrator();

        let mut record = project();
        record.set_text("logo", "logo.png").unwrap();
        orchestrator.submit(&record).unwrap();

        let call = &harness.contract.written_calls()[0];
        let AbiValue::String(additional) = &call.args[4] else {
            panic!("expected additionalData string");
        };
        assert!(additional.contains("https://gateway.example/ipfs/QmLogo"));
        assert!(orchestrator.history().contains(&SubmissionState::UploadingMedia));
    }

    #[test]
    fn remote_media_is_not_uploaded() {
        let harness = Harness::new();
        let mut orchestrator = harness.orchestrator();
        let mut record = project();
        record.set_text("logo", "https://example.com/logo.png").unwrap();

        orchestrator.submit(&record).unwrap();
        assert!(harness.media.uploads().is_empty());
    }

    #[test]
    fn wallet_rejection_maps_to_canned_message() {
        let mut harness = Harness::new();
        harness.contract.write_error = Some("User rejected the request.".into());
        let mut orchestrator = harness.orchestrator();

        let outcome = orchestrator.submit(&project()).unwrap();
        assert_eq!(
            outcome,
            SubmissionOutcome::Failed { message: "Transaction was rejected in the wallet".into() }
        );
    }

    #[test]
    fn disconnected_wallet_fails() {
        let mut harness = Harness::new();
        harness.chain = FakeChain::disconnected();
        let mut orchestrator = harness.orchestrator();

        let outcome = orchestrator.submit(&project()).unwrap();
        assert_eq!(outcome, SubmissionOutcome::Failed { message: "Wallet not connected".into() });
    }

    #[test]
    fn count_read_failure_falls_back_to_listing() {
        let mut harness = Harness::new();
        harness.contract.item_count = None;
        let mut orchestrator = harness.orchestrator();

        let outcome = orchestrator.submit(&project()).unwrap();
        assert!(matches!(
            outcome,
            SubmissionOutcome::Succeeded { ref destination, .. } if destination == "/projects"
        ));
    }

    #[test]
    fn receipt_wait_is_optional() {
        let mut harness = Harness::new();
        harness.settings.wait_for_receipt = false;
        let mut orchestrator = harness.orchestrator();

        orchestrator.submit(&project()).unwrap();
        assert_eq!(harness.contract.receipt_count(), 0);
    }

    #[test]
    fn reverted_receipt_fails_and_re_enables_submit() {
        let mut harness = Harness::new();
        harness.contract.receipt_error = Some("execution reverted: campaign closed".into());
        let mut orchestrator = harness.orchestrator();

        let outcome = orchestrator.submit(&project()).unwrap();

        assert_eq!(
            outcome,
            SubmissionOutcome::Failed {
                message: "The contract reverted the transaction; check the form values".into()
            }
        );
        let labels: Vec<&str> = orchestrator.history().iter().map(SubmissionState::label).collect();
        assert_eq!(labels.last(), Some(&"failed"));
        assert!(labels.contains(&"awaiting confirmation"));
        assert!(!orchestrator.status().loading);
        assert_eq!(harness.contract.receipt_count(), 1);
        assert!(harness.clock.slept().is_empty());
    }

    #[test]
    fn success_reads_item_count_for_destination() {
        let harness = Harness::new();
        let mut orchestrator = harness.orchestrator();

        orchestrator.submit(&project()).unwrap();

        let reads = harness.contract.reads.lock().unwrap();
        assert_eq!(reads.len(), 1);
        assert_eq!(reads[0].function, "getProjectCount");
        assert!(reads[0].args.is_empty());
    }

    #[test]
    fn zero_item_count_routes_to_listing() {
        let mut harness = Harness::new();
        harness.contract.item_count = Some(0);
        let mut orchestrator = harness.orchestrator();

        let outcome = orchestrator.submit(&project()).unwrap();

        assert_eq!(
            outcome,
            SubmissionOutcome::Succeeded {
                tx_hash: TxHash("0xfeed".into()),
                destination: "/projects".into(),
            }
        );
    }

    #[test]
    fn cancel_between_submissions_does_not_abandon_the_next() {
        let harness = Harness::new();
        let mut orchestrator = harness.orchestrator();
        orchestrator.submit(&project()).unwrap();

        orchestrator.cancel_token().cancel();
        let outcome = orchestrator.submit(&project()).unwrap();

        assert!(matches!(outcome, SubmissionOutcome::Succeeded { .. }));
        assert!(!orchestrator.status().loading);
        assert_eq!(harness.chain.switch_count(), 2);
        assert!(orchestrator.submit(&project()).is_ok());
    }

    #[test]
    fn cancellation_abandons_without_touching_state() {
        let mut harness = Harness::new();
        let token = CancelToken::new();
        harness.contract.cancel_on_write = Some(token.clone());
        let ctx = SubmissionContext::new(
            &harness.chain,
            &harness.chain,
            &harness.contract,
            &harness.media,
            &harness.clock,
        );
        let mut orchestrator = SubmissionOrchestrator::new(ctx, harness.settings.clone());
        orchestrator.cancel = token;

        let outcome = orchestrator.submit(&project()).unwrap();

        assert_eq!(outcome, SubmissionOutcome::Abandoned);
        assert_eq!(orchestrator.status().state, SubmissionState::AwaitingContractWrite);
        assert!(matches!(orchestrator.submit(&project()), Err(AppError::SubmissionInProgress)));

        orchestrator.reset();
        assert_eq!(orchestrator.status().state, SubmissionState::Idle);
        assert!(!orchestrator.cancel_token().is_cancelled());
    }
}
