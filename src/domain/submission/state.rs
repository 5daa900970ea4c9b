//! Explicit submission state machine.

use std::fmt;

use crate::domain::contract::TxHash;
use crate::domain::form::ValidationErrors;

/// Where a submission currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    UploadingMedia,
    SerializingMetadata,
    AwaitingChainSwitch,
    AwaitingContractWrite,
    AwaitingConfirmation { tx_hash: TxHash },
    /// `destination` is filled in once the post-success delay has elapsed.
    Succeeded { tx_hash: TxHash, destination: Option<String> },
    Failed { reason: String },
}

impl SubmissionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionState::Succeeded { .. } | SubmissionState::Failed { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Validating => "validating",
            SubmissionState::UploadingMedia => "uploading media",
            SubmissionState::SerializingMetadata => "serializing metadata",
            SubmissionState::AwaitingChainSwitch => "awaiting chain switch",
            SubmissionState::AwaitingContractWrite => "awaiting contract write",
            SubmissionState::AwaitingConfirmation { .. } => "awaiting confirmation",
            SubmissionState::Succeeded { .. } => "succeeded",
            SubmissionState::Failed { .. } => "failed",
        }
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionState::AwaitingConfirmation { tx_hash } => {
                write!(f, "{} ({})", self.label(), tx_hash)
            }
            SubmissionState::Succeeded { tx_hash, .. } => write!(f, "{} ({})", self.label(), tx_hash),
            SubmissionState::Failed { reason } => write!(f, "{}: {}", self.label(), reason),
            _ => f.write_str(self.label()),
        }
    }
}

/// Everything a front end renders about a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionStatus {
    pub state: SubmissionState,
    /// Submit control disabled while true.
    pub loading: bool,
    pub uploading: bool,
    /// Field errors from the most recent validation pass.
    pub errors: ValidationErrors,
}

impl Default for SubmissionStatus {
    fn default() -> Self {
        Self {
            state: SubmissionState::Idle,
            loading: false,
            uploading: false,
            errors: ValidationErrors::default(),
        }
    }
}

/// Result handed back to the caller of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Succeeded { tx_hash: TxHash, destination: String },
    Failed { message: String },
    /// Cancelled mid-flight; the result was discarded.
    Abandoned,
}
