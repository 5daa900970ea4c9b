pub mod campaign;
pub mod configuration;
pub mod contract;
pub mod error;
pub mod form;
pub mod form_kind;
pub mod media;
pub mod project;
pub mod submission;

pub use configuration::{AppConfig, IpfsConfig, NetworkConfig, SubmissionConfig};
pub use contract::{AbiValue, Address, ContractCall, TxHash};
pub use error::AppError;
pub use form::{FormRecord, Scope, ValidationErrors, WizardNavigator};
pub use form_kind::FormKind;
pub use media::{MediaRef, MediaSlot, StagedMedia};
pub use submission::{
    MappingInput, SubmissionOutcome, SubmissionPlan, SubmissionState, SubmissionStatus,
};
