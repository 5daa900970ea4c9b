mod failure;
mod plan;
mod state;

pub use failure::user_message;
pub(crate) use plan::MetadataObject;
pub use plan::{METADATA_VERSION, MappingInput, SubmissionPlan};
pub use state::{SubmissionOutcome, SubmissionState, SubmissionStatus};
