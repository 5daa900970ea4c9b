mod chain;
mod clock;
mod contract_client;
mod draft_store;
mod media_store;
mod wizard_prompter;

pub use chain::{ChainDescriptor, ChainGuard, WalletSession};
pub use clock::{Clock, SystemClock};
pub use contract_client::{ContractClient, TxReceipt};
pub use draft_store::DraftStore;
pub use media_store::MediaStore;
pub use wizard_prompter::{FieldPrompt, ListAction, WizardAction, WizardPrompter};
