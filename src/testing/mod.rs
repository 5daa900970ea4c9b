mod fake_chain;
mod fake_contract_client;
mod fake_media_store;
mod manual_clock;
mod scripted_prompter;

pub use fake_chain::FakeChain;
pub use fake_contract_client::FakeContractClient;
pub use fake_media_store::FakeMediaStore;
pub use manual_clock::ManualClock;
pub use scripted_prompter::{Reply, ScriptedPrompter};
