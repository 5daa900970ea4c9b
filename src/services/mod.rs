mod draft_filesystem;
mod draft_templates;
mod json_rpc_client;
mod pinata_media_store;

pub use draft_filesystem::{FilesystemDraftStore, toml_to_json};
pub use draft_templates::render_draft;
pub use json_rpc_client::JsonRpcClient;
pub use pinata_media_store::PinataMediaStore;
