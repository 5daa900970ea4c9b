//! Draft persistence port definition.

use std::path::Path;

use crate::domain::{AppError, FormKind, FormRecord};

/// Port for loading and saving form drafts.
pub trait DraftStore {
    /// Load a draft of `kind`; the format follows the file extension.
    fn load(&self, kind: FormKind, path: &Path) -> Result<FormRecord, AppError>;

    fn save(&self, path: &Path, record: &FormRecord) -> Result<(), AppError>;

    fn exists(&self, path: &Path) -> bool;
}
