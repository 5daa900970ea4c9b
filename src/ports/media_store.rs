//! Media upload port definition.

use crate::domain::{AppError, StagedMedia};

/// Port for pinning media to content-addressed storage.
pub trait MediaStore {
    /// Upload staged media and return its public URL.
    fn upload(&self, media: &StagedMedia) -> Result<String, AppError>;
}
