//! Media staged for upload.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::AppError;

/// Upper bound on staged file size.
pub const MAX_MEDIA_BYTES: usize = 10 * 1024 * 1024;

const IMAGE_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
];

/// Where a media field points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaRef {
    /// Already hosted; submitted as-is.
    Remote(String),
    /// Local file that must be uploaded first.
    Local(PathBuf),
}

impl MediaRef {
    /// Classify a media field value; `None` when blank.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let lower = value.to_ascii_lowercase();
        if ["http://", "https://", "ipfs://"].iter().any(|scheme| lower.starts_with(scheme)) {
            Some(MediaRef::Remote(value.to_string()))
        } else {
            Some(MediaRef::Local(PathBuf::from(value)))
        }
    }
}

/// File bytes held in memory between selection and upload.
pub struct StagedMedia {
    path: PathBuf,
    file_name: String,
    mime_type: &'static str,
    bytes: Vec<u8>,
}

impl fmt::Debug for StagedMedia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StagedMedia")
            .field("path", &self.path)
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

impl StagedMedia {
    /// Validate type and size, then take ownership of the bytes.
    pub fn new(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Result<Self, AppError> {
        let path = path.into();
        let unsupported = |reason: String| AppError::UnsupportedMedia {
            path: path.display().to_string(),
            reason,
        };

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let mime_type = IMAGE_TYPES
            .iter()
            .find(|(ext, _)| *ext == extension)
            .map(|(_, mime)| *mime)
            .ok_or_else(|| {
                unsupported(format!(
                    "expected one of {}",
                    IMAGE_TYPES.iter().map(|(ext, _)| *ext).collect::<Vec<_>>().join(", ")
                ))
            })?;
        if bytes.is_empty() {
            return Err(unsupported("file is empty".into()));
        }
        if bytes.len() > MAX_MEDIA_BYTES {
            return Err(unsupported(format!(
                "file is {} bytes, limit is {} bytes",
                bytes.len(),
                MAX_MEDIA_BYTES
            )));
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| format!("media.{}", extension));
        Ok(Self { path, file_name, mime_type, bytes })
    }

    pub fn read_from(path: &Path) -> Result<Self, AppError> {
        let bytes = fs::read(path).map_err(|e| AppError::UnsupportedMedia {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::new(path, bytes)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Drop for StagedMedia {
    fn drop(&mut self) {
        log::debug!("released staged media {}", self.path.display());
    }
}

/// Holds at most one staged file; replacing or dropping releases it.
#[derive(Debug, Default)]
pub struct MediaSlot {
    staged: Option<StagedMedia>,
}

impl MediaSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage `media`, releasing whatever was staged before.
    pub fn replace(&mut self, media: StagedMedia) -> &StagedMedia {
        self.staged.insert(media)
    }

    pub fn get(&self) -> Option<&StagedMedia> {
        self.staged.as_ref()
    }

    pub fn clear(&mut self) {
        self.staged = None;
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_none()
    }
}
