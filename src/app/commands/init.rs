use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::domain::{AppError, FormKind};
use crate::services::render_draft;

/// Default draft location for `kind` in the working directory.
pub fn default_draft_path(kind: FormKind) -> PathBuf {
    PathBuf::from(format!("{}.toml", kind.as_str()))
}

/// Execute the init command.
///
/// Writes a commented TOML draft for `kind` and refuses to overwrite an
/// existing file.
pub fn execute(
    kind: FormKind,
    path: &Path,
    default_token: &str,
    now: DateTime<Utc>,
) -> Result<PathBuf, AppError> {
    let is_toml = path.extension().and_then(|ext| ext.to_str()).is_some_and(|ext| ext == "toml");
    if !is_toml {
        return Err(AppError::Validation(format!(
            "Draft templates are TOML; use a .toml path instead of '{}'",
            path.display()
        )));
    }
    if path.exists() {
        return Err(AppError::Validation(format!(
            "{} already exists; remove it or choose another path with --output",
            path.display()
        )));
    }

    let file_name = path.file_name().and_then(|name| name.to_str()).unwrap_or("draft.toml");
    let content = render_draft(kind, file_name, default_token, now)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    log::info!("Wrote {} draft to {}", kind, path.display());
    Ok(path.to_path_buf())
}
