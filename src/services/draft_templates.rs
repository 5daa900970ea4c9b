//! Embedded draft templates rendered for `sovseas init`.

use chrono::{DateTime, Duration, Utc};
use include_dir::{Dir, include_dir};
use minijinja::{Environment, context};

use crate::domain::{AppError, FormKind};

static DRAFTS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/drafts");

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Days between `now` and the suggested campaign start.
const START_OFFSET_DAYS: i64 = 7;
const DEFAULT_CAMPAIGN_DAYS: i64 = 30;

/// Render the draft template for `kind`.
///
/// Campaign dates are pre-filled one week out so the template validates
/// once the required text is filled in.
pub fn render_draft(
    kind: FormKind,
    file_name: &str,
    default_token: &str,
    now: DateTime<Utc>,
) -> Result<String, AppError> {
    let template_path = format!("{}.toml.j2", kind.as_str());
    let source = DRAFTS_DIR
        .get_file(&template_path)
        .and_then(|file| file.contents_utf8())
        .ok_or_else(|| AppError::Internal(format!("Missing draft template: {}", template_path)))?;

    let start = now + Duration::days(START_OFFSET_DAYS);
    let end = start + Duration::days(DEFAULT_CAMPAIGN_DAYS);
    let ctx = context! {
        file_name => file_name,
        default_token => default_token,
        start_date => start.format(DATE_FORMAT).to_string(),
        end_date => end.format(DATE_FORMAT).to_string(),
        today => now.format("%Y-%m-%d").to_string(),
    };

    let env = Environment::new();
    env.render_str(source, ctx)
        .map_err(|e| AppError::Internal(format!("Failed to render {}: {}", template_path, e)))
}
